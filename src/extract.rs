//! Lifts `varying` and `attribute` declarations out of a shader.
//!
//! Both extractors return the text with the matched declarations removed,
//! together with the records in the order they were found.

use regex::Regex;

use crate::model::{DeclKind, Declaration, FRAG_COLOR, FRAG_COORD, POSITION};
use crate::semantics::SemanticTable;

const BUILT_IN_TYPE: &str = "float4";

/// Built-ins that become entry point parameters when the body mentions them.
const BUILT_INS: [(&str, &str); 3] = [
  (POSITION, "POSITION"),
  (FRAG_COORD, "WPOS"),
  (FRAG_COLOR, "COLOR"),
];

fn varying_pattern() -> &'static Regex {
  regex!(r"\bvarying\s+(?:(?:highp|mediump|lowp)\s+)?(\w+)\s+([\w\[\]]+)\s*;[\t ]*\n?")
}

fn attribute_pattern() -> &'static Regex {
  regex!(r"\battribute\s+(?:(?:highp|mediump|lowp)\s+)?(\w+)\s+([\w\[\]]+)\s*;[\t ]*\n?")
}

fn extract(
  pattern: &Regex,
  kind: DeclKind,
  text: &str,
  semantics: &SemanticTable,
) -> (String, Vec<Declaration>) {
  let declarations = pattern
    .captures_iter(text)
    .map(|caps| {
      let name = &caps[2];
      let decl = Declaration::new(kind, &caps[1], name, semantics.resolve(name));
      debug!("found {:?} {}", kind, decl);
      decl
    })
    .collect::<Vec<_>>();

  if declarations.is_empty() {
    return (text.to_owned(), declarations);
  }

  (pattern.replace_all(text, "").into_owned(), declarations)
}

/// Removes every `varying <type> <name>;` line, then appends a record for
/// each of `gl_Position`, `gl_FragCoord` and `gl_FragColor` still used in
/// the remaining text. Built-ins are detected, never removed.
pub fn extract_varyings(text: &str, semantics: &SemanticTable) -> (String, Vec<Declaration>) {
  let (text, mut declarations) = extract(varying_pattern(), DeclKind::Varying, text, semantics);

  for (name, semantic) in BUILT_INS {
    if text.contains(name) {
      debug!("found built-in {}", name);
      declarations.push(Declaration::new(DeclKind::BuiltIn, BUILT_IN_TYPE, name, semantic));
    }
  }

  (text, declarations)
}

/// Removes every `attribute <type> <name>;` line.
pub fn extract_attributes(text: &str, semantics: &SemanticTable) -> (String, Vec<Declaration>) {
  extract(attribute_pattern(), DeclKind::Attribute, text, semantics)
}
