//! Builds the parameter list of the Cg entry point.

use std::fmt::Write;

use itertools::Itertools;

use crate::extract::{extract_attributes, extract_varyings};
use crate::model::{DeclKind, Declaration, ShaderKind, FRAG_COLOR};
use crate::semantics::SemanticTable;
use crate::Error;

/// The entry point as every rule before this one leaves it.
pub const ENTRY_POINT: &str = "void main()";

fn write_parameter(out: &mut String, kind: ShaderKind, decl: &Declaration) {
  let _ = match (kind, decl.kind) {
    // vertex inputs are bound by position
    (_, DeclKind::Attribute) => write!(out, "{} {}", decl.ty, decl.name),
    (ShaderKind::Vertex, _) => write!(out, "{} out {} : {}", decl.ty, decl.name, decl.semantic),
    (ShaderKind::Fragment, _) if decl.name == FRAG_COLOR => {
      write!(out, "{} out {} : {}", decl.ty, decl.name, decl.semantic)
    }
    (ShaderKind::Fragment, _) => write!(out, "{} {} : {}", decl.ty, decl.name, decl.semantic),
  };
}

/// Text that goes between the parentheses of `main`: one parameter per line,
/// attributes first. Empty when there is nothing to pass.
pub fn parameter_list(kind: ShaderKind, attributes: &[Declaration], varyings: &[Declaration]) -> String {
  if attributes.is_empty() && varyings.is_empty() {
    return String::new();
  }

  let params = attributes
    .iter()
    .chain(varyings)
    .map(|decl| {
      let mut param = String::with_capacity(64);
      write_parameter(&mut param, kind, decl);
      param
    })
    .join(",\n\t");

  format!("\n\t{}\n", params)
}

/// Replaces the first `void main()` with `void main(<params>)`.
///
/// `None` when the literal is missing: the entry point either does not exist
/// or already takes parameters, and which one is reported.
pub fn inject(text: &str, params: &str, declarations: &[Declaration]) -> Option<String> {
  if params.is_empty() {
    return Some(text.to_owned());
  }

  if text.contains(ENTRY_POINT) {
    return Some(text.replacen(ENTRY_POINT, &format!("void main({})", params), 1));
  }

  let explicit = declarations
    .iter()
    .filter(|d| !d.is_built_in())
    .map(|d| &d.name)
    .collect::<Vec<_>>();

  if !regex!(r"\bvoid\s+main\s*\(").is_match(text) {
    let e = Error::FunctionNotFound {
      signature: String::from("void main"),
    };
    warn!("{}; {} parameters not injected", e, declarations.len());
  } else if !explicit.is_empty() {
    warn!(
      "main already takes parameters; {} declarations left in place: {}",
      explicit.len(),
      explicit.iter().join(", ")
    );
  } else {
    debug!("main already takes parameters, built-ins left alone");
  }

  None
}

/// Lifts the interface declarations of `text` into the entry point.
///
/// Fragment shaders only pass varyings; vertex shaders pass attributes and
/// then varyings. If they can not be injected the text is returned as it
/// came in, declarations included.
pub fn rewrite_entry_point(text: &str, kind: ShaderKind, semantics: &SemanticTable) -> String {
  let (stripped, attributes) = match kind {
    ShaderKind::Vertex => extract_attributes(text, semantics),
    ShaderKind::Fragment => (text.to_owned(), Vec::new()),
  };
  let (stripped, varyings) = extract_varyings(&stripped, semantics);

  let params = parameter_list(kind, &attributes, &varyings);
  let declarations = attributes.into_iter().chain(varyings).collect::<Vec<_>>();
  inject(&stripped, &params, &declarations).unwrap_or_else(|| text.to_owned())
}
