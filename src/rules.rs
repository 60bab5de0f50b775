//! The rewrite rules, in the order they run.
//!
//! Every rule is a plain text to text function. Later rules rely on earlier
//! ones only where noted; each can be called on its own.

use regex::{Captures, Regex};

use crate::model::ShaderKind;
use crate::signature;
use crate::ConverterOptions;

/// What a rule may know about the shader besides its text.
pub struct Context<'a> {
  pub kind: ShaderKind,
  pub options: &'a ConverterOptions,
}

pub struct Rule {
  pub name: &'static str,
  pub apply: fn(&str, &Context) -> String,
}

pub const RULES: &[Rule] = &[
  Rule { name: "line endings", apply: line_endings },
  Rule { name: "profile header", apply: profile_header },
  Rule { name: "split statements", apply: split_statements },
  Rule { name: "strip precision qualifiers", apply: strip_precision },
  Rule { name: "strip default precision", apply: strip_default_precision },
  Rule { name: "rename types", apply: rename_types },
  Rule { name: "rename intrinsics", apply: rename_intrinsics },
  Rule { name: "space entry point", apply: space_entry_point },
  Rule { name: "canonical entry point", apply: canonical_entry_point },
  Rule { name: "entry point parameters", apply: entry_point_parameters },
  Rule { name: "clean whitespace", apply: clean_whitespace },
];

fn replace(re: &Regex, text: &str, rep: &str) -> String {
  re.replace_all(text, rep).into_owned()
}

/// CRLF to LF, so no later pattern has to care about `\r`.
pub fn line_endings(text: &str, _: &Context) -> String {
  text.replace("\r\n", "\n")
}

const HEADER: &str = "// profile";

/// `// profile <name>` and a blank line on top, unless one is already there.
pub fn profile_header(text: &str, ctx: &Context) -> String {
  if text.starts_with(HEADER) {
    return text.to_owned();
  }
  format!("{} {}\n\n{}", HEADER, ctx.options.header_profile(ctx.kind), text)
}

/// One statement per line: `a = 1; b = 2;` is broken after the first `;`.
pub fn split_statements(text: &str, _: &Context) -> String {
  replace(regex!(r";[\t ]*(\w)"), text, ";\n${1}")
}

pub fn strip_precision(text: &str, _: &Context) -> String {
  let text = replace(
    regex!(r"\b(uniform|attribute|varying)\s+(?:highp|mediump|lowp)\b"),
    text,
    "${1}",
  );
  replace(regex!(r"\b(?:highp|mediump|lowp)\s+"), &text, "")
}

/// Drops `precision [qualifier] float;` along with the whitespace after it.
pub fn strip_default_precision(text: &str, _: &Context) -> String {
  replace(
    regex!(r"\bprecision\s+(?:(?:highp|mediump|lowp)\s+)?(?:float|int)\s*;\s*"),
    text,
    "",
  )
}

/// `vecN`, `ivecN`, `bvecN` and `matN` to their Cg names, whole tokens only.
pub fn rename_types(text: &str, _: &Context) -> String {
  let text = replace(regex!(r"\bivec([234])\b"), text, "int${1}");
  let text = replace(regex!(r"\bbvec([234])\b"), &text, "bool${1}");
  let text = replace(regex!(r"\bvec([234])\b"), &text, "float${1}");
  replace(regex!(r"\bmat([234])\b"), &text, "float${1}x${1}")
}

/// Sampler type and the texture lookup and `mix` calls.
///
/// Calls are only renamed when followed by `(`. `mix` also needs something
/// other than an identifier character or `.` right before it; the match eats
/// that character, so the rename runs until nested calls are all done.
pub fn rename_intrinsics(text: &str, _: &Context) -> String {
  let text = replace(regex!(r"\bsamplerCube\b"), text, "samplerCUBE");
  let text = replace(regex!(r"\btexture2D[\t\n ]*\("), &text, "tex2D(");
  let mut text = replace(regex!(r"\btextureCube[\t\n ]*\("), &text, "texCUBE(");

  let mix = regex!(r"([^\w.])mix[\t\n ]*\(");
  while mix.is_match(&text) {
    text = replace(mix, &text, "${1}lerp(");
  }
  text
}

/// Exactly one blank line between whatever ends before `main` (a global
/// statement or another function) and `main` itself.
pub fn space_entry_point(text: &str, _: &Context) -> String {
  replace(regex!(r"([;}])\s*void\s+main\s*\("), text, "${1}\n\nvoid main(")
}

/// `void main(void) {` and its spacing variants become `void main() {`
/// followed by a single newline.
pub fn canonical_entry_point(text: &str, _: &Context) -> String {
  let text = replace(
    regex!(r"\bvoid\s+main\s*\(\s*void\s*\)\s*\{"),
    text,
    "void main() {",
  );
  replace(regex!(r"\bvoid\s+main\s*\(\s*\)\s*\{\n?"), &text, "void main() {\n")
}

/// Moves attributes and varyings into the signature of `main`. Needs the
/// canonical `void main()` spelling.
pub fn entry_point_parameters(text: &str, ctx: &Context) -> String {
  signature::rewrite_entry_point(text, ctx.kind, &ctx.options.semantics)
}

fn indent_with_tabs(caps: &Captures) -> String {
  format!("{}{}", "\t".repeat(caps[1].len().div_ceil(4)), &caps[2])
}

pub fn clean_whitespace(text: &str, _: &Context) -> String {
  let text = replace(regex!(r"\n(?:[ \t]*\n)+"), text, "\n\n");
  let text = replace(regex!(r";[ \t]*\n"), &text, ";\n");
  let text = replace(regex!(r"([{}])[ \t]*\n"), &text, "${1}\n");
  let text = replace(regex!(r"\{\n\n"), &text, "{\n");
  let text = regex!(r"(?m)^( +)(\S)")
    .replace_all(&text, indent_with_tabs)
    .into_owned();
  let text = replace(
    regex!(r"\buniform[\t ]+(\w+)[\t ]+([\w\[\]]+)[\t ]*;[\t ]*\n?"),
    &text,
    "uniform ${1} ${2};\n",
  );

  let mut text = text.trim_end().to_owned();
  text.push('\n');
  text
}

#[cfg(test)]
mod test {
  use super::*;

  fn run(rule: fn(&str, &Context) -> String, kind: ShaderKind, text: &str) -> String {
    let options = ConverterOptions::default();
    rule(text, &Context { kind, options: &options })
  }

  fn apply(rule: fn(&str, &Context) -> String, text: &str) -> String {
    run(rule, ShaderKind::Vertex, text)
  }

  #[test]
  fn rules_run_in_documented_order() {
    let names = RULES.iter().map(|r| r.name).collect::<Vec<_>>();
    assert_eq!(names.first(), Some(&"line endings"));
    assert_eq!(names.last(), Some(&"clean whitespace"));
    let types = names.iter().position(|n| *n == "rename types").unwrap();
    let params = names.iter().position(|n| *n == "entry point parameters").unwrap();
    let canonical = names.iter().position(|n| *n == "canonical entry point").unwrap();
    assert!(types < params);
    assert!(canonical < params);
  }

  #[test]
  fn crlf_becomes_lf() {
    assert_eq!(apply(line_endings, "a;\r\nb;\r\n"), "a;\nb;\n");
    assert_eq!(apply(line_endings, "a;\nb;"), "a;\nb;");
  }

  #[test]
  fn header_depends_on_kind() {
    assert_eq!(run(profile_header, ShaderKind::Fragment, "x;\n"), "// profile sce_fp_psp2\n\nx;\n");
    assert_eq!(run(profile_header, ShaderKind::Vertex, "x;\n"), "// profile sce_vp_psp2\n\nx;\n");
  }

  #[test]
  fn header_is_added_once() {
    let once = apply(profile_header, "x;\n");
    assert_eq!(apply(profile_header, &once), once);
  }

  #[test]
  fn statements_get_their_own_line() {
    assert_eq!(apply(split_statements, "a = 1; b = 2;\n"), "a = 1;\nb = 2;\n");
    assert_eq!(apply(split_statements, "a = 1;\tb = 2;"), "a = 1;\nb = 2;");
    assert_eq!(apply(split_statements, "a = 1; }\n"), "a = 1; }\n");
  }

  #[test]
  fn precision_qualifiers_go_away() {
    let source = "uniform highp mat4 mvp;\n\
                  attribute mediump vec4 position;\n\
                  varying lowp vec4 v_color;\n\
                  lowp float x = 1.0;\n";
    assert_eq!(
      apply(strip_precision, source),
      "uniform mat4 mvp;\nattribute vec4 position;\nvarying vec4 v_color;\nfloat x = 1.0;\n"
    );
    assert_eq!(apply(strip_precision, "float highpass;\n"), "float highpass;\n");
  }

  #[test]
  fn default_precision_statement_is_dropped() {
    assert_eq!(apply(strip_default_precision, "precision mediump float;\nuniform float t;\n"), "uniform float t;\n");
    assert_eq!(apply(strip_default_precision, "precision float ;\n\nvoid f();"), "void f();");
    assert_eq!(apply(strip_default_precision, "float precisionBias;\n"), "float precisionBias;\n");
  }

  #[test]
  fn types_rename_as_whole_tokens() {
    let source = "vec4 a = vec4(1.0);\nivec2 i;\nbvec3 b;\nmat4 m = mat4(a, a, a, a);\nmat3 n;\nmyvec4 keep;\nvec4s keep2;\n";
    assert_eq!(
      apply(rename_types, source),
      "float4 a = float4(1.0);\nint2 i;\nbool3 b;\nfloat4x4 m = float4x4(a, a, a, a);\nfloat3x3 n;\nmyvec4 keep;\nvec4s keep2;\n"
    );
    assert_eq!(apply(rename_types, "(vec3)x"), "(float3)x");
  }

  #[test]
  fn texture_calls_rename() {
    let source = "uniform samplerCube env;\nc = texture2D (tex, uv) + textureCube(env, r);\nfloat texture2DScale;\n";
    assert_eq!(
      apply(rename_intrinsics, source),
      "uniform samplerCUBE env;\nc = tex2D(tex, uv) + texCUBE(env, r);\nfloat texture2DScale;\n"
    );
  }

  #[test]
  fn mix_becomes_lerp() {
    assert_eq!(apply(rename_intrinsics, "c = mix(a, b, t);"), "c = lerp(a, b, t);");
    assert_eq!(apply(rename_intrinsics, "c=mix (a,b,t);"), "c=lerp(a,b,t);");
    assert_eq!(apply(rename_intrinsics, "c = 2.0*mix(a, b, t);"), "c = 2.0*lerp(a, b, t);");
    assert_eq!(
      apply(rename_intrinsics, "c = mix(mix(a, b, t), mix(b, a, t), s);"),
      "c = lerp(lerp(a, b, t), lerp(b, a, t), s);"
    );
  }

  #[test]
  fn mix_after_any_operator() {
    assert_eq!(apply(rename_intrinsics, "c = a?mix(a, b, t):d;"), "c = a?lerp(a, b, t):d;");
    assert_eq!(apply(rename_intrinsics, "c = a ? b :mix(a, b, t);"), "c = a ? b :lerp(a, b, t);");
    assert_eq!(apply(rename_intrinsics, "x = v[0]>0.0&&mix(a,b,t).x;"), "x = v[0]>0.0&&lerp(a,b,t).x;");
    assert_eq!(apply(rename_intrinsics, "x = !mix(a,b,t).x;"), "x = !lerp(a,b,t).x;");
    assert_eq!(apply(rename_intrinsics, "x = v[mix(a,b,t)]|mix(a,b,t);"), "x = v[lerp(a,b,t)]|lerp(a,b,t);");
    assert_eq!(apply(rename_intrinsics, "x = i%mix(a,b,t)<mix(a,b,t);"), "x = i%lerp(a,b,t)<lerp(a,b,t);");
  }

  #[test]
  fn mix_inside_other_names_stays() {
    assert_eq!(apply(rename_intrinsics, "c = admix(a, b);"), "c = admix(a, b);");
    assert_eq!(apply(rename_intrinsics, "float mixer = mixFactor;"), "float mixer = mixFactor;");
    assert_eq!(apply(rename_intrinsics, "c = s.mix(a, b);"), "c = s.mix(a, b);");
    assert_eq!(apply(rename_intrinsics, "c = _mix(a, b) + mix2(a);"), "c = _mix(a, b) + mix2(a);");
  }

  #[test]
  fn entry_point_gets_a_blank_line() {
    assert_eq!(
      apply(space_entry_point, "uniform float t;\nvoid\nmain() {}"),
      "uniform float t;\n\nvoid main() {}"
    );
    assert_eq!(
      apply(space_entry_point, "uniform float t;\n\n\n\nvoid main() {}"),
      "uniform float t;\n\nvoid main() {}"
    );
  }

  #[test]
  fn entry_point_after_a_function_gets_a_blank_line() {
    assert_eq!(
      apply(space_entry_point, "float f(float x) {\n\treturn x;\n}\nvoid main() {}"),
      "float f(float x) {\n\treturn x;\n}\n\nvoid main() {}"
    );
    assert_eq!(
      apply(space_entry_point, "float f(float x) { return x; }void main() {}"),
      "float f(float x) { return x; }\n\nvoid main() {}"
    );
  }

  #[test]
  fn entry_point_spelling() {
    assert_eq!(apply(canonical_entry_point, "void main(void)\n{\n\tx;\n}"), "void main() {\n\tx;\n}");
    assert_eq!(apply(canonical_entry_point, "void  main ( ) {\n\n\tx;\n}"), "void main() {\n\n\tx;\n}");
    assert_eq!(apply(canonical_entry_point, "void main(){x;}"), "void main() {\nx;}");
    assert_eq!(apply(canonical_entry_point, "void mainLoop() {\n}"), "void mainLoop() {\n}");
  }

  #[test]
  fn whitespace_cleanup() {
    let source = "uniform   float4   tint ;  \nuniform sampler2D tex;\n\n\n  \nvoid main() {\n\n    x = 1;   \n  if (a) {  \n        y();\n    }\n}";
    assert_eq!(
      apply(clean_whitespace, source),
      "uniform float4 tint;\nuniform sampler2D tex;\n\nvoid main() {\n\tx = 1;\n\tif (a) {\n\t\ty();\n\t}\n}\n"
    );
  }

  #[test]
  fn every_space_indented_line_gets_tabs() {
    let source = "void main() {\n    if (a) {\n        b = c;\n    }\n    // done\n    #ifdef X\n}\n";
    assert_eq!(
      apply(clean_whitespace, source),
      "void main() {\n\tif (a) {\n\t\tb = c;\n\t}\n\t// done\n\t#ifdef X\n}\n"
    );
  }

  #[test]
  fn cleanup_ends_with_one_newline() {
    assert_eq!(apply(clean_whitespace, "x;\n\n\n"), "x;\n");
    assert_eq!(apply(clean_whitespace, "x;"), "x;\n");
  }
}
