//! glcgc: converts GLSL ES shaders into Cg shaders.
//!
//! The conversion is a fixed, ordered list of text rules (see [`rules::RULES`]).
//! Free-standing `varying` and `attribute` declarations are lifted into the
//! parameter list of `main`, each annotated with a semantic looked up in a
//! [`SemanticTable`]. Nothing here parses or validates GLSL; unknown names end
//! up tagged `?SEMANTIC?` so they can be fixed by hand.
//!
//! ```
//! let cg = glcgc::convert("varying vec4 colorVarying;\nvoid main() {\n\tgl_FragColor = colorVarying;\n}\n");
//! assert!(cg.contains("float4 colorVarying : COLOR"));
//! ```

#[macro_use]
extern crate log;

/// Compiles a regex literal once per process.
macro_rules! regex {
  ($re:literal $(,)?) => {{
    static RE: std::sync::LazyLock<regex::Regex> =
      std::sync::LazyLock::new(|| regex::Regex::new($re).unwrap());
    &*RE
  }};
}

pub mod body;
pub mod driver;
pub mod error;
pub mod extract;
pub mod model;
pub mod rules;
pub mod semantics;
pub mod signature;

pub use self::{
  error::{Error, Result},
  model::{DeclKind, Declaration, ShaderKind},
  semantics::{Profile, SemanticTable, UNKNOWN_SEMANTIC},
};

/// Knobs of a conversion run.
#[derive(Clone, Debug)]
pub struct ConverterOptions {
  pub semantics: SemanticTable,
  /// Profile named in the header of converted vertex shaders.
  pub vertex_profile: String,
  /// Profile named in the header of converted fragment shaders.
  pub fragment_profile: String,
}

impl Default for ConverterOptions {
  fn default() -> Self {
    ConverterOptions {
      semantics: Profile::default().table(),
      vertex_profile: String::from("sce_vp_psp2"),
      fragment_profile: String::from("sce_fp_psp2"),
    }
  }
}

impl ConverterOptions {
  pub fn with_profile(profile: Profile) -> Self {
    ConverterOptions {
      semantics: profile.table(),
      ..Default::default()
    }
  }

  pub fn header_profile(&self, kind: ShaderKind) -> &str {
    match kind {
      ShaderKind::Vertex => &self.vertex_profile,
      ShaderKind::Fragment => &self.fragment_profile,
    }
  }
}

#[derive(Clone, Debug, Default)]
pub struct Converter {
  options: ConverterOptions,
}

impl Converter {
  pub fn new(options: ConverterOptions) -> Self {
    Converter { options }
  }

  pub fn options(&self) -> &ConverterOptions {
    &self.options
  }

  /// Runs every rule over `source` and returns the Cg text.
  ///
  /// The shader kind is decided once, on the untouched input.
  pub fn convert(&self, source: &str) -> String {
    let ctx = rules::Context {
      kind: ShaderKind::detect(source),
      options: &self.options,
    };

    rules::RULES.iter().fold(source.to_owned(), |text, rule| {
      trace!("applying rule {}", rule.name);
      (rule.apply)(&text, &ctx)
    })
  }
}

/// Converts `source` with the default profile.
pub fn convert(source: &str) -> String {
  Converter::default().convert(source)
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn header_follows_kind() {
    let options = ConverterOptions::default();
    assert_eq!(options.header_profile(ShaderKind::Vertex), "sce_vp_psp2");
    assert_eq!(options.header_profile(ShaderKind::Fragment), "sce_fp_psp2");
  }

  #[test]
  fn with_profile_swaps_only_the_table() {
    let options = ConverterOptions::with_profile(Profile::Gof2);
    assert_eq!(options.semantics.resolve("v_texCoord"), "TEXCOORD0");
    assert_eq!(options.semantics.resolve("colorVarying"), UNKNOWN_SEMANTIC);
    assert_eq!(options.fragment_profile, "sce_fp_psp2");
  }

  #[test]
  fn converter_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Converter>();
  }
}
