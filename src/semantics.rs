//! Name to semantic lookup.
//!
//! Every game the converter has been used on names its varyings differently,
//! so the table is a value handed to the converter, not a global. The tables
//! of the games already ported ship as [`Profile`]s.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::{Error, Result};

/// Tag emitted for names missing from the table.
pub const UNKNOWN_SEMANTIC: &str = "?SEMANTIC?";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SemanticTable {
  entries: HashMap<String, String>,
}

impl SemanticTable {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
    let mut table = Self::new();
    for (name, semantic) in pairs {
      table.insert(*name, *semantic);
    }
    table
  }

  pub fn insert<N: Into<String>, S: Into<String>>(&mut self, name: N, semantic: S) {
    self.entries.insert(name.into(), semantic.into());
  }

  /// Exact, case-sensitive lookup. Never fails: unknown names get
  /// [`UNKNOWN_SEMANTIC`].
  pub fn resolve(&self, name: &str) -> &str {
    self
      .entries
      .get(name)
      .map(String::as_str)
      .unwrap_or(UNKNOWN_SEMANTIC)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Reads a table written as one `name = SEMANTIC` (or `name SEMANTIC`)
  /// entry per line. `#` starts a comment.
  pub fn parse(text: &str) -> Result<Self> {
    let mut table = Self::new();

    for (index, raw) in text.lines().enumerate() {
      let line = match raw.find('#') {
        Some(hash) => &raw[..hash],
        None => raw,
      }
      .trim();
      if line.is_empty() {
        continue;
      }

      let fields = line
        .split(|c: char| c == '=' || c.is_whitespace())
        .filter(|field| !field.is_empty())
        .collect::<Vec<_>>();

      match fields.as_slice() {
        [name, semantic] => table.insert(*name, *semantic),
        _ => {
          return Err(Error::InvalidTableLine {
            line: index + 1,
            content: raw.to_owned(),
          })
        }
      }
    }

    Ok(table)
  }
}

impl fmt::Display for SemanticTable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (name, semantic) in self.entries.iter().sorted() {
      writeln!(f, "{} = {}", name, semantic)?;
    }
    Ok(())
  }
}

/// Built-in tables, one per ported game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Profile {
  #[default]
  Sdhm,
  Gof2,
  Gof2Hd,
}

impl Profile {
  pub const ALL: [Profile; 3] = [Profile::Sdhm, Profile::Gof2, Profile::Gof2Hd];

  pub fn name(self) -> &'static str {
    match self {
      Profile::Sdhm => "sdhm",
      Profile::Gof2 => "gof2",
      Profile::Gof2Hd => "gof2hd",
    }
  }

  pub fn table(self) -> SemanticTable {
    SemanticTable::from_pairs(self.pairs())
  }

  fn pairs(self) -> &'static [(&'static str, &'static str)] {
    match self {
      Profile::Sdhm => &[
        ("colorVarying", "COLOR"),
        ("fogA", "TEXCOORD4"),
        ("fogB", "TEXCOORD5"),
        ("cloudUVvarying", "TEXCOORD1"),
        ("frameFactor", "TEXCOORD6"),
        ("progressAndAltColor", "TEXCOORD1"),
        ("progressVarying", "TEXCOORD2"),
        ("reflectedVector", "TEXCOORD7"),
        ("screenColorVarying", "TEXCOORD8"),
        ("shadowMapUVVarying", "TEXCOORD9"),
        ("uv", "TEXCOORD0"),
        ("uv0Varying", "TEXCOORD0"),
        ("uv1Varying", "TEXCOORD1"),
        ("uv2Varying", "TEXCOORD2"),
        ("uv3Varying", "TEXCOORD3"),
        ("uv0BVarying", "TEXCOORD4"),
        ("uv0RVarying", "TEXCOORD5"),
        ("uvCutoff", "TEXCOORD0"),
      ],
      Profile::Gof2 => &[
        ("v_color", "COLOR"),
        ("v_VertexColor", "COLOR"),
        ("v_DiffuseLight", "TEXCOORD1"),
        ("v_texCoord", "TEXCOORD0"),
        ("v_eye_dir", "TEXCOORD2"),
        ("v_light_dir", "TEXCOORD3"),
        ("v_lightvec", "TEXCOORD4"),
        ("v_normal", "TEXCOORD5"),
        ("v_specular_dir", "TEXCOORD6"),
      ],
      Profile::Gof2Hd => &[
        ("uv", "TEXCOORD0"),
        ("v_texCoord", "TEXCOORD0"),
        ("v_FogFactor", "FOG"),
        ("v_color", "COLOR"),
        ("v_VertexColor", "COLOR"),
        ("DiffuseColor", "COLOR"),
        ("v_DiffuseLight", "TEXCOORD1"),
        ("v_eye_dir", "TEXCOORD1"),
        ("v_light_dir", "TEXCOORD2"),
        ("v_lightvec", "TEXCOORD3"),
        ("v_normal", "TEXCOORD8"),
        ("v_normalView", "TEXCOORD5"),
        ("v_reflectdir", "TEXCOORD6"),
        ("v_rimFactor", "TEXCOORD7"),
        ("v_specular_dir", "TEXCOORD7"),
        ("v_SpecularLight", "TEXCOORD8"),
        ("v_z", "TEXCOORD9"),
      ],
    }
  }
}

impl FromStr for Profile {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Profile::ALL
      .into_iter()
      .find(|profile| profile.name().eq_ignore_ascii_case(s))
      .ok_or_else(|| Error::UnknownProfile(s.to_owned()))
  }
}

impl fmt::Display for Profile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
