use std::fmt;

/// Which stage a shader is written for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShaderKind {
  #[default]
  Vertex,
  Fragment,
}

impl ShaderKind {
  /// A shader that writes `gl_FragColor` is a fragment shader, anything else
  /// is treated as a vertex shader.
  pub fn detect(source: &str) -> Self {
    if source.contains(FRAG_COLOR) {
      ShaderKind::Fragment
    } else {
      ShaderKind::Vertex
    }
  }
}

pub const POSITION: &str = "gl_Position";
pub const FRAG_COORD: &str = "gl_FragCoord";
pub const FRAG_COLOR: &str = "gl_FragColor";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
  Varying,
  Attribute,
  /// One of the `gl_*` variables, synthesized rather than declared.
  BuiltIn,
}

/// One shader interface variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
  pub kind: DeclKind,
  pub ty: String,
  /// Identifier, array suffix included (`lights[4]`).
  pub name: String,
  pub semantic: String,
}

impl Declaration {
  pub fn new<T, N, S>(kind: DeclKind, ty: T, name: N, semantic: S) -> Self
  where
    T: Into<String>,
    N: Into<String>,
    S: Into<String>,
  {
    Declaration {
      kind,
      ty: ty.into(),
      name: name.into(),
      semantic: semantic.into(),
    }
  }

  pub fn is_built_in(&self) -> bool {
    self.kind == DeclKind::BuiltIn
  }
}

impl fmt::Display for Declaration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {} : {}", self.ty, self.name, self.semantic)
  }
}
