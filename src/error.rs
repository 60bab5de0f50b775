use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The signature is missing, its braces never balance, or the body found is
  /// too short to be real.
  #[error("could not find function {signature}")]
  FunctionNotFound { signature: String },

  #[error("unknown semantic profile `{0}`")]
  UnknownProfile(String),

  #[error("line {line}: expected `name = SEMANTIC`, found `{content}`")]
  InvalidTableLine { line: usize, content: String },

  #[error("{} is not under {}", .path.display(), .root.display())]
  OutsideRoot { path: PathBuf, root: PathBuf },

  #[error("{}: {}", .path.display(), .source)]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error(transparent)]
  Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
