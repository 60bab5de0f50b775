//! Converts a whole tree of shader files.
//!
//! The driver only walks, reads and writes. The conversion itself is handed
//! in as a function so this module knows nothing about shaders.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{Error, Result};

pub struct Driver {
  pub input_root: PathBuf,
  pub output_root: PathBuf,
  pub input_extension: String,
  pub output_extension: String,
}

impl Driver {
  /// `.glsl` files under `input_root` become `.cg` files under `output_root`.
  pub fn new<I: Into<PathBuf>, O: Into<PathBuf>>(input_root: I, output_root: O) -> Self {
    Driver {
      input_root: input_root.into(),
      output_root: output_root.into(),
      input_extension: String::from("glsl"),
      output_extension: String::from("cg"),
    }
  }

  /// Where the converted `path` goes: same relative location under the
  /// output root, extension swapped.
  pub fn output_path(&self, path: &Path) -> Result<PathBuf> {
    let relative = path
      .strip_prefix(&self.input_root)
      .map_err(|_| Error::OutsideRoot {
        path: path.to_owned(),
        root: self.input_root.clone(),
      })?;
    Ok(self.output_root.join(relative).with_extension(&self.output_extension))
  }

  fn wants(&self, path: &Path) -> bool {
    path.extension() == Some(OsStr::new(&self.input_extension))
  }

  /// Converts every matching file and returns the paths written, in walk
  /// order. Stops at the first I/O error.
  pub fn run<F>(&self, convert: F) -> Result<Vec<PathBuf>>
  where
    F: Fn(&str) -> String,
  {
    let mut written = Vec::new();

    for entry in WalkDir::new(&self.input_root).sort_by_file_name() {
      let entry = entry?;
      if !entry.file_type().is_file() || !self.wants(entry.path()) {
        continue;
      }

      let target = self.output_path(entry.path())?;
      let source = read(entry.path())?;
      if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|source| Error::Io {
          path: parent.to_owned(),
          source,
        })?;
      }
      write(&target, &convert(&source))?;

      info!("{} -> {}", entry.path().display(), target.display());
      written.push(target);
    }

    if written.is_empty() {
      warn!(
        "no .{} files under {}",
        self.input_extension,
        self.input_root.display()
      );
    }

    Ok(written)
  }
}

pub fn read(path: &Path) -> Result<String> {
  fs::read_to_string(path).map_err(|source| Error::Io {
    path: path.to_owned(),
    source,
  })
}

pub fn write(path: &Path, contents: &str) -> Result<()> {
  fs::write(path, contents).map_err(|source| Error::Io {
    path: path.to_owned(),
    source,
  })
}
