//! Brace matching over raw text.

use std::ops::Range;

use crate::{Error, Result};

/// Byte range of the body of the first function whose text starts with
/// `signature`, braces excluded.
///
/// Scanning starts at the signature, so braces before it are ignored; nested
/// blocks are skipped by depth counting. Braces inside comments or strings
/// are counted like any other.
pub fn find_body(signature: &str, source: &str) -> Result<Range<usize>> {
  let not_found = || Error::FunctionNotFound {
    signature: signature.to_owned(),
  };

  let begin = source.find(signature).ok_or_else(not_found)?;

  let mut depth = 0usize;
  let mut start = None;
  for (offset, byte) in source.bytes().enumerate().skip(begin) {
    match byte {
      b'{' => {
        if depth == 0 {
          start = Some(offset + 1);
        }
        depth += 1;
      }
      b'}' if depth > 0 => {
        depth -= 1;
        if depth == 0 {
          let start = start.ok_or_else(not_found)?;
          // too short to be the function we asked for
          if offset - start <= signature.len() {
            return Err(not_found());
          }
          return Ok(start..offset);
        }
      }
      _ => {}
    }
  }

  Err(not_found())
}

/// The body of `signature`, or all of `source` (with a warning) when it can
/// not be found.
pub fn locate<'a>(signature: &str, source: &'a str) -> &'a str {
  match find_body(signature, source) {
    Ok(range) => &source[range],
    Err(e) => {
      warn!("{}", e);
      source
    }
  }
}

/// Appends `statement` on its own line at the end of the body of
/// `signature`. Returns `source` untouched when the body can not be found.
pub fn append_statement(signature: &str, statement: &str, source: &str) -> String {
  match find_body(signature, source) {
    Ok(range) => {
      let mut out = String::with_capacity(source.len() + statement.len() + 3);
      out.push_str(&source[..range.end]);
      out.push_str("\n\t");
      out.push_str(statement);
      out.push('\n');
      out.push_str(&source[range.end..]);
      out
    }
    Err(e) => {
      warn!("{}", e);
      source.to_owned()
    }
  }
}
