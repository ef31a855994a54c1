//! # File I/O Module
//!
//! Atomic header insertion. The header and the original content are written
//! to a temporary file next to the target, which is then renamed over it.
//! Readers see either the old file or the new one, never a mix.

use std::fs::{File, Permissions};
use std::io::{self, Read, Write as _};
use std::path::Path;

use tracing::debug;

/// Joins built header lines into the bytes written at the top of a file:
/// the header block followed by one blank separator line.
pub fn render_header(lines: &[String]) -> String {
  let mut header = lines.join("\n");
  header.push_str("\n\n");
  header
}

/// Inserts a rendered header at the top of a file.
///
/// The processor only talks to this trait. [`FileMutator`] is the default.
pub trait HeaderWriter: Send + Sync {
  /// Writes `header` followed by the current content of `path` back to
  /// `path`.
  ///
  /// # Errors
  ///
  /// On error the file at `path` must be left unchanged.
  fn write_header(&self, path: &Path, header: &[u8]) -> io::Result<()>;
}

/// File mutation operations for the processor.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileMutator;

impl HeaderWriter for FileMutator {
  fn write_header(&self, path: &Path, header: &[u8]) -> io::Result<()> {
    Self::prepend_header(path, header)
  }
}

impl FileMutator {
  /// Prepends `header` to the file at `path` using atomic replacement.
  ///
  /// The original permission bits are copied to the new file when they can
  /// be read; failing to read or apply them does not fail the operation.
  ///
  /// # Errors
  ///
  /// Returns an error if the original cannot be read or the temporary file
  /// cannot be created, written, or renamed. The original file is left
  /// unmodified and the temporary file is removed in every error case.
  pub fn prepend_header(path: &Path, header: &[u8]) -> io::Result<()> {
    let mut original = File::open(path)?;

    let permissions = match original.metadata() {
      Ok(metadata) => Some(metadata.permissions()),
      Err(e) => {
        debug!("Could not stat {}: {}", path.display(), e);
        None
      }
    };

    Self::prepend_from(path, header, &mut original, permissions)
  }

  /// Writes `header` followed by everything in `content` to a temporary file
  /// in the directory of `path`, then renames it onto `path`.
  pub(crate) fn prepend_from<R: Read + ?Sized>(
    path: &Path,
    header: &[u8],
    content: &mut R,
    permissions: Option<Permissions>,
  ) -> io::Result<()> {
    // Same directory keeps the rename on one filesystem
    let dir = match path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };

    // Dropping `tmp` before the rename removes the temporary file
    let mut tmp = tempfile::Builder::new()
      .prefix(".copygen-")
      .suffix(".tmp")
      .tempfile_in(dir)?;

    tmp.write_all(header)?;
    io::copy(content, &mut tmp)?;

    if let Some(permissions) = permissions
      && let Err(e) = tmp.as_file().set_permissions(permissions)
    {
      debug!("Could not copy permissions to {}: {}", tmp.path().display(), e);
    }

    tmp.as_file().sync_all()?;

    // Close the handle before renaming; some platforms refuse to rename open files
    let tmp_path = tmp.into_temp_path();
    tmp_path.persist(path).map_err(|e| e.error)?;

    Ok(())
  }
}
