//! Small helpers for URLs and file writes

use crate::core::error::{AppcastResult, ResultExt};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Strip every trailing `/` from a base URL
pub fn trim_base_url(base: &str) -> &str {
  base.trim_end_matches('/')
}

/// Join a file name onto a base URL with exactly one `/`
pub fn join_url(base: &str, name: &str) -> String {
  format!("{}/{}", trim_base_url(base), name)
}

/// Replace `path` with `contents` in one rename
///
/// The temp file lives next to the target so the rename never crosses a
/// filesystem. A failure at any point leaves the old file as it was. An
/// existing file keeps its permissions, and a symlinked `path` is written
/// through to the file it points at.
pub fn write_atomic(path: &Path, contents: &str) -> AppcastResult<()> {
  let target = resolve_symlink(path)?;
  let parent = match target.parent() {
    Some(p) if !p.as_os_str().is_empty() => p,
    _ => Path::new("."),
  };

  if !parent.exists() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create directory {}", parent.display()))?;
  }

  let permissions = match fs::metadata(&target) {
    Ok(meta) => Some(meta.permissions()),
    Err(_) => new_file_permissions(),
  };

  let mut temp =
    NamedTempFile::new_in(parent).with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
  temp
    .write_all(contents.as_bytes())
    .with_context(|| format!("Failed to write {}", target.display()))?;
  temp.flush()?;
  if let Some(perms) = permissions {
    temp
      .as_file()
      .set_permissions(perms)
      .with_context(|| format!("Failed to set permissions for {}", target.display()))?;
  }
  temp.as_file().sync_all()?;
  temp
    .persist(&target)
    .with_context(|| format!("Failed to replace {}", target.display()))?;

  Ok(())
}

/// Follow `path` if it is a symlink, including one whose target does not exist yet
fn resolve_symlink(path: &Path) -> AppcastResult<PathBuf> {
  match fs::symlink_metadata(path) {
    Ok(meta) if meta.file_type().is_symlink() => match fs::canonicalize(path) {
      Ok(resolved) => Ok(resolved),
      Err(_) => {
        let link = fs::read_link(path).with_context(|| format!("Failed to read link {}", path.display()))?;
        Ok(match path.parent() {
          Some(dir) if link.is_relative() => dir.join(link),
          _ => link,
        })
      }
    },
    _ => Ok(path.to_path_buf()),
  }
}

// NamedTempFile creates 0600 files; new feeds must stay publishable
#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
  use std::os::unix::fs::PermissionsExt;
  Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
  None
}
