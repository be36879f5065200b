//! Packaged artifact lookup

use crate::core::config::ProductProfile;
use crate::core::error::{AppcastResult, ArtifactError, ResultExt};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The zip that an entry points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
  pub path: PathBuf,
  pub file_name: String,
  /// Exact size in bytes
  pub length: u64,
}

/// Find `<stem>-<version>.zip` in `dist_dir` and read its size
pub fn locate(dist_dir: &Path, profile: &ProductProfile, version: &str) -> AppcastResult<Artifact> {
  let file_name = profile.artifact_name(version);
  let path = dist_dir.join(&file_name);

  let metadata = match fs::metadata(&path) {
    Ok(m) => m,
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      return Err(ArtifactError::NotFound { path }.into());
    }
    Err(e) => return Err(e).with_context(|| format!("Failed to stat {}", path.display())),
  };

  debug!(path = %path.display(), length = metadata.len(), "found artifact");

  Ok(Artifact {
    path,
    file_name,
    length: metadata.len(),
  })
}
