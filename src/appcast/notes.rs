//! Release notes resolution
//!
//! Notes never fail a run. Anything short of a readable, non-blank file ends
//! in the profile's fallback markup.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Where the notes for a run came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum NotesSource {
  /// `--notes-file`
  Explicit(PathBuf),
  /// `<update-dir>/notes/<version>.md`
  Conventional(PathBuf),
  /// Nothing to read
  Fallback,
}

impl NotesSource {
  /// Pick the notes file for `version`
  ///
  /// A non-blank `notes_file` always wins, even if it does not exist; the
  /// conventional file is only chosen when it is present.
  pub fn resolve(notes_file: &str, update_dir: &Path, version: &str) -> Self {
    if !notes_file.trim().is_empty() {
      return NotesSource::Explicit(PathBuf::from(notes_file));
    }

    let conventional = conventional_path(update_dir, version);
    if conventional.exists() {
      NotesSource::Conventional(conventional)
    } else {
      NotesSource::Fallback
    }
  }

  fn path(&self) -> Option<&Path> {
    match self {
      NotesSource::Explicit(p) | NotesSource::Conventional(p) => Some(p),
      NotesSource::Fallback => None,
    }
  }
}

/// `<update-dir>/notes/<version>.md`
pub fn conventional_path(update_dir: &Path, version: &str) -> PathBuf {
  update_dir.join("notes").join(format!("{}.md", version))
}

/// Turn a notes source into the markup that goes inside the entry's CDATA
pub fn render(source: &NotesSource, fallback: &str) -> String {
  let Some(path) = source.path() else {
    return fallback.to_string();
  };

  let raw = match fs::read_to_string(path) {
    Ok(raw) => raw,
    Err(e) => {
      // Missing explicit files land here too
      warn!(path = %path.display(), error = %e, "release notes unreadable, using fallback");
      return fallback.to_string();
    }
  };

  if raw.trim().is_empty() {
    debug!(path = %path.display(), "release notes blank, using fallback");
    return fallback.to_string();
  }

  format!("<pre>\n{}\n</pre>", escape_html(&raw))
}

/// Escape text for embedding in HTML, quotes included
pub fn escape_html(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len() + raw.len() / 8);
  for ch in raw.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#x27;"),
      _ => out.push(ch),
    }
  }
  out
}
