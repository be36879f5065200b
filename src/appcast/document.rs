//! Text surgery on the feed document
//!
//! The feed is never parsed. Entries are located with a pattern anchored on
//! `<item>` plus the product title prefix and bounded by the nearest
//! `</item>`, so one match can never swallow a neighbouring entry.

use crate::core::error::{AppcastError, AppcastResult, DocumentError};
use regex::{Captures, Regex};
use tracing::debug;

/// Insertion anchor; the new entry goes right before it
pub const CHANNEL_CLOSE: &str = "</channel>";

/// Result of removing stale entries
#[derive(Debug)]
pub struct Removal {
  pub contents: String,
  pub removed: usize,
}

/// Drop every entry whose `sparkle:version` is exactly `version`
///
/// Leading whitespace before `<item>` goes with the entry. Entries whose
/// title does not start with `product_name` are never touched.
pub fn remove_entries(contents: &str, product_name: &str, version: &str) -> AppcastResult<Removal> {
  let pattern = format!(r"(?s)\s*<item>\s*<title>{} .*?</item>", regex::escape(product_name));
  let item = Regex::new(&pattern).map_err(|e| AppcastError::message(format!("Invalid entry pattern: {}", e)))?;
  let version_field = format!("<sparkle:version>{}</sparkle:version>", version);

  let mut removed = 0;
  let updated = item.replace_all(contents, |caps: &Captures<'_>| {
    let fragment = &caps[0];
    if fragment.contains(&version_field) {
      removed += 1;
      String::new()
    } else {
      fragment.to_string()
    }
  });

  debug!(version, removed, "removed stale entries");

  Ok(Removal {
    contents: updated.into_owned(),
    removed,
  })
}

/// Put `fragment` in front of the closing channel marker
pub fn insert_entry(contents: &str, fragment: &str) -> Result<String, DocumentError> {
  let at = contents
    .rfind(CHANNEL_CLOSE)
    .ok_or(DocumentError::MissingChannelMarker { path: None })?;

  let mut out = String::with_capacity(contents.len() + fragment.len() + 3);
  out.push_str(&contents[..at]);
  out.push_str(fragment);
  out.push_str("\n  ");
  out.push_str(&contents[at..]);
  Ok(out)
}

/// Remove any entry for `version`, then insert `fragment`
pub fn splice(contents: &str, product_name: &str, version: &str, fragment: &str) -> AppcastResult<(String, usize)> {
  let Removal { contents, removed } = remove_entries(contents, product_name, version)?;
  let updated = insert_entry(&contents, fragment)?;
  Ok((updated, removed))
}
