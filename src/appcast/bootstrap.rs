//! Minimal feed creation

use crate::core::config::ProductProfile;
use crate::core::error::AppcastResult;
use crate::utils::{join_url, write_atomic};
use std::path::Path;
use tracing::{debug, info};

/// Empty feed: root, one channel, no entries
pub fn skeleton(profile: &ProductProfile, download_base: &str) -> String {
  let link = join_url(download_base, "appcast.xml");
  format!(
    r#"<?xml version="1.0" encoding="UTF-8"?>
<rss xmlns:sparkle="http://www.andymatuschak.org/xml-namespaces/sparkle" version="2.0">
  <channel>
    <title>{title}</title>
    <link>{link}</link>
    <description>{description}</description>
    <language>en</language>
  </channel>
</rss>
"#,
    title = profile.feed_title,
    link = link,
    description = profile.feed_description,
  )
}

/// Write the skeleton to `appcast_path` unless a document is already there
///
/// Returns whether a new document was created.
pub fn ensure_feed(appcast_path: &Path, profile: &ProductProfile, download_base: &str) -> AppcastResult<bool> {
  if appcast_path.exists() {
    debug!(path = %appcast_path.display(), "feed already present");
    return Ok(false);
  }

  write_atomic(appcast_path, &skeleton(profile, download_base))?;
  info!(path = %appcast_path.display(), "created empty feed");
  Ok(true)
}
