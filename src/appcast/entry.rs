//! Rendering of a single `<item>` fragment
//!
//! The fragment's whitespace is part of the contract with the feed's
//! existing entries, so it is built by hand rather than by a serializer.

use crate::core::config::{ProductProfile, SignatureSet};
use chrono::{DateTime, Utc};

/// `pubDate` wire format, always in UTC
const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";

/// Everything an entry carries
#[derive(Debug, Clone)]
pub struct Entry {
  /// `sparkle:version`, also the key entries are replaced by
  pub version: String,
  /// `sparkle:shortVersionString`
  pub short_version: String,
  pub download_url: String,
  /// Artifact size in bytes
  pub length: u64,
  /// Markup placed inside CDATA as-is
  pub notes: String,
  pub min_system_version: String,
  pub signatures: SignatureSet,
  pub published: DateTime<Utc>,
}

impl Entry {
  /// Enclosure attributes in output order
  ///
  /// Signatures are inserted at fixed indices into the base list, primary
  /// first, so the secondary alone lands after `sparkle:os`.
  pub fn enclosure_attributes(&self, profile: &ProductProfile) -> Vec<String> {
    let mut attrs = vec![
      format!(r#"url="{}""#, self.download_url),
      format!(r#"sparkle:os="{}""#, profile.os),
      format!(r#"length="{}""#, self.length),
      format!(r#"type="{}""#, profile.content_type),
    ];

    for (scheme, value) in &self.signatures {
      attrs.insert(scheme.insert_index(), format!(r#"{}="{}""#, scheme.attribute(), value));
    }

    attrs
  }

  /// Render the `<item>` fragment, trailing newline included
  pub fn render(&self, profile: &ProductProfile) -> String {
    let enclosure = self.enclosure_attributes(profile).join("\n        ");

    format!(
      r#"    <item>
      <title>{product} {short}</title>
      <description>
        <![CDATA[
        {notes}
        ]]>
      </description>
      <pubDate>{pub_date}</pubDate>
      <sparkle:version>{version}</sparkle:version>
      <sparkle:shortVersionString>{short}</sparkle:shortVersionString>
      <enclosure
        {enclosure}
      />
      <sparkle:minimumSystemVersion>{min_system}</sparkle:minimumSystemVersion>
    </item>
"#,
      product = profile.product_name,
      short = self.short_version,
      notes = self.notes,
      pub_date = pub_date(&self.published),
      version = self.version,
      enclosure = enclosure,
      min_system = self.min_system_version,
    )
  }
}

/// Format a timestamp for `<pubDate>`
pub fn pub_date(at: &DateTime<Utc>) -> String {
  at.format(PUB_DATE_FORMAT).to_string()
}
