//! Run configuration: the product profile and the release environment
//!
//! Both are plain values built once in `main` and threaded into the pipeline,
//! so nothing below the command layer reads the process environment.

use crate::core::error::{AppcastResult, ConfigError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env::VarError;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Fixed strings that identify the product inside the feed
///
/// Defaults match the feed the auto-update client already consumes. Changing
/// `product_name` changes the title prefix used to find stale entries, so
/// entries written under the old name will no longer be replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProductProfile {
  /// Display name, used as the `<title>` prefix of every entry
  pub product_name: String,
  /// Artifact file stem: `<stem>-<version>.zip`
  pub artifact_stem: String,
  /// Channel `<title>` written on bootstrap
  pub feed_title: String,
  /// Channel `<description>` written on bootstrap
  pub feed_description: String,
  /// Value of `sparkle:os` on the enclosure
  pub os: String,
  /// Value of `type` on the enclosure
  pub content_type: String,
  /// Notes markup used when no usable notes file exists
  pub fallback_notes: String,
}

impl Default for ProductProfile {
  fn default() -> Self {
    Self {
      product_name: "App Detective".to_string(),
      artifact_stem: "AppDetective".to_string(),
      feed_title: "App Detective Updates".to_string(),
      feed_description: "Release notes and downloads for App Detective.".to_string(),
      os: "macos".to_string(),
      content_type: "application/octet-stream".to_string(),
      fallback_notes: "<p>Bug fixes and improvements.</p>".to_string(),
    }
  }
}

impl ProductProfile {
  /// Load a profile from a TOML file; missing keys keep their defaults
  pub fn load(path: &Path) -> AppcastResult<Self> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
      path: path.to_path_buf(),
      reason: e.to_string(),
    })?;
    Self::parse(path, &content)
  }

  fn parse(path: &Path, content: &str) -> AppcastResult<Self> {
    let profile: ProductProfile = toml_edit::de::from_str(content).map_err(|e| ConfigError::Invalid {
      path: path.to_path_buf(),
      reason: e.to_string(),
    })?;
    Ok(profile)
  }

  /// Artifact file name for a version
  pub fn artifact_name(&self, version: &str) -> String {
    format!("{}-{}.zip", self.artifact_stem, version)
  }
}

/// Enclosure signature schemes, in enclosure order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureScheme {
  /// EdDSA over the archive
  Ed25519,
  /// EdDSA over the SHA3 digest of the archive
  Ed25519Sha3,
}

impl SignatureScheme {
  /// Environment variable carrying this signature
  pub fn env_var(self) -> &'static str {
    match self {
      Self::Ed25519 => "SIGNATURE",
      Self::Ed25519Sha3 => "SIGNATURE31",
    }
  }

  /// Enclosure attribute name
  pub fn attribute(self) -> &'static str {
    match self {
      Self::Ed25519 => "sparkle:edSignature",
      Self::Ed25519Sha3 => "sparkle:edSignature31",
    }
  }

  /// Index the attribute is inserted at in the enclosure attribute list
  pub fn insert_index(self) -> usize {
    match self {
      Self::Ed25519 => 1,
      Self::Ed25519Sha3 => 2,
    }
  }

  pub const ALL: [SignatureScheme; 2] = [Self::Ed25519, Self::Ed25519Sha3];
}

/// Signatures keyed by scheme; only non-empty values are present
pub type SignatureSet = BTreeMap<SignatureScheme, String>;

/// Overrides taken from the release pipeline's environment
///
/// A variable set to the empty string counts as unset. For `SHORT_VERSION`
/// and `MIN_SYSTEM_VERSION` that means the `--version` and
/// `--min-system-version` values are used instead of an empty title or
/// minimum version. Values that are not valid UTF-8 are logged and ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseEnv {
  /// `SHORT_VERSION`
  pub short_version: Option<String>,
  /// `MIN_SYSTEM_VERSION`
  pub min_system_version: Option<String>,
  /// `SIGNATURE` / `SIGNATURE31`
  pub signatures: SignatureSet,
}

impl ReleaseEnv {
  /// Read from the process environment
  pub fn from_env() -> Self {
    Self::from_lookup(|key| env_value(key, std::env::var(key)))
  }

  /// Read through an arbitrary lookup; empty values count as unset
  pub fn from_lookup<F>(lookup: F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

    let signatures = SignatureScheme::ALL
      .iter()
      .filter_map(|scheme| non_empty(scheme.env_var()).map(|sig| (*scheme, sig)))
      .collect();

    Self {
      short_version: non_empty("SHORT_VERSION"),
      min_system_version: non_empty("MIN_SYSTEM_VERSION"),
      signatures,
    }
  }
}

fn env_value(key: &str, value: Result<String, VarError>) -> Option<String> {
  match value {
    Ok(value) => Some(value),
    Err(VarError::NotPresent) => None,
    Err(VarError::NotUnicode(_)) => {
      warn!(var = key, "ignoring environment variable that is not valid UTF-8");
      None
    }
  }
}
