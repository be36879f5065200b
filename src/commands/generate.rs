//! The generate command: add or refresh one release in the feed
//!
//! Steps run strictly in order and the feed is written once, at the end:
//! 1. Bootstrap the feed if it is missing
//! 2. Resolve notes, artifact size, versions and signatures
//! 3. Render the entry
//! 4. Remove stale entries for the version, insert the new one, persist

use crate::appcast::artifact;
use crate::appcast::bootstrap::{ensure_feed, skeleton};
use crate::appcast::document::splice;
use crate::appcast::entry::Entry;
use crate::appcast::notes::{self, NotesSource};
use crate::core::config::{ProductProfile, ReleaseEnv, SignatureScheme};
use crate::core::error::{AppcastError, AppcastResult, ResultExt};
use crate::utils::{join_url, write_atomic};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// File name of the feed inside the update directory
pub const APPCAST_FILE: &str = "appcast.xml";

/// Inputs from the command line
#[derive(Debug, Clone)]
pub struct GenerateOptions {
  pub version: String,
  pub dist_dir: PathBuf,
  pub update_dir: PathBuf,
  pub download_base: String,
  pub min_system_version: String,
  /// Blank means "look for the conventional notes file"
  pub notes_file: String,
  pub dry_run: bool,
  pub json: bool,
}

/// What a run did, for `--json` and for tests
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
  pub appcast: PathBuf,
  pub artifact: PathBuf,
  pub version: String,
  pub short_version: String,
  pub min_system_version: String,
  pub download_url: String,
  pub length: u64,
  pub notes: NotesSource,
  pub signatures: Vec<SignatureScheme>,
  pub removed_entries: usize,
  pub created_feed: bool,
  pub dry_run: bool,
}

/// Run the pipeline without printing anything
///
/// Returns the summary and the full updated document. In dry-run mode nothing
/// is written, not even the bootstrap skeleton.
pub fn update_feed(
  opts: &GenerateOptions,
  env: &ReleaseEnv,
  profile: &ProductProfile,
  now: DateTime<Utc>,
) -> AppcastResult<(RunSummary, String)> {
  let appcast_path = opts.update_dir.join(APPCAST_FILE);

  let created_feed = if opts.dry_run {
    !appcast_path.exists()
  } else {
    ensure_feed(&appcast_path, profile, &opts.download_base)?
  };

  let notes_source = NotesSource::resolve(&opts.notes_file, &opts.update_dir, &opts.version);
  let notes_markup = notes::render(&notes_source, &profile.fallback_notes);
  let artifact = artifact::locate(&opts.dist_dir, profile, &opts.version)?;

  let short_version = env.short_version.clone().unwrap_or_else(|| opts.version.clone());
  let min_system_version = env
    .min_system_version
    .clone()
    .unwrap_or_else(|| opts.min_system_version.clone());
  let download_url = join_url(&opts.download_base, &artifact.file_name);

  let contents = if created_feed && opts.dry_run {
    skeleton(profile, &opts.download_base)
  } else {
    fs::read_to_string(&appcast_path).with_context(|| format!("Failed to read {}", appcast_path.display()))?
  };

  let entry = Entry {
    version: opts.version.clone(),
    short_version: short_version.clone(),
    download_url: download_url.clone(),
    length: artifact.length,
    notes: notes_markup,
    min_system_version: min_system_version.clone(),
    signatures: env.signatures.clone(),
    published: now,
  };
  let fragment = entry.render(profile);

  let (updated, removed_entries) =
    splice(&contents, &profile.product_name, &opts.version, &fragment).map_err(|e| match e {
      AppcastError::Document(doc) => AppcastError::Document(doc.at(appcast_path.clone())),
      other => other,
    })?;

  if !opts.dry_run {
    write_atomic(&appcast_path, &updated)?;
    info!(path = %appcast_path.display(), version = %opts.version, removed_entries, "feed updated");
  }

  let summary = RunSummary {
    appcast: appcast_path,
    artifact: artifact.path,
    version: opts.version.clone(),
    short_version,
    min_system_version,
    download_url,
    length: artifact.length,
    notes: notes_source,
    signatures: env.signatures.keys().copied().collect(),
    removed_entries,
    created_feed,
    dry_run: opts.dry_run,
  };

  Ok((summary, updated))
}

/// Run the generate command
pub fn run_generate(opts: GenerateOptions, env: ReleaseEnv, profile: ProductProfile) -> AppcastResult<()> {
  let (summary, document) = update_feed(&opts, &env, &profile, Utc::now())?;

  if opts.json {
    println!("{}", serde_json::to_string_pretty(&summary)?);
  } else if opts.dry_run {
    print!("{}", document);
  } else {
    println!(
      "Updated appcast at {} with version {}",
      summary.appcast.display(),
      summary.version
    );
  }

  Ok(())
}
