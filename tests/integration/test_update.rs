//! Tests for adding and replacing entries

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_scenario_defaults() -> Result<()> {
  let dirs = ReleaseDirs::new()?;
  dirs.add_artifact("2.3.0", 5_242_880)?;

  let output = run_appcast_gen(&dirs.args("2.3.0", &[]), &[])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert_eq!(
    stdout.trim_end(),
    format!("Updated appcast at {} with version 2.3.0", dirs.appcast_path().display())
  );

  let feed = dirs.read_appcast()?;
  let item = item_for(&feed, "2.3.0").expect("entry for 2.3.0");
  assert!(item.contains("<title>App Detective 2.3.0</title>"));
  assert!(item.contains("<sparkle:shortVersionString>2.3.0</sparkle:shortVersionString>"));
  assert!(item.contains("length=\"5242880\""));
  assert!(item.contains("url=\"https://downloads.example.com/appdetective/AppDetective-2.3.0.zip\""));
  assert!(item.contains("        <p>Bug fixes and improvements.</p>\n"));
  assert!(item.contains("<sparkle:minimumSystemVersion>13.0</sparkle:minimumSystemVersion>"));
  assert!(!item.contains("edSignature"));

  Ok(())
}

#[test]
fn test_rerun_same_version_keeps_one_entry() -> Result<()> {
  let dirs = ReleaseDirs::new()?;
  dirs.add_artifact("2.3.0", 100)?;
  run_appcast_gen(&dirs.args("2.3.0", &[]), &[])?;

  // Repackaged with a different size
  dirs.add_artifact("2.3.0", 250)?;
  run_appcast_gen(&dirs.args("2.3.0", &[]), &[])?;

  let feed = dirs.read_appcast()?;
  assert_eq!(items(&feed).len(), 1);
  let item = item_for(&feed, "2.3.0").expect("entry for 2.3.0");
  assert!(item.contains("length=\"250\""));
  assert!(!item.contains("length=\"100\""));

  Ok(())
}

#[test]
fn test_updating_one_version_leaves_other_byte_identical() -> Result<()> {
  let dirs = ReleaseDirs::new()?;
  dirs.add_artifact("1.0", 10)?;
  dirs.add_artifact("2.0", 20)?;

  run_appcast_gen(&dirs.args("1.0", &[]), &[])?;
  run_appcast_gen(&dirs.args("2.0", &[]), &[])?;
  let before = dirs.read_appcast()?;
  let v2_before = item_for(&before, "2.0").expect("entry for 2.0").to_string();

  dirs.add_artifact("1.0", 11)?;
  run_appcast_gen(&dirs.args("1.0", &[]), &[])?;
  let after = dirs.read_appcast()?;

  assert_eq!(items(&after).len(), 2);
  assert_eq!(item_for(&after, "2.0").expect("entry for 2.0"), v2_before);
  assert!(item_for(&after, "1.0").expect("entry for 1.0").contains("length=\"11\""));

  Ok(())
}

#[test]
fn test_updating_later_version_keeps_earlier_entry() -> Result<()> {
  let dirs = ReleaseDirs::new()?;
  dirs.add_artifact("1.0", 10)?;
  dirs.add_artifact("2.0", 20)?;

  run_appcast_gen(&dirs.args("1.0", &[]), &[])?;
  run_appcast_gen(&dirs.args("2.0", &[]), &[])?;
  let v1_before = item_for(&dirs.read_appcast()?, "1.0").expect("entry for 1.0").to_string();

  run_appcast_gen(&dirs.args("2.0", &[]), &[])?;
  let after = dirs.read_appcast()?;

  assert_eq!(items(&after).len(), 2);
  assert_eq!(item_for(&after, "1.0").expect("entry for 1.0"), v1_before);

  Ok(())
}

#[test]
fn test_rerun_produces_same_entry_apart_from_date() -> Result<()> {
  let dirs = ReleaseDirs::new()?;
  dirs.add_artifact("3.1", 42)?;

  run_appcast_gen(&dirs.args("3.1", &[]), &[])?;
  let first = without_pub_date(item_for(&dirs.read_appcast()?, "3.1").expect("entry"));
  run_appcast_gen(&dirs.args("3.1", &[]), &[])?;
  let second = without_pub_date(item_for(&dirs.read_appcast()?, "3.1").expect("entry"));

  assert_eq!(first, second);
  Ok(())
}

#[test]
fn test_environment_overrides() -> Result<()> {
  let dirs = ReleaseDirs::new()?;
  dirs.add_artifact("412", 5)?;

  run_appcast_gen(
    &dirs.args("412", &[]),
    &[("SHORT_VERSION", "4.1.2"), ("MIN_SYSTEM_VERSION", "14.0")],
  )?;

  let feed = dirs.read_appcast()?;
  let item = item_for(&feed, "412").expect("entry for 412");
  assert!(item.contains("<title>App Detective 4.1.2</title>"));
  assert!(item.contains("<sparkle:shortVersionString>4.1.2</sparkle:shortVersionString>"));
  assert!(item.contains("<sparkle:minimumSystemVersion>14.0</sparkle:minimumSystemVersion>"));
  assert!(item.contains("AppDetective-412.zip"));

  Ok(())
}

#[test]
fn test_pub_date_format() -> Result<()> {
  let dirs = ReleaseDirs::new()?;
  dirs.add_artifact("1.0", 1)?;
  run_appcast_gen(&dirs.args("1.0", &[]), &[])?;

  let feed = dirs.read_appcast()?;
  let line = feed
    .lines()
    .find(|l| l.trim_start().starts_with("<pubDate>"))
    .expect("pubDate line");
  let value = line.trim().trim_start_matches("<pubDate>").trim_end_matches("</pubDate>");

  // e.g. "Fri, 16 Oct 2026 09:05:07 +0000"
  assert_eq!(value.len(), 31, "unexpected pubDate: {value}");
  assert_eq!(&value[3..5], ", ");
  assert!(value.ends_with(" +0000"));

  Ok(())
}

#[test]
fn test_dry_run_prints_feed_without_writing() -> Result<()> {
  let dirs = ReleaseDirs::new()?;
  dirs.add_artifact("5.0", 9)?;

  let output = run_appcast_gen(&dirs.args("5.0", &["--dry-run"]), &[])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("<sparkle:version>5.0</sparkle:version>"));
  assert!(stdout.contains("</rss>"));
  assert!(!dirs.appcast_path().exists());

  Ok(())
}

#[test]
fn test_json_summary() -> Result<()> {
  let dirs = ReleaseDirs::new()?;
  dirs.add_artifact("6.0", 77)?;

  let output = run_appcast_gen(&dirs.args("6.0", &["--json"]), &[("SIGNATURE", "c2ln")])?;
  let summary: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(summary["version"], "6.0");
  assert_eq!(summary["length"], 77);
  assert_eq!(summary["created_feed"], true);
  assert_eq!(summary["removed_entries"], 0);
  assert_eq!(summary["notes"]["kind"], "fallback");
  assert_eq!(summary["signatures"], serde_json::json!(["ed25519"]));
  assert!(dirs.appcast_path().exists());

  Ok(())
}

#[test]
fn test_product_profile_override() -> Result<()> {
  let dirs = ReleaseDirs::new()?;
  let profile = dirs.dist.join("profile.toml");
  std::fs::write(
    &profile,
    "product_name = \"Case Files\"\nartifact_stem = \"CaseFiles\"\nfeed_title = \"Case Files Updates\"\n",
  )?;
  std::fs::write(dirs.dist.join("CaseFiles-1.2.zip"), b"zip")?;

  let profile_arg = profile.display().to_string();
  run_appcast_gen(&dirs.args("1.2", &["--config", &profile_arg]), &[])?;
  run_appcast_gen(&dirs.args("1.2", &["--config", &profile_arg]), &[])?;

  let feed = dirs.read_appcast()?;
  assert!(feed.contains("<title>Case Files Updates</title>"));
  assert_eq!(items(&feed).len(), 1);
  let item = item_for(&feed, "1.2").expect("entry for 1.2");
  assert!(item.contains("<title>Case Files 1.2</title>"));
  assert!(item.contains("CaseFiles-1.2.zip"));
  assert!(item.contains("length=\"3\""));

  Ok(())
}
