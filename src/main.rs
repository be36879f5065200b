mod appcast;
mod commands;
mod core;
mod utils;

use clap::{ArgAction, Parser};
use crate::core::config::{ProductProfile, ReleaseEnv};
use crate::core::error::{AppcastError, AppcastResult, print_error};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Generate or update Sparkle appcast entries
///
/// Environment overrides: SHORT_VERSION, MIN_SYSTEM_VERSION.
/// Enclosure signatures: SIGNATURE (sparkle:edSignature), SIGNATURE31 (sparkle:edSignature31).
#[derive(Parser)]
#[command(name = "appcast-gen")]
#[command(disable_version_flag = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Version identifier (sparkle:version)
  #[arg(long)]
  version: String,

  /// Directory containing the packaged zip
  #[arg(long)]
  dist_dir: PathBuf,

  /// Directory containing the appcast.xml
  #[arg(long)]
  update_dir: PathBuf,

  /// Base URL where the zip will be hosted
  #[arg(long)]
  download_base: String,

  /// Minimum macOS version supported
  #[arg(long)]
  min_system_version: String,

  /// Optional release notes file (Markdown/HTML)
  #[arg(long, default_value = "")]
  notes_file: String,

  /// Product profile overriding the built-in names (TOML)
  #[arg(long)]
  config: Option<PathBuf>,

  /// Print the updated feed instead of writing it
  #[arg(long)]
  dry_run: bool,

  /// Print a JSON summary instead of the confirmation line
  #[arg(long)]
  json: bool,

  /// Log more (-v info, -vv debug); RUST_LOG takes precedence
  #[arg(short, long, action = ArgAction::Count)]
  verbose: u8,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// Logs go to stderr so `--json` and `--dry-run` output stays clean
fn init_logging(verbose: u8) {
  let default_level = match verbose {
    0 => "warn",
    1 => "info",
    _ => "debug",
  };

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn run(cli: Cli) -> AppcastResult<()> {
  let profile = match &cli.config {
    Some(path) => ProductProfile::load(path)?,
    None => ProductProfile::default(),
  };
  let env = ReleaseEnv::from_env();

  let opts = commands::GenerateOptions {
    version: cli.version,
    dist_dir: cli.dist_dir,
    update_dir: cli.update_dir,
    download_base: cli.download_base,
    min_system_version: cli.min_system_version,
    notes_file: cli.notes_file,
    dry_run: cli.dry_run,
    json: cli.json,
  };

  commands::run_generate(opts, env, profile)
}

fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  if let Err(err) = run(cli) {
    handle_error(err);
  }
}

fn handle_error(err: AppcastError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
