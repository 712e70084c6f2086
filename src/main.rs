mod commands;
mod core;
mod i18n;
mod package;
mod release;
mod utils;

use clap::{Parser, Subcommand};
use core::error::{ReleaseError, ResultExt, print_error};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directives
const LOG_ENV: &str = "LEGEND_RELEASE_LOG";

/// Release tooling for the QGIS Legend View plugin
#[derive(Parser)]
#[command(name = "legend-release")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Plugin project directory (default: current directory)
  #[arg(long, global = true)]
  root: Option<PathBuf>,

  /// Configuration file (default: legend-release.toml in the project)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Log diagnostics at debug level unless LEGEND_RELEASE_LOG says otherwise
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Bump the patch version and build the plugin ZIP archive
  Pack {
    /// Show the packaging plan without changing anything
    #[arg(long)]
    dry_run: bool,
  },

  /// Validate a plugin ZIP archive before submission
  Validate {
    /// Path to the plugin ZIP file
    zip: Option<PathBuf>,
    /// Output the report in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Show, bump or retag the plugin version
  Version {
    /// show | major | minor | patch | alpha | beta | rc | stable
    command: Option<String>,
    /// Output `show` results in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Translation lookups and placeholder .qm generation
  #[command(subcommand)]
  I18n(I18nCommands),
}

#[derive(Subcommand)]
enum I18nCommands {
  /// Translate one message
  Translate {
    /// Translation context (e.g. LegendView)
    context: String,
    /// Source message
    message: String,
    /// Target locale (default: ja)
    #[arg(long)]
    locale: Option<String>,
  },

  /// List available locales
  Locales {
    /// Output locales in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Write placeholder .qm files and translations.py for every locale
  Compile {
    /// Output directory (default: i18n)
    #[arg(long)]
    out: Option<PathBuf>,
  },
}

fn get_styles() -> clap::builder::Styles {
  use anstyle::{AnsiColor, Color, Style};

  let yellow_header = Style::new()
    .bold()
    .underline()
    .fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
  let red = Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Red)));

  clap::builder::Styles::styled()
    .usage(yellow_header)
    .header(yellow_header)
    .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
    .invalid(red)
    .error(red)
    .valid(
      Style::new()
        .bold()
        .underline()
        .fg_color(Some(Color::Ansi(AnsiColor::Green))),
    )
    .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::White))))
}

fn init_logging(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

  // stdout carries reports (and JSON), diagnostics go to stderr
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let root = match cli.root {
    Some(root) => root,
    None => match std::env::current_dir().context("Failed to get current directory") {
      Ok(dir) => dir,
      Err(e) => handle_error(e),
    },
  };

  let ctx = match core::context::ProjectContext::build(&root, cli.config.as_deref()) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };
  tracing::debug!(root = %ctx.root.display(), "project context ready");

  let result = match cli.command {
    Commands::Pack { dry_run } => commands::run_pack(&ctx, dry_run),
    Commands::Validate { zip, json } => commands::run_validate(&ctx, zip, json),
    Commands::Version { command, json } => commands::run_version(&ctx, command, json),
    Commands::I18n(i18n_cmd) => match i18n_cmd {
      I18nCommands::Translate {
        context,
        message,
        locale,
      } => commands::run_i18n_translate(&context, &message, locale.as_deref()),
      I18nCommands::Locales { json } => commands::run_i18n_locales(json),
      I18nCommands::Compile { out } => commands::run_i18n_compile(&ctx, out),
    },
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ReleaseError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
