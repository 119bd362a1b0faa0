mod artifacts;
mod commands;
mod core;

use clap::Parser;
use crate::core::error::{SyncError, print_error};
use std::path::PathBuf;

/// Update version information from an upstream pikchr commit
///
/// Rewrites c/VERSION.h and the version constants in internal/pikchr.y so
/// both match the given commit of the sibling pikchr repository.
#[derive(Parser)]
#[command(name = "update-version")]
#[command(version, about, long_about)]
#[command(after_help = "Example: update-version 9c5ced3599")]
#[command(styles = get_styles())]
struct Cli {
  /// Upstream commit to take the version and date from
  commit: String,

  /// Override upstream repository path (default: ../pikchr)
  #[arg(long, value_name = "DIR")]
  upstream: Option<PathBuf>,

  /// Show the changes without writing any file
  #[arg(long)]
  dry_run: bool,

  /// Output a JSON report instead of progress messages
  #[arg(long)]
  json: bool,
}

fn get_styles() -> clap::builder::Styles {
  let heading = anstyle::Style::new()
    .bold()
    .underline()
    .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow)));

  clap::builder::Styles::styled()
    .usage(heading)
    .header(heading)
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
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Cyan))))
}

fn main() {
  let cli = Cli::parse();

  if let Err(err) = commands::run_update(cli.commit, cli.upstream, cli.dry_run, cli.json) {
    handle_error(err);
  }
}

fn handle_error(err: SyncError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
