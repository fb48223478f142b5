//! Jumpline CLI - jump to the same line on the other side of a diff.
//!
//! # Usage
//!
//! ```bash
//! # Working-tree line 42 -> line in HEAD
//! jumpline src/lib.rs --line 42
//!
//! # HEAD line 42 -> working-tree line
//! jumpline src/lib.rs --line 42 --side original
//!
//! # Compare two files, or use a hunk list from an editor
//! jumpline new.txt --original old.txt --line 7 --json
//! jumpline --hunks diff.json --line 7 --side modified
//! ```

mod config;
mod output;
mod source;

use anyhow::{Context, Result};
use clap::Parser;
use jumpline_core::{jump_with_map, validate_hunks, DiffEngine, Direction, LineMap, Side};
use source::HunkSource;
use std::path::PathBuf;

/// Find the corresponding line on the other side of a diff.
///
/// By default the file on disk is the modified side and its copy at HEAD is
/// the original side.
#[derive(Parser, Debug)]
#[command(name = "jumpline", version, about)]
struct Cli {
    /// File on disk (the modified side)
    #[arg(required_unless_present = "hunks")]
    file: Option<PathBuf>,

    /// 1-based line the cursor is on
    #[arg(short, long, value_parser = parse_line)]
    line: usize,

    /// Side the line belongs to: original or modified
    #[arg(short, long, default_value = "modified")]
    side: Side,

    /// Pane to jump to: left (original), right (modified) or auto
    #[arg(short, long)]
    direction: Option<Direction>,

    /// Git revision to use as the original side
    #[arg(long, conflicts_with_all = ["staged", "original", "hunks"])]
    against: Option<String>,

    /// Use the staged copy as the original side
    #[arg(long, conflicts_with_all = ["original", "hunks"])]
    staged: bool,

    /// File to use as the original side
    #[arg(long, conflicts_with = "hunks")]
    original: Option<PathBuf>,

    /// JSON hunk list to use instead of computing a diff
    #[arg(long)]
    hunks: Option<PathBuf>,

    /// Output the result as JSON
    #[arg(long)]
    json: bool,

    /// Config file (default: platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_line(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("line numbers start at 1".to_string()),
        Ok(line) => Ok(line),
        Err(e) => Err(e.to_string()),
    }
}

impl Cli {
    /// Pick the hunk source; flags win over the config file
    fn hunk_source(&self, config: &config::Config) -> HunkSource {
        if let Some(path) = &self.hunks {
            return HunkSource::HunkFile(path.clone());
        }
        if let Some(path) = &self.original {
            return HunkSource::File(path.clone());
        }
        if let Some(rev) = &self.against {
            return HunkSource::Revision(rev.clone());
        }
        if self.staged || config.staged {
            return HunkSource::Index;
        }
        HunkSource::Revision(config.base.clone())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = config::load(cli.config.as_deref())?;
    let direction = cli.direction.unwrap_or(config.direction);
    let source = cli.hunk_source(&config);
    log::debug!("Using hunk source {:?}", source);

    let loaded = source.load(cli.file.as_deref(), &DiffEngine::new())?;
    validate_hunks(&loaded.hunks).context("Hunk list is malformed")?;

    let map = match loaded.lengths {
        Some((original, modified)) => {
            LineMap::build_for_documents(&loaded.hunks, original, modified)
        }
        None => LineMap::build(&loaded.hunks),
    };

    match jump_with_map(cli.line, cli.side, direction, &map) {
        Some(outcome) => {
            let output = if cli.json {
                output::format_json(&outcome)
            } else {
                output::format_human(&outcome)
            };
            println!("{}", output);
        }
        None => {
            eprintln!(
                "Already in the {} pane, nothing to jump to ({} jump)",
                cli.side, direction
            );
        }
    }

    Ok(())
}
