//! Where the hunk list for a jump comes from

use anyhow::{bail, Context, Result};
use jumpline_core::{git, DiffEngine, Hunk};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MISSING_FILE: &str = "A file is required unless --hunks is given";

/// Highest line number accepted from a hunk file
const MAX_LINE: usize = 10_000_000;

/// Source of the original side of the diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HunkSource {
    /// The file as of a git revision
    Revision(String),
    /// The file as staged in the index
    Index,
    /// Another file on disk
    File(PathBuf),
    /// A precomputed hunk list in JSON
    HunkFile(PathBuf),
}

/// Hunks plus, when both texts were read, their line counts
#[derive(Debug, Clone)]
pub struct Loaded {
    pub hunks: Vec<Hunk>,
    pub lengths: Option<(usize, usize)>,
}

/// Diff information as editors report it: the hunks sit under `changes`
#[derive(Deserialize)]
struct DiffInformation {
    changes: Vec<Hunk>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HunkFile {
    Flat(Vec<Hunk>),
    Wrapped(Vec<DiffInformation>),
    Single(DiffInformation),
}

/// Parse a hunk list from JSON.
///
/// Accepts a plain array of hunks, an object with a `changes` array, or an
/// array of such objects (the first one is used).
pub fn parse_hunk_file(text: &str) -> Result<Vec<Hunk>> {
    let parsed: HunkFile = serde_json::from_str(text)
        .context("Expected an array of hunks or an object with a \"changes\" array")?;

    let hunks = match parsed {
        HunkFile::Flat(hunks) => hunks,
        HunkFile::Single(info) => info.changes,
        HunkFile::Wrapped(infos) => match infos.into_iter().next() {
            Some(info) => info.changes,
            None => Vec::new(),
        },
    };

    // The line map holds an entry per line up to the furthest bound
    if let Some(hunk) = hunks.iter().find(|h| {
        [h.original, h.modified]
            .iter()
            .any(|r| r.start > MAX_LINE || r.end_exclusive > MAX_LINE)
    }) {
        bail!("Hunk {} goes past line {}", hunk, MAX_LINE);
    }

    Ok(hunks)
}

fn line_count(text: &str) -> usize {
    text.lines().count()
}

impl HunkSource {
    /// Load hunks for `file`, the modified side
    pub fn load(&self, file: Option<&Path>, engine: &DiffEngine) -> Result<Loaded> {
        let original = match self {
            HunkSource::HunkFile(path) => return load_hunk_file(path),
            HunkSource::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read original file: {}", path.display()))?,
            HunkSource::Revision(rev) => {
                let file = file.context(MISSING_FILE)?;
                let (root, relative) = repo_paths(file)?;
                git::get_file_at_commit(&root, rev, &relative)
                    .with_context(|| format!("Failed to read {} at {}", file.display(), rev))?
            }
            HunkSource::Index => {
                let file = file.context(MISSING_FILE)?;
                let (root, relative) = repo_paths(file)?;
                git::get_staged_content(&root, &relative)
                    .with_context(|| format!("Failed to read staged {}", file.display()))?
            }
        };

        let file = file.context(MISSING_FILE)?;
        let modified = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read file: {}", file.display()))?;

        let hunks = engine.diff_strings(&original, &modified);
        Ok(Loaded {
            hunks,
            lengths: Some((line_count(&original), line_count(&modified))),
        })
    }
}

fn load_hunk_file(path: &Path) -> Result<Loaded> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read hunk file: {}", path.display()))?;
    let hunks = parse_hunk_file(&text)
        .with_context(|| format!("Failed to parse hunk file: {}", path.display()))?;
    log::debug!("Loaded {} hunks from {}", hunks.len(), path.display());
    Ok(Loaded {
        hunks,
        lengths: None,
    })
}

fn repo_paths(file: &Path) -> Result<(PathBuf, PathBuf)> {
    let dir = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !git::is_git_repo(dir) {
        bail!("{} is not inside a git repository", file.display());
    }
    let root = git::get_repo_root(dir)?;
    let relative = git::relative_to_repo(&root, file)?;
    Ok((root, relative))
}
