//! Line correspondence between the two sides of a diff

use crate::hunk::{validate_hunks, Hunk, HunkError, HunkKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SideError {
    #[error("Unknown diff side: {0:?} (expected \"original\" or \"modified\")")]
    Unknown(String),
}

/// Which text of a diff pair a line number belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The text before the edits (left pane)
    Original,
    /// The text after the edits (right pane)
    Modified,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Original => Side::Modified,
            Side::Modified => Side::Original,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Original => "original",
            Side::Modified => "modified",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = SideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "original" | "git" | "left" => Ok(Side::Original),
            "modified" | "file" | "right" => Ok(Side::Modified),
            _ => Err(SideError::Unknown(s.to_string())),
        }
    }
}

/// Result of looking a line up in a [`LineMap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "line", rename_all = "lowercase")]
pub enum Correspondence {
    /// The map holds an entry for the line
    Mapped(usize),
    /// No entry; the queried line is echoed back unchanged
    Unmapped(usize),
}

impl Correspondence {
    /// The corresponding line, whether mapped or echoed
    pub fn line(self) -> usize {
        match self {
            Correspondence::Mapped(line) | Correspondence::Unmapped(line) => line,
        }
    }

    pub fn is_mapped(self) -> bool {
        matches!(self, Correspondence::Mapped(_))
    }
}

/// Bidirectional line map derived from a hunk list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineMap {
    original_to_modified: BTreeMap<usize, usize>,
    modified_to_original: BTreeMap<usize, usize>,
}

impl LineMap {
    /// Build both directions of the map from `hunks`.
    ///
    /// The hunks need not be sorted. Overlapping hunks produce an unspecified
    /// mapping but never panic. Unchanged lines are only mapped up to the
    /// furthest hunk end; use [`LineMap::build_for_documents`] when the
    /// document lengths are known.
    pub fn build(hunks: &[Hunk]) -> Self {
        Self::build_with_tail(hunks, 0, 0)
    }

    /// Like [`LineMap::build`], but also maps the unchanged tail after the
    /// last hunk through the end of documents of the given lengths
    pub fn build_for_documents(
        hunks: &[Hunk],
        original_lines: usize,
        modified_lines: usize,
    ) -> Self {
        Self::build_with_tail(hunks, original_lines, modified_lines)
    }

    fn build_with_tail(hunks: &[Hunk], original_tail: usize, modified_tail: usize) -> Self {
        let mut sorted = hunks.to_vec();
        sorted.sort_by_key(|h| (h.original.start, h.modified.start));

        let mut map = Self::default();
        let mut original_line = 1usize;
        let mut modified_line = 1usize;

        for hunk in &sorted {
            map.align(
                &mut original_line,
                &mut modified_line,
                hunk.original.start,
                hunk.modified.start,
            );
            map.map_hunk(hunk);

            original_line = hunk.original.end_exclusive;
            modified_line = hunk.modified.end_exclusive;
        }

        // Trailing unchanged tail
        let max_original = sorted
            .iter()
            .map(|h| h.original.end_exclusive)
            .fold(original_line.max(original_tail), usize::max);
        let max_modified = sorted
            .iter()
            .map(|h| h.modified.end_exclusive)
            .fold(modified_line.max(modified_tail), usize::max);
        map.align(
            &mut original_line,
            &mut modified_line,
            max_original.saturating_add(1),
            max_modified.saturating_add(1),
        );

        map
    }

    /// Pair lines one to one while both cursors are below their limits
    fn align(
        &mut self,
        original_line: &mut usize,
        modified_line: &mut usize,
        original_limit: usize,
        modified_limit: usize,
    ) {
        while *original_line < original_limit && *modified_line < modified_limit {
            self.original_to_modified.insert(*original_line, *modified_line);
            self.modified_to_original.insert(*modified_line, *original_line);
            *original_line += 1;
            *modified_line += 1;
        }
    }

    fn map_hunk(&mut self, hunk: &Hunk) {
        let original = hunk.original;
        let modified = hunk.modified;

        match hunk.kind() {
            Some(HunkKind::Insertion) => {
                for line in modified.lines() {
                    self.modified_to_original.insert(line, original.start);
                }
            }
            Some(HunkKind::Deletion) => {
                for line in original.lines() {
                    self.original_to_modified.insert(line, modified.start);
                }
            }
            Some(HunkKind::Substitution) => {
                let (original_len, modified_len) = (original.len(), modified.len());
                for (i, line) in original.lines().enumerate() {
                    let offset = i.saturating_mul(modified_len) / original_len;
                    self.original_to_modified.insert(line, modified.start + offset);
                }
                for (j, line) in modified.lines().enumerate() {
                    let offset = j.saturating_mul(original_len) / modified_len;
                    self.modified_to_original.insert(line, original.start + offset);
                }
            }
            None => {}
        }
    }

    /// Look `line` on `side` up, without falling back
    pub fn get(&self, line: usize, side: Side) -> Option<usize> {
        self.table(side).get(&line).copied()
    }

    /// Look `line` on `side` up, echoing it back when there is no entry
    pub fn lookup(&self, line: usize, side: Side) -> Correspondence {
        match self.get(line, side) {
            Some(target) => Correspondence::Mapped(target),
            None => Correspondence::Unmapped(line),
        }
    }

    /// Every entry for lines on `side`, keyed by line
    pub fn table(&self, side: Side) -> &BTreeMap<usize, usize> {
        match side {
            Side::Original => &self.original_to_modified,
            Side::Modified => &self.modified_to_original,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.original_to_modified.is_empty() && self.modified_to_original.is_empty()
    }
}

/// Best corresponding line on the opposite side for `line` on `side`.
///
/// Lines without an entry, including those past the end of the mapped
/// region, are returned unchanged.
pub fn corresponding_line(line: usize, side: Side, hunks: &[Hunk]) -> usize {
    let result = LineMap::build(hunks).lookup(line, side);
    match result {
        Correspondence::Mapped(target) => {
            log::debug!(
                "Mapping {} line {} to {} line {}",
                side,
                line,
                side.opposite(),
                target
            );
        }
        Correspondence::Unmapped(_) => {
            log::debug!(
                "No mapping for {} line {}, keeping it on the {} side",
                side,
                line,
                side.opposite()
            );
        }
    }
    result.line()
}

/// Like [`corresponding_line`], but validates `hunks` first and reports
/// whether the result came from the map or the fallback
pub fn try_corresponding_line(
    line: usize,
    side: Side,
    hunks: &[Hunk],
) -> Result<Correspondence, HunkError> {
    validate_hunks(hunks)?;
    Ok(LineMap::build(hunks).lookup(line, side))
}
