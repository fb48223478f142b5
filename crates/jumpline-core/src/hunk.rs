//! Hunk representation for line correspondence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HunkError {
    #[error("Hunk {0} has two empty ranges")]
    Empty(Hunk),
    #[error("Invalid line range {0}: lines are 1-based and end must not precede start")]
    InvalidRange(LineRange),
    #[error("Hunks {0} and {1} overlap")]
    Overlap(Hunk, Hunk),
}

/// A 1-based, half-open range of lines `[start, end_exclusive)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRange {
    /// First line in the range
    #[serde(alias = "startLineNumber")]
    pub start: usize,
    /// One past the last line in the range
    #[serde(
        rename = "end",
        alias = "endLineNumberExclusive",
        alias = "end_exclusive"
    )]
    pub end_exclusive: usize,
}

impl LineRange {
    pub fn new(start: usize, end_exclusive: usize) -> Self {
        Self {
            start,
            end_exclusive,
        }
    }

    /// An empty range anchored at `line`
    pub fn empty_at(line: usize) -> Self {
        Self::new(line, line)
    }

    /// Number of lines in the range. Inverted ranges count as empty.
    pub fn len(&self) -> usize {
        self.end_exclusive.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, line: usize) -> bool {
        self.start <= line && line < self.end_exclusive
    }

    /// Lines in the range, in ascending order
    pub fn lines(&self) -> Range<usize> {
        self.start..self.end_exclusive.max(self.start)
    }

    fn validate(&self) -> Result<(), HunkError> {
        if self.start == 0 || self.end_exclusive < self.start {
            return Err(HunkError::InvalidRange(*self));
        }
        Ok(())
    }
}

impl From<Range<usize>> for LineRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{})", self.start, self.end_exclusive)
    }
}

/// How a hunk rewrites its original range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HunkKind {
    /// Lines were added; the original range is empty
    Insertion,
    /// Lines were removed; the modified range is empty
    Deletion,
    /// Lines were replaced, possibly by a block of different size
    Substitution,
}

/// One contiguous edit between the original and the modified text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hunk {
    /// Affected lines in the original text
    pub original: LineRange,
    /// Affected lines in the modified text
    pub modified: LineRange,
}

impl Hunk {
    /// Create a hunk, rejecting malformed ranges and hunks that change nothing
    pub fn new(
        original: impl Into<LineRange>,
        modified: impl Into<LineRange>,
    ) -> Result<Self, HunkError> {
        let hunk = Self {
            original: original.into(),
            modified: modified.into(),
        };
        hunk.validate()?;
        Ok(hunk)
    }

    /// Lines `modified` were inserted before original line `at`
    pub fn insertion(at: usize, modified: impl Into<LineRange>) -> Result<Self, HunkError> {
        Self::new(LineRange::empty_at(at), modified)
    }

    /// Lines `original` were removed; the gap sits before modified line `at`
    pub fn deletion(original: impl Into<LineRange>, at: usize) -> Result<Self, HunkError> {
        Self::new(original, LineRange::empty_at(at))
    }

    /// Classify the hunk. Returns `None` when both ranges are empty.
    pub fn kind(&self) -> Option<HunkKind> {
        match (self.original.is_empty(), self.modified.is_empty()) {
            (true, false) => Some(HunkKind::Insertion),
            (false, true) => Some(HunkKind::Deletion),
            (false, false) => Some(HunkKind::Substitution),
            (true, true) => None,
        }
    }

    pub fn validate(&self) -> Result<(), HunkError> {
        self.original.validate()?;
        self.modified.validate()?;
        if self.kind().is_none() {
            return Err(HunkError::Empty(*self));
        }
        Ok(())
    }
}

impl fmt::Display for Hunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.original, self.modified)
    }
}

/// Check a hunk list before building a line map from it.
///
/// Every hunk must be well formed, and once ordered by original start no
/// hunk may begin before the previous one ends on either side.
pub fn validate_hunks(hunks: &[Hunk]) -> Result<(), HunkError> {
    for hunk in hunks {
        if let Err(err) = hunk.validate() {
            log::warn!("Rejecting hunk list: {}", err);
            return Err(err);
        }
    }

    let mut sorted = hunks.to_vec();
    sorted.sort_by_key(|h| (h.original.start, h.modified.start));

    for pair in sorted.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if next.original.start < prev.original.end_exclusive
            || next.modified.start < prev.modified.end_exclusive
        {
            log::warn!("Rejecting hunk list: {} overlaps {}", prev, next);
            return Err(HunkError::Overlap(prev, next));
        }
    }

    Ok(())
}
