//! Hunk extraction from two texts

use crate::hunk::{Hunk, LineRange};
use similar::{Algorithm, DiffTag, TextDiff};
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),
}

/// Hunks between two files on disk
#[derive(Debug, Clone)]
pub struct FileDiff {
    pub original_path: Option<String>,
    pub modified_path: Option<String>,
    pub hunks: Vec<Hunk>,
}

/// The main diff engine
pub struct DiffEngine {
    /// Line diff algorithm
    algorithm: Algorithm,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Myers,
        }
    }
}

impl DiffEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Compute the hunks turning `original` into `modified`.
    ///
    /// Consecutive non-equal operations are merged, so a deletion directly
    /// followed by an insertion becomes a single substitution hunk.
    pub fn diff_strings(&self, original: &str, modified: &str) -> Vec<Hunk> {
        let text_diff = TextDiff::configure()
            .algorithm(self.algorithm)
            .diff_lines(original, modified);

        let mut hunks = Vec::new();
        // 0-based positions, advanced by each op's length
        let mut old_line = 0usize;
        let mut new_line = 0usize;
        // Where the hunk being accumulated started
        let mut pending: Option<(usize, usize)> = None;

        for op in text_diff.ops() {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            if tag == DiffTag::Equal {
                if let Some((old_start, new_start)) = pending.take() {
                    hunks.push(Self::to_hunk(old_start..old_line, new_start..new_line));
                }
            } else if pending.is_none() {
                pending = Some((old_line, new_line));
            }

            old_line += old_range.len();
            new_line += new_range.len();
        }

        if let Some((old_start, new_start)) = pending {
            hunks.push(Self::to_hunk(old_start..old_line, new_start..new_line));
        }

        log::debug!("Computed {} hunks", hunks.len());
        hunks
    }

    fn to_hunk(old: Range<usize>, new: Range<usize>) -> Hunk {
        Hunk {
            original: LineRange::new(old.start + 1, old.end + 1),
            modified: LineRange::new(new.start + 1, new.end + 1),
        }
    }

    /// Compute hunks between two files
    pub fn diff_files(
        &self,
        original_path: &Path,
        modified_path: &Path,
    ) -> Result<FileDiff, DiffError> {
        let original = std::fs::read_to_string(original_path)?;
        let modified = std::fs::read_to_string(modified_path)?;

        let hunks = self.diff_strings(&original, &modified);

        Ok(FileDiff {
            original_path: Some(original_path.to_string_lossy().to_string()),
            modified_path: Some(modified_path.to_string_lossy().to_string()),
            hunks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correspond::{LineMap, Side};
    use crate::hunk::{validate_hunks, HunkKind};

    fn lines(items: &[&str]) -> String {
        items.iter().map(|l| format!("{}\n", l)).collect()
    }

    #[test]
    fn test_no_changes() {
        let engine = DiffEngine::new();
        let text = "foo\nbar\nbaz\n";

        assert!(engine.diff_strings(text, text).is_empty());
    }

    #[test]
    fn test_replaced_line_is_substitution() {
        let engine = DiffEngine::new();
        let hunks = engine.diff_strings("foo\nbar\nbaz\n", "foo\nqux\nbaz\n");

        assert_eq!(hunks, vec![Hunk::new(2..3, 2..3).unwrap()]);
        assert_eq!(hunks[0].kind(), Some(HunkKind::Substitution));
    }

    #[test]
    fn test_inserted_lines() {
        let engine = DiffEngine::new();
        let hunks = engine.diff_strings("a\nb\nc\n", "a\nb\nx\ny\nc\n");

        assert_eq!(hunks, vec![Hunk::insertion(3, 3..5).unwrap()]);
    }

    #[test]
    fn test_deleted_lines() {
        let engine = DiffEngine::new();
        let hunks = engine.diff_strings("a\nb\nc\nd\n", "a\nd\n");

        assert_eq!(hunks, vec![Hunk::deletion(2..4, 2).unwrap()]);
    }

    #[test]
    fn test_uneven_replacement_merges_into_one_hunk() {
        let engine = DiffEngine::new();
        let hunks = engine.diff_strings("a\nb\nc\nz\n", "a\nx\ny\nv\nw\nz\n");

        assert_eq!(hunks, vec![Hunk::new(2..4, 2..6).unwrap()]);
    }

    #[test]
    fn test_deletion_after_long_insertion_starts_at_real_position() {
        let original = lines(&["a", "a", "a", "b", "c", "a", "c", "c", "c"]);
        let modified = lines(&[
            "a", "a", "b", "a", "a", "a", "a", "a", "a", "a", "c", "b", "a", "c", "c",
        ]);

        let hunks = DiffEngine::new().diff_strings(&original, &modified);

        assert_eq!(
            hunks,
            vec![
                Hunk::insertion(3, 3..9).unwrap(),
                Hunk::deletion(4..6, 10).unwrap(),
                Hunk::insertion(8, 12..14).unwrap(),
            ]
        );
    }

    #[test]
    fn test_unchanged_lines_map_to_equal_text() {
        let original_lines = ["a", "a", "a", "b", "c", "a", "c", "c", "c"];
        let modified_lines = [
            "a", "a", "b", "a", "a", "a", "a", "a", "a", "a", "c", "b", "a", "c", "c",
        ];
        let hunks =
            DiffEngine::new().diff_strings(&lines(&original_lines), &lines(&modified_lines));
        let map = LineMap::build_for_documents(&hunks, original_lines.len(), modified_lines.len());

        for (i, text) in original_lines.iter().enumerate() {
            let line = i + 1;
            if hunks.iter().any(|h| h.original.contains(line)) {
                continue;
            }
            let target = map.get(line, Side::Original).unwrap();
            assert_eq!(modified_lines[target - 1], *text, "original line {}", line);
        }
    }

    #[test]
    fn test_diff_files() {
        let dir = std::env::temp_dir().join("jumpline-diff-files");
        std::fs::create_dir_all(&dir).unwrap();
        let original = dir.join("before.txt");
        let modified = dir.join("after.txt");
        std::fs::write(&original, "keep\ndrop\nkeep too\n").unwrap();
        std::fs::write(&modified, "keep\nkeep too\n").unwrap();

        let diff = DiffEngine::new().diff_files(&original, &modified).unwrap();

        assert_eq!(diff.hunks, vec![Hunk::deletion(2..3, 2).unwrap()]);
        assert!(diff.original_path.unwrap().ends_with("before.txt"));
    }

    #[test]
    fn test_diff_files_missing() {
        let missing = std::env::temp_dir().join("jumpline-does-not-exist.txt");
        let result = DiffEngine::new().diff_files(&missing, &missing);
        assert!(matches!(result, Err(DiffError::FileRead(_))));
    }

    #[test]
    fn test_multiple_hunks_are_valid() {
        let engine = DiffEngine::new().with_algorithm(Algorithm::Patience);
        let original = "fn a() {}\n\nfn b() {}\n\nfn c() {}\n";
        let modified = "fn a() {}\nfn a2() {}\n\nfn c() {}\n// end\n";

        let hunks = engine.diff_strings(original, modified);

        assert!(hunks.len() >= 2);
        assert!(validate_hunks(&hunks).is_ok());
    }
}
