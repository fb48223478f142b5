//! Jumpline Core - Line correspondence across the two sides of a diff
//!
//! This library maps a line in the original text of a diff to the best
//! matching line in the modified text and back, given the hunks that
//! describe the edit.

pub mod correspond;
pub mod diff;
pub mod git;
pub mod hunk;
pub mod jump;

pub use correspond::{
    corresponding_line, try_corresponding_line, Correspondence, LineMap, Side, SideError,
};
pub use diff::{DiffEngine, DiffError, FileDiff};
pub use git::GitError;
pub use hunk::{validate_hunks, Hunk, HunkError, HunkKind, LineRange};
pub use jump::{
    jump, jump_with_map, plan_jump, to_zero_based, Direction, DirectionError, JumpOutcome,
    JumpPlan,
};
