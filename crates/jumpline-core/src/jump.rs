//! Jump planning between the two panes of a diff view

use crate::correspond::{Correspondence, LineMap, Side};
use crate::hunk::Hunk;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectionError {
    #[error("Unknown jump direction: {0:?} (expected \"left\", \"right\" or \"auto\")")]
    Unknown(String),
}

/// Which pane a jump should land in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Land in the original pane
    Left,
    /// Land in the modified pane
    Right,
    /// Land in whichever pane the cursor is not in
    #[default]
    Auto,
}

impl Direction {
    /// The side a jump from `current` lands on
    pub fn target(self, current: Side) -> Side {
        match self {
            Direction::Left => Side::Original,
            Direction::Right => Side::Modified,
            Direction::Auto => current.opposite(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Auto => "auto",
        })
    }
}

impl FromStr for Direction {
    type Err = DirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "auto" => Ok(Direction::Auto),
            _ => Err(DirectionError::Unknown(s.to_string())),
        }
    }
}

/// The sides involved in a jump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpPlan {
    pub from: Side,
    pub to: Side,
}

/// Decide which side to query for a jump from `current`.
///
/// Returns `None` when the cursor already sits in the target pane.
pub fn plan_jump(current: Side, direction: Direction) -> Option<JumpPlan> {
    let to = direction.target(current);
    if to == current {
        log::debug!("Skipping {} jump - already in the {} pane", direction, current);
        return None;
    }
    Some(JumpPlan { from: current, to })
}

/// A resolved jump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpOutcome {
    /// Side the cursor starts on
    pub from: Side,
    /// Side the cursor lands on
    pub to: Side,
    /// 1-based line on the starting side
    pub line: usize,
    /// 1-based line on the landing side
    pub target: Correspondence,
}

impl JumpOutcome {
    /// 1-based landing line
    pub fn target_line(&self) -> usize {
        self.target.line()
    }

    /// Landing line for hosts that address lines from zero
    pub fn target_zero_based(&self) -> usize {
        to_zero_based(self.target_line())
    }
}

pub fn to_zero_based(line: usize) -> usize {
    line.saturating_sub(1)
}

/// Jump from `line` on `current` in `direction`, or `None` if no jump is needed
pub fn jump(
    line: usize,
    current: Side,
    direction: Direction,
    hunks: &[Hunk],
) -> Option<JumpOutcome> {
    jump_with_map(line, current, direction, &LineMap::build(hunks))
}

/// Jump using a prebuilt map, e.g. one from [`LineMap::build_for_documents`]
pub fn jump_with_map(
    line: usize,
    current: Side,
    direction: Direction,
    map: &LineMap,
) -> Option<JumpOutcome> {
    let plan = plan_jump(current, direction)?;
    let target = map.lookup(line, plan.from);
    log::debug!(
        "Jumping from {} line {} to {} line {}",
        plan.from,
        line,
        plan.to,
        target.line()
    );

    Some(JumpOutcome {
        from: plan.from,
        to: plan.to,
        line,
        target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_targets_opposite_pane() {
        assert_eq!(
            plan_jump(Side::Original, Direction::Auto),
            Some(JumpPlan {
                from: Side::Original,
                to: Side::Modified
            })
        );
        assert_eq!(
            plan_jump(Side::Modified, Direction::Auto),
            Some(JumpPlan {
                from: Side::Modified,
                to: Side::Original
            })
        );
    }

    #[test]
    fn test_jump_into_current_pane_is_skipped() {
        assert_eq!(plan_jump(Side::Original, Direction::Left), None);
        assert_eq!(plan_jump(Side::Modified, Direction::Right), None);
        assert!(plan_jump(Side::Modified, Direction::Left).is_some());
    }

    #[test]
    fn test_jump_left_queries_modified_side() {
        let hunks = [Hunk::insertion(5, 5..8).unwrap()];
        let outcome = jump(7, Side::Modified, Direction::Left, &hunks).unwrap();

        assert_eq!(outcome.from, Side::Modified);
        assert_eq!(outcome.to, Side::Original);
        assert_eq!(outcome.target, Correspondence::Mapped(5));
        assert_eq!(outcome.target_zero_based(), 4);
    }

    #[test]
    fn test_jump_reports_fallback() {
        let outcome = jump(120, Side::Original, Direction::Auto, &[]).unwrap();
        assert_eq!(outcome.target, Correspondence::Unmapped(120));
        assert_eq!(outcome.target_line(), 120);
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("LEFT".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(" auto ".parse::<Direction>(), Ok(Direction::Auto));
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn test_to_zero_based_saturates() {
        assert_eq!(to_zero_based(1), 0);
        assert_eq!(to_zero_based(0), 0);
    }
}
