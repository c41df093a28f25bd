//! Scoring module - classic line-clear table and the linear level curve

use thiserror::Error;

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Most rows a single lock can complete (the I piece height)
pub const MAX_LINES_PER_CLEAR: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("cannot clear {0} lines at once (max {MAX_LINES_PER_CLEAR})")]
    TooManyLines(usize),
}

/// Points for clearing `lines` rows at `level` (0-based)
pub fn try_line_clear_score(lines: usize, level: u32) -> Result<u32, ScoreError> {
    let base = LINE_SCORES
        .get(lines)
        .copied()
        .ok_or(ScoreError::TooManyLines(lines))?;
    Ok(base.saturating_mul(level.saturating_add(1)))
}

/// Points for clearing `lines` rows at `level` (0-based)
///
/// `[0, 40, 100, 300, 1200][lines] * (level + 1)`
///
/// # Panics
///
/// Panics if `lines > 4`. The reducer never completes more than four rows
/// in one lock, so a larger count is a logic error.
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    match try_line_clear_score(lines, level) {
        Ok(points) => points,
        Err(err) => panic!("{err}"),
    }
}

/// Level reached after `total_lines` cleared rows
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Gravity interval for `level`: `max(100, 1000 - level * 100)` milliseconds
pub fn drop_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub(level.saturating_mul(DROP_STEP_MS))
        .max(DROP_INTERVAL_MIN_MS)
}
