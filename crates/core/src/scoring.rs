//! Scoring module - line clear awards, combos, level progression and gravity
//!
//! All awards scale with the current level:
//!
//! | Lines | Award |
//! |-------|-------|
//! | 1 | 100 x level |
//! | 2 | 300 x level |
//! | 3 | 500 x level |
//! | 4 | 800 x level |
//!
//! A combo index of 1 or more adds `50 x combo x level` on top.

/// Base line-clear points per number of lines (index = lines)
pub const LINE_SCORES: [u64; 5] = [0, 100, 300, 500, 800];

/// Combo bonus base
pub const COMBO_BASE: u64 = 50;

/// Points per row descended while soft dropping
pub const SOFT_DROP_POINTS: u64 = 1;

/// Points per row descended by a hard drop
pub const HARD_DROP_POINTS: u64 = 2;

/// Gravity intervals in frames at 60 steps per second, indexed by level
const WAIT_FRAMES: [u8; 21] = [
    36, 32, 29, 25, 22, 18, 15, 11, 7, 5, // levels 0-9
    4, 4, 4, // 10-12
    3, 3, 3, // 13-15
    2, 2, 2, // 16-18
    1, 1, // 19-20
];

/// Interval used for any level past the table
pub const FALLBACK_WAIT_SECS: f32 = 0.01;

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points for the lines themselves.
    pub line_clear_score: u64,
    /// Combo bonus added on top of `line_clear_score`.
    pub combo_bonus: u64,
    pub total: u64,
}

/// Calculate line clear score
/// lines: number of lines cleared (1-4)
/// level: current level (1-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u64 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    LINE_SCORES[lines] * u64::from(level)
}

/// Calculate combo bonus.
///
/// `combo` is the chain index after this clear:
/// - `-1`: no combo chain
/// - `0`: first clear in chain (no bonus)
/// - `1+`: bonus applies as `50 * combo * level`
pub fn calculate_combo_bonus(combo: i32, level: u32) -> u64 {
    if combo <= 0 {
        return 0;
    }
    COMBO_BASE * combo as u64 * u64::from(level)
}

/// Calculate the complete award for one lock that cleared `lines` lines.
///
/// `combo` is the chain index *after* it was advanced for this lock.
pub fn calculate_score(lines: usize, level: u32, combo: i32) -> ScoreResult {
    let line_clear_score = calculate_line_score(lines, level);
    let combo_bonus = if lines > 0 {
        calculate_combo_bonus(combo, level)
    } else {
        0
    };

    ScoreResult {
        line_clear_score,
        combo_bonus,
        total: line_clear_score + combo_bonus,
    }
}

/// Lines granted for the level just reached
pub fn lines_for_level(level: u32) -> i32 {
    match level {
        0..=9 => level as i32 * 10,
        10..=15 => 100,
        _ => 100 + (level as i32 - 15) * 10,
    }
}

/// Apply `lines` cleared lines to the level countdown.
///
/// Returns the new `(level, lines_needed)`. A level-up keeps any deficit:
/// the replenished amount is added to the (possibly negative) remainder.
/// No level-up happens once `level` has reached `max_level`.
pub fn advance_level(level: u32, lines_needed: i32, lines: usize, max_level: u32) -> (u32, i32) {
    let lines_needed = lines_needed - lines as i32;
    if lines_needed <= 0 && level < max_level {
        let level = level + 1;
        (level, lines_needed + lines_for_level(level))
    } else {
        (level, lines_needed)
    }
}

/// Seconds between forced drops at `level`
///
/// ```
/// use tetros_core::scoring::wait_time;
///
/// assert_eq!(wait_time(0), 36.0 / 60.0);
/// assert_eq!(wait_time(20), 1.0 / 60.0);
/// assert_eq!(wait_time(21), 0.01);
/// ```
pub fn wait_time(level: u32) -> f32 {
    WAIT_FRAMES
        .get(level as usize)
        .map_or(FALLBACK_WAIT_SECS, |&frames| f32::from(frames) / 60.0)
}

/// Gravity interval while soft dropping
pub fn soft_drop_interval(level: u32, cap: f32) -> f32 {
    cap.min(wait_time(level) / 4.0)
}

/// Pitch of the line-clear cue; rises with the combo chain before this clear
pub fn line_clear_pitch(combo_before: i32) -> f32 {
    1.0 + combo_before.max(0) as f32 / 12.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MAX_LEVEL;

    #[test]
    fn test_line_scores() {
        assert_eq!(calculate_line_score(0, 1), 0);
        assert_eq!(calculate_line_score(1, 1), 100);
        assert_eq!(calculate_line_score(2, 1), 300);
        assert_eq!(calculate_line_score(3, 1), 500);
        assert_eq!(calculate_line_score(4, 1), 800);
        assert_eq!(calculate_line_score(4, 5), 4000);
        assert_eq!(calculate_line_score(5, 1), 0);
    }

    #[test]
    fn test_combo_bonus() {
        assert_eq!(calculate_combo_bonus(-1, 3), 0);
        assert_eq!(calculate_combo_bonus(0, 3), 0);
        assert_eq!(calculate_combo_bonus(1, 1), 50);
        assert_eq!(calculate_combo_bonus(3, 3), 450);
    }

    #[test]
    fn test_first_clear_has_no_bonus() {
        let result = calculate_score(1, 1, 0);
        assert_eq!(result.line_clear_score, 100);
        assert_eq!(result.combo_bonus, 0);
        assert_eq!(result.total, 100);
    }

    #[test]
    fn test_tetris_inside_combo() {
        let result = calculate_score(4, 3, 3);
        assert_eq!(result.line_clear_score, 2400);
        assert_eq!(result.combo_bonus, 450);
        assert_eq!(result.total, 2850);
    }

    #[test]
    fn test_lines_for_level_bands() {
        assert_eq!(lines_for_level(2), 20);
        assert_eq!(lines_for_level(9), 90);
        assert_eq!(lines_for_level(10), 100);
        assert_eq!(lines_for_level(15), 100);
        assert_eq!(lines_for_level(16), 110);
        assert_eq!(lines_for_level(20), 150);
    }

    #[test]
    fn test_advance_level_keeps_deficit() {
        assert_eq!(advance_level(9, 1, 2, MAX_LEVEL), (10, 99));
        assert_eq!(advance_level(1, 10, 3, MAX_LEVEL), (1, 7));
        assert_eq!(advance_level(1, 1, 1, MAX_LEVEL), (2, 20));
    }

    #[test]
    fn test_advance_level_stops_at_cap() {
        assert_eq!(advance_level(20, 2, 4, MAX_LEVEL), (20, -2));
        assert_eq!(advance_level(19, 1, 1, MAX_LEVEL), (20, 150));
    }

    #[test]
    fn test_wait_time_curve() {
        assert_eq!(wait_time(1), 32.0 / 60.0);
        assert_eq!(wait_time(9), 5.0 / 60.0);
        assert_eq!(wait_time(11), 4.0 / 60.0);
        assert_eq!(wait_time(14), 3.0 / 60.0);
        assert_eq!(wait_time(18), 2.0 / 60.0);
        assert_eq!(wait_time(19), 1.0 / 60.0);
        assert_eq!(wait_time(99), FALLBACK_WAIT_SECS);

        for level in 1..=20 {
            assert!(wait_time(level) <= wait_time(level - 1));
        }
    }

    #[test]
    fn test_soft_drop_interval_is_capped() {
        assert_eq!(soft_drop_interval(1, 0.04), 0.04);
        assert_eq!(soft_drop_interval(9, 0.04), (5.0 / 60.0) / 4.0);
    }

    #[test]
    fn test_line_clear_pitch() {
        assert_eq!(line_clear_pitch(-1), 1.0);
        assert_eq!(line_clear_pitch(0), 1.0);
        assert_eq!(line_clear_pitch(6), 1.5);
    }
}
