//! Scoring, level progression and gravity curve tests

use tetros::core::scoring::{
    advance_level, calculate_score, line_clear_pitch, lines_for_level, soft_drop_interval,
    wait_time,
};
use tetros::types::{MAX_LEVEL, SOFT_DROP_INTERVAL_CAP_SECS};

#[test]
fn test_single_line_first_in_chain() {
    // combo was -1 and becomes 0: no bonus
    let result = calculate_score(1, 1, 0);
    assert_eq!(result.line_clear_score, 100);
    assert_eq!(result.combo_bonus, 0);
    assert_eq!(result.total, 100);
}

#[test]
fn test_four_lines_at_level_three_with_chain() {
    let result = calculate_score(4, 3, 3);
    assert_eq!(result.line_clear_score, 2400);
    assert_eq!(result.combo_bonus, 450);
    assert_eq!(result.total, 2850);
}

#[test]
fn test_line_awards_scale_with_level() {
    for level in 1..=MAX_LEVEL {
        let l = u64::from(level);
        assert_eq!(calculate_score(1, level, 0).total, 100 * l);
        assert_eq!(calculate_score(2, level, 0).total, 300 * l);
        assert_eq!(calculate_score(3, level, 0).total, 500 * l);
        assert_eq!(calculate_score(4, level, 0).total, 800 * l);
    }
}

#[test]
fn test_no_lines_no_award() {
    assert_eq!(calculate_score(0, 5, 3).total, 0);
}

#[test]
fn test_level_up_from_nine() {
    assert_eq!(advance_level(9, 1, 2, MAX_LEVEL), (10, 99));
}

#[test]
fn test_replenish_bands() {
    assert_eq!(lines_for_level(2), 20);
    assert_eq!(lines_for_level(9), 90);
    assert_eq!(lines_for_level(10), 100);
    assert_eq!(lines_for_level(15), 100);
    assert_eq!(lines_for_level(16), 110);
    assert_eq!(lines_for_level(20), 150);
}

#[test]
fn test_level_capped() {
    assert_eq!(advance_level(MAX_LEVEL, 1, 4, MAX_LEVEL), (MAX_LEVEL, -3));
    assert_eq!(advance_level(5, 1, 1, 5), (5, 0));
}

#[test]
fn test_gravity_curve() {
    assert_eq!(wait_time(0), 36.0 / 60.0);
    assert_eq!(wait_time(1), 32.0 / 60.0);
    assert_eq!(wait_time(9), 5.0 / 60.0);
    for level in 10..=12 {
        assert_eq!(wait_time(level), 4.0 / 60.0);
    }
    for level in 13..=15 {
        assert_eq!(wait_time(level), 3.0 / 60.0);
    }
    for level in 16..=18 {
        assert_eq!(wait_time(level), 2.0 / 60.0);
    }
    assert_eq!(wait_time(19), 1.0 / 60.0);
    assert_eq!(wait_time(20), 1.0 / 60.0);
    assert_eq!(wait_time(99), 0.01);

    for level in 0..20 {
        assert!(wait_time(level) >= wait_time(level + 1));
    }
}

#[test]
fn test_soft_drop_interval_is_capped() {
    assert_eq!(
        soft_drop_interval(1, SOFT_DROP_INTERVAL_CAP_SECS),
        SOFT_DROP_INTERVAL_CAP_SECS
    );
    assert_eq!(
        soft_drop_interval(15, SOFT_DROP_INTERVAL_CAP_SECS),
        wait_time(15) / 4.0
    );
}

#[test]
fn test_line_pitch_rises_with_chain() {
    assert_eq!(line_clear_pitch(-1), 1.0);
    assert_eq!(line_clear_pitch(0), 1.0);
    assert_eq!(line_clear_pitch(6), 1.5);
}
