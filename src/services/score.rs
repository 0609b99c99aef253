//! Wellness score and tip derivation.
//!
//! Both functions are total: any numeric input, including out-of-range and
//! non-finite values, yields a well-defined result. Input range checks belong
//! to the request layer.

pub const SCORE_MAX: u8 = 100;

const SLEEP_TARGET_HOURS: f64 = 8.0;
const SLEEP_POINTS: f64 = 40.0;

const STRESS_CEILING: f64 = 10.0;
const STRESS_POINTS: f64 = 30.0;

const SCREEN_FREE_HOURS: f64 = 3.0;
const SCREEN_POINTS: f64 = 30.0;
/// Points lost per screen hour past the free allowance; reaches zero at 12h.
const SCREEN_DECAY_PER_HOUR: f64 = SCREEN_POINTS / 9.0;

const SHORT_SLEEP_HOURS: f64 = 6.0;
const LONG_SCREEN_HOURS: f64 = 8.0;
const HIGH_STRESS_LEVEL: i32 = 7;

pub const SLEEP_TIP: &str = "Try sleeping 7-8 hours.";
pub const SCREEN_TIP: &str = "Too much screen time! Reduce it.";
pub const STRESS_TIP: &str = "High stress! Try breathing exercises.";
pub const REST_TIP: &str = "Take a power nap.";

/// Clamp into `[0, max]`, treating NaN as zero points.
fn bounded(points: f64, max: f64) -> f64 {
    if points.is_nan() {
        0.0
    } else {
        points.clamp(0.0, max)
    }
}

pub fn sleep_points(sleep_hours: f64) -> f64 {
    bounded(sleep_hours / SLEEP_TARGET_HOURS * SLEEP_POINTS, SLEEP_POINTS)
}

pub fn stress_points(stress_level: i32) -> f64 {
    bounded(
        (STRESS_CEILING - f64::from(stress_level)) / STRESS_CEILING * STRESS_POINTS,
        STRESS_POINTS,
    )
}

pub fn screen_points(screen_time: f64) -> f64 {
    if screen_time <= SCREEN_FREE_HOURS {
        SCREEN_POINTS
    } else {
        bounded(
            SCREEN_POINTS - (screen_time - SCREEN_FREE_HOURS) * SCREEN_DECAY_PER_HOUR,
            SCREEN_POINTS,
        )
    }
}

/// Composite score in `[0, 100]`: up to 40 points for sleep, 30 for low
/// stress and 30 for limited screen time. Fractions are truncated.
pub fn compute_score(sleep_hours: f64, screen_time: f64, stress_level: i32) -> u8 {
    let total =
        sleep_points(sleep_hours) + stress_points(stress_level) + screen_points(screen_time);
    bounded(total, f64::from(SCORE_MAX)) as u8
}

/// Advisory text for the day. Fragments appear in a fixed order (sleep,
/// screen, stress, mood); returns an empty string when nothing triggers.
pub fn generate_tip(sleep_hours: f64, screen_time: f64, stress_level: i32, mood: &str) -> String {
    let mut fragments = Vec::new();

    if sleep_hours < SHORT_SLEEP_HOURS {
        fragments.push(SLEEP_TIP);
    }
    if screen_time > LONG_SCREEN_HOURS {
        fragments.push(SCREEN_TIP);
    }
    if stress_level >= HIGH_STRESS_LEVEL {
        fragments.push(STRESS_TIP);
    }
    if mood.eq_ignore_ascii_case("tired") || mood.eq_ignore_ascii_case("exhausted") {
        fragments.push(REST_TIP);
    }

    fragments.join(" ")
}

/// Score and tip derived together for one check-in.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub wellness_score: u8,
    pub tip: String,
}

impl Assessment {
    pub fn of(sleep_hours: f64, screen_time: f64, stress_level: i32, mood: &str) -> Self {
        Self {
            wellness_score: compute_score(sleep_hours, screen_time, stress_level),
            tip: generate_tip(sleep_hours, screen_time, stress_level, mood),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_case_scores_full_marks() {
        assert_eq!(compute_score(8.0, 3.0, 0), 100);
    }

    #[test]
    fn test_worst_case_scores_zero() {
        assert_eq!(compute_score(0.0, 24.0, 10), 0);
    }

    #[test]
    fn test_score_truncates_instead_of_rounding() {
        // 7.9h sleep = 39.5 points
        assert_eq!(compute_score(7.9, 3.0, 0), 99);
        // 4h screen = 26.67 points
        assert_eq!(compute_score(8.0, 4.0, 0), 96);
    }

    #[test]
    fn test_screen_points_reach_zero_at_twelve_hours() {
        assert_eq!(screen_points(3.0), 30.0);
        assert!(screen_points(12.0).abs() < 1e-9);
        assert_eq!(screen_points(20.0), 0.0);
    }

    #[test]
    fn test_sleep_points_monotonic_then_flat() {
        let mut previous = sleep_points(0.0);
        for tenth in 1..=120 {
            let hours = f64::from(tenth) / 10.0;
            let current = sleep_points(hours);
            assert!(current >= previous, "sleep points dropped at {hours}h");
            if hours >= 8.0 {
                assert_eq!(current, 40.0);
            }
            previous = current;
        }
    }

    #[test]
    fn test_score_non_increasing_in_stress() {
        for (sleep, screen) in [(8.0, 3.0), (5.0, 6.0), (0.0, 24.0), (12.0, 10.0)] {
            let scores: Vec<u8> = (0..=10)
                .map(|stress| compute_score(sleep, screen, stress))
                .collect();
            assert!(
                scores.windows(2).all(|w| w[0] >= w[1]),
                "score rose with stress for sleep={sleep}, screen={screen}: {scores:?}"
            );
        }
    }

    #[test]
    fn test_score_bounded_for_any_input() {
        let numbers = [
            f64::NEG_INFINITY,
            -1000.0,
            -1.0,
            0.0,
            2.5,
            8.0,
            13.0,
            48.0,
            f64::INFINITY,
            f64::NAN,
        ];
        let stresses = [i32::MIN, -50, -1, 0, 5, 10, 11, 1000, i32::MAX];
        for &sleep in &numbers {
            for &screen in &numbers {
                for &stress in &stresses {
                    let score = compute_score(sleep, screen, stress);
                    assert!(score <= SCORE_MAX, "{sleep}/{screen}/{stress} -> {score}");
                }
            }
        }
    }

    #[test]
    fn test_negative_inputs_clamp() {
        // negative sleep contributes nothing, negative stress caps at 30
        assert_eq!(compute_score(-5.0, 0.0, -20), 60);
    }

    #[test]
    fn test_tip_contains_all_fragments_in_order() {
        let tip = generate_tip(5.0, 9.0, 8, "Tired");
        let positions: Vec<usize> = [SLEEP_TIP, SCREEN_TIP, STRESS_TIP, REST_TIP]
            .iter()
            .map(|fragment| tip.find(fragment).expect("fragment missing"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_tip_empty_when_nothing_triggers() {
        assert_eq!(generate_tip(8.0, 2.0, 1, "Happy"), "");
    }

    #[test]
    fn test_tip_thresholds_are_exclusive_where_expected() {
        // exactly 6h sleep and 8h screen do not trigger; stress 7 does
        assert_eq!(generate_tip(6.0, 8.0, 7, "Sad"), STRESS_TIP);
    }

    #[test]
    fn test_tip_mood_match_ignores_case() {
        assert_eq!(generate_tip(8.0, 2.0, 1, "EXHAUSTED"), REST_TIP);
        assert_eq!(generate_tip(8.0, 2.0, 1, "tired"), REST_TIP);
        assert_eq!(generate_tip(8.0, 2.0, 1, "Tiredness"), "");
    }

    #[test]
    fn test_tip_mood_match_is_exact_apart_from_case() {
        assert_eq!(generate_tip(8.0, 2.0, 1, " tired "), "");
        assert_eq!(generate_tip(8.0, 2.0, 1, "Exhausted\n"), "");
    }

    #[test]
    fn test_assessment_combines_score_and_tip() {
        let assessment = Assessment::of(5.0, 2.0, 2, "Happy");
        assert_eq!(assessment.wellness_score, 25 + 24 + 30);
        assert_eq!(assessment.tip, SLEEP_TIP);
    }
}
