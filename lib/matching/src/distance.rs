//! Per-dimension fit functions
//!
//! Every function returns a sub-score in [0.0, 1.0] where 1.0 is a full
//! match with the benchmark. All numeric fits are linear in the distance
//! to the target, scaled by the domain width.

use crate::criteria::WeightedCriterion;
use talentx_core::{Direction, Observation, Target, ValueDomain};

/// Deviation from a point target: `1 - min(1, |observed - target| / width)`
///
/// # Arguments
/// * `observed` - The candidate's value
/// * `target` - The benchmark value
/// * `width` - Width of the dimension's value domain
pub fn target_similarity(observed: f64, target: f64, width: f64) -> f64 {
    deviation_score(observed - target, width)
}

/// Distance to an ideal band; 1.0 anywhere inside `[low, high]`
pub fn range_similarity(observed: f64, low: f64, high: f64, width: f64) -> f64 {
    let distance = if observed < low {
        low - observed
    } else if observed > high {
        observed - high
    } else {
        0.0
    };
    deviation_score(distance, width)
}

/// Position within the domain: `clamp((observed - min) / (max - min), 0, 1)`
pub fn scale_position(observed: f64, min: f64, max: f64) -> f64 {
    let width = max - min;
    if width <= 0.0 {
        return if observed >= max { 1.0 } else { 0.0 };
    }
    ((observed - min) / width).clamp(0.0, 1.0)
}

/// One-sided threshold: 1.0 at or above `threshold`, linear shortfall below
pub fn threshold_similarity(observed: f64, threshold: f64, width: f64) -> f64 {
    if observed >= threshold {
        1.0
    } else {
        deviation_score(threshold - observed, width)
    }
}

/// 1.0 if `observed` is one of the ideal categories (case-insensitive)
pub fn categorical_similarity(observed: &str, ideal: &[String]) -> f64 {
    if ideal.iter().any(|c| c.eq_ignore_ascii_case(observed)) {
        1.0
    } else {
        0.0
    }
}

fn deviation_score(deviation: f64, width: f64) -> f64 {
    if width <= 0.0 {
        return if deviation == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - (deviation.abs() / width).min(1.0)
}

/// Sub-score of one observation against its benchmark target.
///
/// Returns `None` when the observation is missing or its kind does not fit
/// the target, so the caller can apply the missing-data penalty.
pub fn sub_score(criterion: &WeightedCriterion, target: &Target, observed: &Observation) -> Option<f64> {
    let score = match (&criterion.dimension.domain, observed) {
        (ValueDomain::Numeric { min, max }, Observation::Number(value)) => {
            let width = max - min;
            match (criterion.direction, target) {
                (Direction::TargetIsIdeal, Target::Value { value: t }) => {
                    target_similarity(*value, *t, width)
                }
                (Direction::TargetIsIdeal, Target::Range { low, high }) => {
                    range_similarity(*value, *low, *high, width)
                }
                (Direction::HigherIsBetter, Target::Value { value: t }) => {
                    threshold_similarity(*value, *t, width)
                }
                (Direction::HigherIsBetter, Target::Range { low, .. }) => {
                    threshold_similarity(*value, *low, width)
                }
                (Direction::HigherIsBetter, Target::Open) => scale_position(*value, *min, *max),
                _ => return None,
            }
        }
        (ValueDomain::Categorical { .. }, Observation::Category(value)) => match target {
            Target::Categories { values } => categorical_similarity(value, values),
            _ => return None,
        },
        _ => return None,
    };
    Some(score.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use talentx_core::Dimension;

    fn criterion(dimension: Dimension, direction: Direction) -> WeightedCriterion {
        WeightedCriterion {
            dimension,
            weight: 1.0,
            direction,
        }
    }

    #[test]
    fn test_target_similarity() {
        assert_eq!(target_similarity(80.0, 80.0, 100.0), 1.0);
        assert!((target_similarity(60.0, 80.0, 100.0) - 0.8).abs() < 1e-12);
        assert!((target_similarity(70.0, 50.0, 100.0) - 0.8).abs() < 1e-12);
        assert_eq!(target_similarity(0.0, 100.0, 100.0), 0.0);
        // Out-of-domain observations bottom out at zero
        assert_eq!(target_similarity(-500.0, 100.0, 100.0), 0.0);
    }

    #[test]
    fn test_range_similarity() {
        assert_eq!(range_similarity(3.5, 3.0, 4.0, 4.0), 1.0);
        assert!((range_similarity(2.0, 3.0, 4.0, 4.0) - 0.75).abs() < 1e-12);
        assert!((range_similarity(5.0, 3.0, 4.0, 4.0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_scale_position() {
        assert_eq!(scale_position(1.0, 1.0, 5.0), 0.0);
        assert_eq!(scale_position(3.0, 1.0, 5.0), 0.5);
        assert_eq!(scale_position(9.0, 1.0, 5.0), 1.0);
        assert_eq!(scale_position(-2.0, 1.0, 5.0), 0.0);
    }

    #[test]
    fn test_threshold_similarity() {
        assert_eq!(threshold_similarity(4.5, 4.0, 4.0), 1.0);
        assert!((threshold_similarity(3.0, 4.0, 4.0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_categorical_similarity() {
        let ideal = vec!["Analytical".to_string(), "Achiever".to_string()];
        assert_eq!(categorical_similarity("achiever", &ideal), 1.0);
        assert_eq!(categorical_similarity("Futuristic", &ideal), 0.0);
        assert_eq!(categorical_similarity("Achiever", &[]), 0.0);
    }

    #[test]
    fn test_degenerate_width() {
        assert_eq!(target_similarity(5.0, 5.0, 0.0), 1.0);
        assert_eq!(target_similarity(5.0, 6.0, 0.0), 0.0);
    }

    #[test]
    fn test_sub_score_dispatch() {
        let rating = criterion(Dimension::numeric("rating", "Rating", 1.0, 5.0), Direction::HigherIsBetter);
        assert_eq!(sub_score(&rating, &Target::Open, &Observation::Number(5.0)), Some(1.0));
        assert_eq!(sub_score(&rating, &Target::value(4.0), &Observation::Number(4.2)), Some(1.0));
        assert_eq!(sub_score(&rating, &Target::range(4.0, 5.0), &Observation::Number(3.0)), Some(0.75));
        assert_eq!(sub_score(&rating, &Target::Open, &Observation::Missing), None);

        let iq = criterion(Dimension::numeric("iq", "IQ", 70.0, 145.0), Direction::TargetIsIdeal);
        assert_eq!(sub_score(&iq, &Target::value(120.0), &Observation::Number(120.0)), Some(1.0));
        // Open targets have no meaning when the target is the ideal
        assert_eq!(sub_score(&iq, &Target::Open, &Observation::Number(120.0)), None);
        // Wrong-kind observation
        assert_eq!(
            sub_score(&iq, &Target::value(120.0), &Observation::Category("high".to_string())),
            None
        );

        let strength = criterion(
            Dimension::categorical("strength", "Strength", Vec::<String>::new()),
            Direction::TargetIsIdeal,
        );
        assert_eq!(
            sub_score(&strength, &Target::categories(["Learner"]), &Observation::Category("learner".to_string())),
            Some(1.0)
        );
    }
}
