//! Ranking
//!
//! Orders score breakdowns into a strict total order: aggregate score
//! descending, then the sub-score on the highest-weighted criterion, then
//! employee id ascending. Ranks are 1-based and never shared.

use crate::criteria::ResolvedCriteria;
use crate::scorer::ScoreBreakdown;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A candidate's place in the final ordering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedResult {
    /// 1-based position
    pub rank: usize,
    #[serde(flatten)]
    pub breakdown: ScoreBreakdown,
}

impl RankedResult {
    #[inline]
    pub fn employee_id(&self) -> &str {
        &self.breakdown.employee_id
    }

    #[inline]
    pub fn score(&self) -> f64 {
        self.breakdown.score
    }

    #[inline]
    pub fn match_rate(&self) -> f64 {
        self.breakdown.match_rate
    }
}

fn primary_sub_score(breakdown: &ScoreBreakdown, primary: Option<&str>) -> OrderedFloat<f64> {
    OrderedFloat(
        primary
            .and_then(|id| breakdown.dimension(id))
            .map(|d| d.sub_score)
            .unwrap_or(0.0),
    )
}

/// Ordering used by [`rank`]; `primary` is the highest-weighted dimension id
pub fn compare(a: &ScoreBreakdown, b: &ScoreBreakdown, primary: Option<&str>) -> Ordering {
    OrderedFloat(b.score)
        .cmp(&OrderedFloat(a.score))
        .then_with(|| primary_sub_score(b, primary).cmp(&primary_sub_score(a, primary)))
        .then_with(|| a.employee_id.cmp(&b.employee_id))
}

/// Sort `scores` and assign ranks
pub fn rank(mut scores: Vec<ScoreBreakdown>, criteria: &ResolvedCriteria) -> Vec<RankedResult> {
    let primary = criteria
        .primary_index()
        .and_then(|i| criteria.iter().nth(i))
        .map(|c| c.id().to_string());

    scores.sort_by(|a, b| compare(a, b, primary.as_deref()));

    scores
        .into_iter()
        .enumerate()
        .map(|(i, breakdown)| RankedResult {
            rank: i + 1,
            breakdown,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::CriterionInput;
    use crate::scorer::DimensionScore;
    use talentx_core::{Dimension, DimensionCatalog, Observation};

    fn criteria() -> ResolvedCriteria {
        let catalog = DimensionCatalog::new(vec![
            Dimension::numeric("A", "A", 0.0, 100.0),
            Dimension::numeric("B", "B", 0.0, 100.0),
        ])
        .unwrap();
        ResolvedCriteria::resolve(
            &[CriterionInput::new("A", 1.0), CriterionInput::new("B", 3.0)],
            &catalog,
        )
        .unwrap()
    }

    fn breakdown(id: &str, score: f64, a: f64, b: f64) -> ScoreBreakdown {
        let dim = |name: &str, weight: f64, sub: f64| DimensionScore {
            dimension: name.to_string(),
            weight,
            sub_score: sub,
            contribution: weight * sub,
            observed: Observation::Missing,
            missing: false,
        };
        ScoreBreakdown {
            employee_id: id.to_string(),
            score,
            match_rate: score * 100.0,
            dimensions: vec![dim("A", 0.25, a), dim("B", 0.75, b)],
            groups: Vec::new(),
        }
    }

    #[test]
    fn test_sorted_by_score_descending() {
        let ranked = rank(
            vec![
                breakdown("E1", 0.4, 0.4, 0.4),
                breakdown("E2", 0.9, 0.9, 0.9),
                breakdown("E3", 0.7, 0.7, 0.7),
            ],
            &criteria(),
        );
        let ids: Vec<_> = ranked.iter().map(|r| r.employee_id()).collect();
        assert_eq!(ids, vec!["E2", "E3", "E1"]);
        let ranks: Vec<_> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_tie_broken_by_primary_dimension() {
        // Same aggregate, E9 is stronger on B (the heavier criterion)
        let ranked = rank(
            vec![breakdown("E1", 0.5, 0.8, 0.4), breakdown("E9", 0.5, 0.2, 0.6)],
            &criteria(),
        );
        assert_eq!(ranked[0].employee_id(), "E9");
        assert_eq!(ranked[1].employee_id(), "E1");
    }

    #[test]
    fn test_full_tie_broken_by_id_with_distinct_ranks() {
        let ranked = rank(
            vec![
                breakdown("E3", 0.5, 0.5, 0.5),
                breakdown("E1", 0.5, 0.5, 0.5),
                breakdown("E2", 0.5, 0.5, 0.5),
            ],
            &criteria(),
        );
        let ids: Vec<_> = ranked.iter().map(|r| r.employee_id()).collect();
        assert_eq!(ids, vec!["E1", "E2", "E3"]);
        let ranks: Vec<_> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let a = vec![
            breakdown("E1", 0.5, 0.5, 0.5),
            breakdown("E2", 0.6, 0.1, 0.7),
            breakdown("E3", 0.5, 0.1, 0.6),
        ];
        let mut b = a.clone();
        b.reverse();
        assert_eq!(rank(a, &criteria()), rank(b, &criteria()));
    }

    #[test]
    fn test_flattened_json() {
        let ranked = rank(vec![breakdown("E1", 0.5, 0.5, 0.5)], &criteria());
        let json = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(json["rank"], 1);
        assert_eq!(json["employee_id"], "E1");
        assert!(json["dimensions"].is_array());
    }
}
