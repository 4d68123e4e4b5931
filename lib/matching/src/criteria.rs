//! Role criteria resolution
//!
//! A role arrives as a list of `(dimension, weight, direction)` entries from
//! the input form. Resolution checks every entry against the dimension
//! catalog and normalizes the weights so they sum to 1.0.

use crate::error::CriteriaError;
use serde::{Deserialize, Serialize};
use talentx_core::{Dimension, DimensionCatalog, Direction};

fn default_weight() -> f64 {
    1.0
}

/// One raw criterion as supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CriterionInput {
    pub dimension: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Overrides the dimension's default direction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

impl CriterionInput {
    pub fn new(dimension: impl Into<String>, weight: f64) -> Self {
        Self {
            dimension: dimension.into(),
            weight,
            direction: None,
        }
    }

    #[must_use]
    pub fn higher_is_better(mut self) -> Self {
        self.direction = Some(Direction::HigherIsBetter);
        self
    }
}

/// A validated criterion with its normalized weight
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightedCriterion {
    pub dimension: Dimension,
    pub weight: f64,
    pub direction: Direction,
}

impl WeightedCriterion {
    #[inline]
    pub fn id(&self) -> &str {
        &self.dimension.id
    }
}

/// The resolved, normalized criteria set of one role, in caller order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedCriteria {
    criteria: Vec<WeightedCriterion>,
}

impl ResolvedCriteria {
    /// Validate `inputs` against `catalog` and normalize weights to sum to 1.0
    pub fn resolve(
        inputs: &[CriterionInput],
        catalog: &DimensionCatalog,
    ) -> Result<Self, CriteriaError> {
        if inputs.is_empty() {
            return Err(CriteriaError::Empty);
        }

        let mut criteria: Vec<WeightedCriterion> = Vec::with_capacity(inputs.len());
        for input in inputs {
            if !input.weight.is_finite() {
                return Err(CriteriaError::NonFiniteWeight(input.dimension.clone()));
            }
            if input.weight < 0.0 {
                return Err(CriteriaError::NegativeWeight(input.dimension.clone()));
            }
            let dimension = catalog
                .get(&input.dimension)
                .ok_or_else(|| CriteriaError::UnknownDimension(input.dimension.clone()))?;
            if criteria.iter().any(|c| c.id() == dimension.id) {
                return Err(CriteriaError::DuplicateDimension(dimension.id.clone()));
            }

            let direction = input.direction.unwrap_or(dimension.direction);
            if direction == Direction::HigherIsBetter && !dimension.domain.is_numeric() {
                return Err(CriteriaError::UnsupportedDirection {
                    dimension: dimension.id.clone(),
                    direction: direction.as_str().to_string(),
                });
            }

            criteria.push(WeightedCriterion {
                dimension: dimension.clone(),
                weight: input.weight,
                direction,
            });
        }

        let mut weight_sum: f64 = criteria.iter().map(|c| c.weight).sum();
        if weight_sum <= 0.0 {
            return Err(CriteriaError::ZeroTotalWeight);
        }
        if !weight_sum.is_finite() {
            // Every weight is finite, so only the sum overflowed; rescale by the largest first
            let max_weight = criteria.iter().map(|c| c.weight).fold(0.0, f64::max);
            for criterion in &mut criteria {
                criterion.weight /= max_weight;
            }
            weight_sum = criteria.iter().map(|c| c.weight).sum();
        }
        for criterion in &mut criteria {
            criterion.weight /= weight_sum;
        }

        Ok(Self { criteria })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeightedCriterion> {
        self.criteria.iter()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn get(&self, dimension: &str) -> Option<&WeightedCriterion> {
        self.criteria.iter().find(|c| c.id() == dimension)
    }

    #[inline]
    pub fn contains(&self, dimension: &str) -> bool {
        self.get(dimension).is_some()
    }

    pub fn dimension_ids(&self) -> impl Iterator<Item = &str> {
        self.criteria.iter().map(WeightedCriterion::id)
    }

    /// Position of the highest-weighted criterion; the earliest one wins a tie
    pub fn primary_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, criterion) in self.criteria.iter().enumerate() {
            match best {
                Some((_, weight)) if criterion.weight <= weight => {}
                _ => best = Some((i, criterion.weight)),
            }
        }
        best.map(|(i, _)| i)
    }
}

impl<'a> IntoIterator for &'a ResolvedCriteria {
    type Item = &'a WeightedCriterion;
    type IntoIter = std::slice::Iter<'a, WeightedCriterion>;

    fn into_iter(self) -> Self::IntoIter {
        self.criteria.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> DimensionCatalog {
        DimensionCatalog::new(vec![
            Dimension::numeric("A", "Dimension A", 0.0, 100.0),
            Dimension::numeric("B", "Dimension B", 0.0, 100.0),
            Dimension::numeric("rating", "Performance rating", 1.0, 5.0)
                .with_direction(Direction::HigherIsBetter),
            Dimension::categorical("strength", "Top strength", Vec::<String>::new()),
        ])
        .unwrap()
    }

    #[test]
    fn test_weights_are_normalized() {
        let inputs = vec![
            CriterionInput::new("A", 2.0),
            CriterionInput::new("B", 1.0),
            CriterionInput::new("rating", 1.0),
        ];
        let resolved = ResolvedCriteria::resolve(&inputs, &catalog()).unwrap();
        let sum: f64 = resolved.iter().map(|c| c.weight).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!((resolved.get("A").unwrap().weight - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_normalization_holds_for_awkward_weights() {
        for weights in [[0.1, 0.2, 0.3], [1e-9, 3.0, 7.0], [1e6, 1.0, 0.0], [0.0, 0.0, 0.7]] {
            let inputs: Vec<_> = ["A", "B", "rating"]
                .iter()
                .zip(weights)
                .map(|(d, w)| CriterionInput::new(*d, w))
                .collect();
            let resolved = ResolvedCriteria::resolve(&inputs, &catalog()).unwrap();
            let sum: f64 = resolved.iter().map(|c| c.weight).sum();
            assert!((sum - 1.0).abs() < 1e-9, "weights {:?} summed to {}", weights, sum);
        }
    }

    #[test]
    fn test_huge_weights_still_normalize() {
        let inputs = vec![
            CriterionInput::new("A", f64::MAX),
            CriterionInput::new("B", 1e308),
            CriterionInput::new("rating", 1e308),
        ];
        let resolved = ResolvedCriteria::resolve(&inputs, &catalog()).unwrap();
        let sum: f64 = resolved.iter().map(|c| c.weight).sum();
        assert!((sum - 1.0).abs() < 1e-9, "weights summed to {}", sum);
        assert!(resolved.iter().all(|c| c.weight > 0.0 && c.weight.is_finite()));
        assert_eq!(resolved.primary_index(), Some(0));

        let even = vec![CriterionInput::new("A", 1e308), CriterionInput::new("B", 1e308)];
        let resolved = ResolvedCriteria::resolve(&even, &catalog()).unwrap();
        assert!((resolved.get("A").unwrap().weight - 0.5).abs() < 1e-12);
        assert!((resolved.get("B").unwrap().weight - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_keeps_caller_order_and_default_direction() {
        let inputs = vec![CriterionInput::new("rating", 1.0), CriterionInput::new("A", 1.0)];
        let resolved = ResolvedCriteria::resolve(&inputs, &catalog()).unwrap();
        let ids: Vec<_> = resolved.dimension_ids().collect();
        assert_eq!(ids, vec!["rating", "A"]);
        assert_eq!(resolved.get("rating").unwrap().direction, Direction::HigherIsBetter);
        assert_eq!(resolved.get("A").unwrap().direction, Direction::TargetIsIdeal);
    }

    #[test]
    fn test_direction_override() {
        let inputs = vec![CriterionInput::new("A", 1.0).higher_is_better()];
        let resolved = ResolvedCriteria::resolve(&inputs, &catalog()).unwrap();
        assert_eq!(resolved.get("A").unwrap().direction, Direction::HigherIsBetter);
    }

    #[test]
    fn test_empty_criteria() {
        assert_eq!(ResolvedCriteria::resolve(&[], &catalog()), Err(CriteriaError::Empty));
    }

    #[test]
    fn test_negative_weight() {
        let inputs = vec![CriterionInput::new("A", 1.0), CriterionInput::new("B", -0.5)];
        assert_eq!(
            ResolvedCriteria::resolve(&inputs, &catalog()),
            Err(CriteriaError::NegativeWeight("B".to_string()))
        );
    }

    #[test]
    fn test_non_finite_weight() {
        let inputs = vec![CriterionInput::new("A", f64::NAN)];
        assert_eq!(
            ResolvedCriteria::resolve(&inputs, &catalog()),
            Err(CriteriaError::NonFiniteWeight("A".to_string()))
        );
    }

    #[test]
    fn test_zero_total_weight() {
        let inputs = vec![CriterionInput::new("A", 0.0), CriterionInput::new("B", 0.0)];
        assert_eq!(
            ResolvedCriteria::resolve(&inputs, &catalog()),
            Err(CriteriaError::ZeroTotalWeight)
        );
    }

    #[test]
    fn test_unknown_dimension() {
        let inputs = vec![CriterionInput::new("A", 1.0), CriterionInput::new("papi_z", 1.0)];
        assert_eq!(
            ResolvedCriteria::resolve(&inputs, &catalog()),
            Err(CriteriaError::UnknownDimension("papi_z".to_string()))
        );
    }

    #[test]
    fn test_duplicate_dimension() {
        let inputs = vec![CriterionInput::new("A", 1.0), CriterionInput::new("A", 2.0)];
        assert_eq!(
            ResolvedCriteria::resolve(&inputs, &catalog()),
            Err(CriteriaError::DuplicateDimension("A".to_string()))
        );
    }

    #[test]
    fn test_categorical_cannot_be_higher_is_better() {
        let inputs = vec![CriterionInput::new("strength", 1.0).higher_is_better()];
        assert!(matches!(
            ResolvedCriteria::resolve(&inputs, &catalog()),
            Err(CriteriaError::UnsupportedDirection { dimension, .. }) if dimension == "strength"
        ));
    }

    #[test]
    fn test_primary_index_prefers_earliest_on_tie() {
        let inputs = vec![
            CriterionInput::new("A", 1.0),
            CriterionInput::new("B", 3.0),
            CriterionInput::new("rating", 3.0),
        ];
        let resolved = ResolvedCriteria::resolve(&inputs, &catalog()).unwrap();
        assert_eq!(resolved.primary_index(), Some(1));
    }

    #[test]
    fn test_input_weight_defaults_to_one() {
        let input: CriterionInput = serde_json::from_str(r#"{"dimension": "A"}"#).unwrap();
        assert_eq!(input.weight, 1.0);
        assert_eq!(input.direction, None);
    }
}
