//! Benchmark loading
//!
//! Turns a stored profile (or a handful of reference employees) into the
//! snapshot a run scores against: exactly one valid target per criterion and
//! nothing else.

use crate::criteria::{ResolvedCriteria, WeightedCriterion};
use crate::error::{BenchmarkError, MatchError};
use talentx_core::{
    BenchmarkProfile, Direction, EmployeeRecord, Observation, TalentSource, Target, ValueDomain,
};
use tracing::debug;

/// Reference employees allowed when deriving a benchmark
pub const MAX_REFERENCES: usize = 3;

/// Fetch benchmark `id` from `source` and restrict it to `criteria`
pub fn load_benchmark<S: TalentSource + ?Sized>(
    source: &S,
    id: &str,
    criteria: &ResolvedCriteria,
) -> Result<BenchmarkProfile, MatchError> {
    let profile = source
        .benchmark(id)?
        .ok_or_else(|| BenchmarkError::NotFound(id.to_string()))?;
    Ok(restrict_to_criteria(&profile, criteria)?)
}

/// Keep only the criteria dimensions, failing on any absent or unusable target
pub fn restrict_to_criteria(
    profile: &BenchmarkProfile,
    criteria: &ResolvedCriteria,
) -> Result<BenchmarkProfile, BenchmarkError> {
    let mut restricted = BenchmarkProfile::new(profile.id.clone(), profile.name.clone())
        .with_version(profile.version);

    for criterion in criteria {
        let target = profile
            .target(criterion.id())
            .ok_or_else(|| BenchmarkError::MissingDimension {
                benchmark: profile.id.clone(),
                dimension: criterion.id().to_string(),
            })?;
        check_target(&profile.id, criterion, target)?;
        restricted.targets.insert(criterion.id().to_string(), target.clone());
    }

    let dropped = profile.len() - restricted.len();
    if dropped > 0 {
        debug!(benchmark = %profile.id, dropped, "Dropped benchmark dimensions outside the criteria");
    }
    Ok(restricted)
}

/// Derive a benchmark from 1 to 3 reference employees.
///
/// Numeric targets are the mean of the references' values, categorical
/// targets the set of categories they hold.
pub fn from_references(
    id: impl Into<String>,
    name: impl Into<String>,
    references: &[EmployeeRecord],
    criteria: &ResolvedCriteria,
) -> Result<BenchmarkProfile, BenchmarkError> {
    if references.is_empty() || references.len() > MAX_REFERENCES {
        return Err(BenchmarkError::ReferenceCount(references.len()));
    }

    let mut profile = BenchmarkProfile::new(id, name);
    for criterion in criteria {
        let observations: Vec<Observation> = references
            .iter()
            .map(|r| Observation::project(r.attribute(criterion.id()), &criterion.dimension.domain))
            .filter(|o| !o.is_missing())
            .collect();

        let target = match criterion.dimension.domain {
            ValueDomain::Numeric { .. } => {
                let values: Vec<f64> = observations
                    .iter()
                    .filter_map(|o| match o {
                        Observation::Number(n) => Some(*n),
                        _ => None,
                    })
                    .collect();
                if values.is_empty() {
                    None
                } else {
                    Some(Target::value(values.iter().sum::<f64>() / values.len() as f64))
                }
            }
            ValueDomain::Categorical { .. } => {
                let mut categories: Vec<String> = Vec::new();
                for observation in observations {
                    if let Observation::Category(c) = observation {
                        if !categories.iter().any(|known| known.eq_ignore_ascii_case(&c)) {
                            categories.push(c);
                        }
                    }
                }
                if categories.is_empty() {
                    None
                } else {
                    Some(Target::Categories { values: categories })
                }
            }
        };

        let target = target.ok_or_else(|| BenchmarkError::MissingDimension {
            benchmark: profile.id.clone(),
            dimension: criterion.id().to_string(),
        })?;
        profile.targets.insert(criterion.id().to_string(), target);
    }
    Ok(profile)
}

fn check_target(
    benchmark: &str,
    criterion: &WeightedCriterion,
    target: &Target,
) -> Result<(), BenchmarkError> {
    let invalid = |reason: String| BenchmarkError::InvalidTarget {
        benchmark: benchmark.to_string(),
        dimension: criterion.id().to_string(),
        reason,
    };

    match (&criterion.dimension.domain, target) {
        (ValueDomain::Numeric { .. }, Target::Value { value }) => {
            if !value.is_finite() {
                return Err(invalid(format!("value {} is not finite", value)));
            }
        }
        (ValueDomain::Numeric { .. }, Target::Range { low, high }) => {
            if !low.is_finite() || !high.is_finite() || low > high {
                return Err(invalid(format!("range {}..{} is not a valid band", low, high)));
            }
        }
        (ValueDomain::Numeric { .. }, Target::Open) => {
            if criterion.direction != Direction::HigherIsBetter {
                return Err(invalid("open target needs a higher_is_better criterion".to_string()));
            }
        }
        (ValueDomain::Categorical { .. }, Target::Categories { values }) => {
            if values.is_empty() {
                return Err(invalid("category set is empty".to_string()));
            }
            if let Some(unknown) = values.iter().find(|v| !criterion.dimension.domain.allows_category(v)) {
                return Err(invalid(format!("category '{}' is outside the dimension's domain", unknown)));
            }
        }
        (domain, target) => {
            return Err(invalid(format!(
                "{} target on a {} dimension",
                target.kind_name(),
                domain.kind_name()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::CriterionInput;
    use serde_json::{json, Value};
    use talentx_core::{Dimension, DimensionCatalog, PoolFilter};

    fn catalog() -> DimensionCatalog {
        DimensionCatalog::new(vec![
            Dimension::numeric("A", "A", 0.0, 100.0),
            Dimension::numeric("B", "B", 0.0, 100.0),
            Dimension::numeric("C", "C", 0.0, 100.0),
            Dimension::numeric("rating", "Rating", 1.0, 5.0).with_direction(Direction::HigherIsBetter),
            Dimension::categorical("strength", "Strength", ["Analytical", "Achiever", "Learner"]),
        ])
        .unwrap()
    }

    fn criteria(ids: &[&str]) -> ResolvedCriteria {
        let inputs: Vec<_> = ids.iter().map(|id| CriterionInput::new(*id, 1.0)).collect();
        ResolvedCriteria::resolve(&inputs, &catalog()).unwrap()
    }

    #[test]
    fn test_restrict_drops_extra_dimensions() {
        let profile = BenchmarkProfile::new("b1", "Bench")
            .with_version(4)
            .with_target("A", Target::value(80.0))
            .with_target("B", Target::value(50.0))
            .with_target("unused", Target::value(1.0));
        let restricted = restrict_to_criteria(&profile, &criteria(&["A", "B"])).unwrap();
        assert_eq!(restricted.len(), 2);
        assert_eq!(restricted.version, 4);
        assert!(restricted.target("unused").is_none());
    }

    #[test]
    fn test_missing_dimension_is_named() {
        let profile = BenchmarkProfile::new("b1", "Bench")
            .with_target("A", Target::value(80.0))
            .with_target("B", Target::value(50.0));
        let err = restrict_to_criteria(&profile, &criteria(&["A", "B", "C"])).unwrap_err();
        assert_eq!(
            err,
            BenchmarkError::MissingDimension { benchmark: "b1".to_string(), dimension: "C".to_string() }
        );
        assert_eq!(err.dimension(), Some("C"));
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        let profile = BenchmarkProfile::new("b1", "Bench").with_target("A", Target::categories(["x"]));
        assert!(matches!(
            restrict_to_criteria(&profile, &criteria(&["A"])),
            Err(BenchmarkError::InvalidTarget { dimension, .. }) if dimension == "A"
        ));
    }

    #[test]
    fn test_open_target_needs_higher_is_better() {
        let profile = BenchmarkProfile::new("b1", "Bench")
            .with_target("A", Target::Open)
            .with_target("rating", Target::Open);
        assert!(restrict_to_criteria(&profile, &criteria(&["rating"])).is_ok());
        assert!(restrict_to_criteria(&profile, &criteria(&["A"])).is_err());
    }

    #[test]
    fn test_inverted_range_and_unknown_category() {
        let profile = BenchmarkProfile::new("b1", "Bench").with_target("A", Target::range(60.0, 40.0));
        assert!(restrict_to_criteria(&profile, &criteria(&["A"])).is_err());

        let profile = BenchmarkProfile::new("b1", "Bench").with_target("strength", Target::categories(["Woo"]));
        assert!(restrict_to_criteria(&profile, &criteria(&["strength"])).is_err());
    }

    #[test]
    fn test_from_references_means_and_category_sets() {
        let refs = vec![
            EmployeeRecord::new("E1", "Rina")
                .with_attribute("A", json!(70))
                .with_attribute("strength", json!("Analytical")),
            EmployeeRecord::new("E2", "Budi")
                .with_attribute("A", json!(90))
                .with_attribute("strength", json!("analytical")),
            EmployeeRecord::new("E3", "Sari")
                .with_attribute("A", Value::Null)
                .with_attribute("strength", json!("Learner")),
        ];
        let profile = from_references("ref", "Refs", &refs, &criteria(&["A", "strength"])).unwrap();
        assert_eq!(profile.target("A"), Some(&Target::value(80.0)));
        assert_eq!(profile.target("strength"), Some(&Target::categories(["Analytical", "Learner"])));
    }

    #[test]
    fn test_from_references_count_bounds() {
        let one = EmployeeRecord::new("E1", "Rina").with_attribute("A", json!(70));
        assert_eq!(
            from_references("ref", "Refs", &[], &criteria(&["A"])),
            Err(BenchmarkError::ReferenceCount(0))
        );
        let four = vec![one.clone(), one.clone(), one.clone(), one];
        assert_eq!(
            from_references("ref", "Refs", &four, &criteria(&["A"])),
            Err(BenchmarkError::ReferenceCount(4))
        );
    }

    #[test]
    fn test_from_references_without_data() {
        let refs = vec![EmployeeRecord::new("E1", "Rina")];
        assert!(matches!(
            from_references("ref", "Refs", &refs, &criteria(&["B"])),
            Err(BenchmarkError::MissingDimension { dimension, .. }) if dimension == "B"
        ));
    }

    #[derive(Clone)]
    struct OneBenchmark(BenchmarkProfile);

    impl TalentSource for OneBenchmark {
        fn catalog(&self) -> talentx_core::Result<DimensionCatalog> {
            Ok(catalog())
        }

        fn benchmark(&self, id: &str) -> talentx_core::Result<Option<BenchmarkProfile>> {
            Ok((id == self.0.id).then(|| self.0.clone()))
        }

        fn employees(&self, _filter: Option<&PoolFilter>) -> talentx_core::Result<Vec<EmployeeRecord>> {
            Ok(Vec::new())
        }

        fn employee(&self, _id: &str) -> talentx_core::Result<Option<EmployeeRecord>> {
            Ok(None)
        }

        fn snapshot(&self) -> talentx_core::Result<std::sync::Arc<dyn TalentSource>> {
            Ok(std::sync::Arc::new(self.clone()))
        }
    }

    #[test]
    fn test_load_benchmark_not_found() {
        let source = OneBenchmark(BenchmarkProfile::new("b1", "Bench").with_target("A", Target::value(1.0)));
        assert!(load_benchmark(&source, "b1", &criteria(&["A"])).is_ok());
        assert!(matches!(
            load_benchmark(&source, "b2", &criteria(&["A"])),
            Err(MatchError::IncompleteBenchmark(BenchmarkError::NotFound(id))) if id == "b2"
        ));
    }
}
