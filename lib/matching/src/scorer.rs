//! Similarity scoring
//!
//! Scores each candidate against the benchmark snapshot, one sub-score per
//! criterion, and sums the weighted contributions into the aggregate.
//! Missing data is scored with the configured penalty and stays in the
//! weighted sum, so every candidate is measured on the same total weight.

use crate::benchmark::restrict_to_criteria;
use crate::criteria::ResolvedCriteria;
use crate::distance::sub_score;
use crate::error::{BenchmarkError, MatchError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use talentx_core::{BenchmarkProfile, CandidateVector, Observation};
use tracing::debug;

/// One criterion's part of a candidate's score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DimensionScore {
    pub dimension: String,
    /// Normalized criterion weight
    pub weight: f64,
    /// Fit in [0, 1] before weighting
    pub sub_score: f64,
    /// `weight * sub_score`
    pub contribution: f64,
    pub observed: Observation,
    /// Scored with the missing-data penalty
    pub missing: bool,
}

/// Weighted fit over the dimensions of one talent group (TGV)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupScore {
    pub group: String,
    pub score: f64,
    pub match_rate: f64,
}

/// Full explanation of one candidate's score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdown {
    pub employee_id: String,
    /// Aggregate weighted score in [0, 1]
    pub score: f64,
    /// `score` rescaled to [0, 100]
    pub match_rate: f64,
    /// Per-criterion scores, in criteria order
    pub dimensions: Vec<DimensionScore>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupScore>,
}

impl ScoreBreakdown {
    pub fn dimension(&self, id: &str) -> Option<&DimensionScore> {
        self.dimensions.iter().find(|d| d.dimension == id)
    }

    pub fn missing_count(&self) -> usize {
        self.dimensions.iter().filter(|d| d.missing).count()
    }

    /// Dimension with the largest weighted contribution, earliest on a tie
    pub fn top_contributor(&self) -> Option<&DimensionScore> {
        self.dimensions.iter().fold(None, |best: Option<&DimensionScore>, d| match best {
            Some(b) if d.contribution <= b.contribution => Some(b),
            _ => Some(d),
        })
    }
}

/// Scores candidates against one criteria set and one benchmark snapshot
#[derive(Debug, Clone)]
pub struct Scorer {
    criteria: ResolvedCriteria,
    benchmark: BenchmarkProfile,
    missing_penalty: f64,
}

impl Scorer {
    /// Create a scorer. The benchmark is restricted to the criteria and must
    /// carry a usable target for every one of them.
    pub fn new(
        criteria: ResolvedCriteria,
        benchmark: &BenchmarkProfile,
        missing_penalty: f64,
    ) -> Result<Self, BenchmarkError> {
        let benchmark = restrict_to_criteria(benchmark, &criteria)?;
        let missing_penalty = if missing_penalty.is_finite() {
            missing_penalty.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Ok(Self {
            criteria,
            benchmark,
            missing_penalty,
        })
    }

    pub fn criteria(&self) -> &ResolvedCriteria {
        &self.criteria
    }

    pub fn benchmark(&self) -> &BenchmarkProfile {
        &self.benchmark
    }

    pub fn missing_penalty(&self) -> f64 {
        self.missing_penalty
    }

    pub fn into_parts(self) -> (ResolvedCriteria, BenchmarkProfile, f64) {
        (self.criteria, self.benchmark, self.missing_penalty)
    }

    /// Reject vectors that reference dimensions outside the criteria.
    ///
    /// Runs over the whole pool so nothing is scored when one vector is bad.
    pub fn validate<T: AsRef<CandidateVector>>(&self, pool: &[T]) -> Result<(), MatchError> {
        for item in pool {
            let vector: &CandidateVector = item.as_ref();
            let stray = vector
                .dimensions()
                .filter(|d| !self.criteria.contains(d))
                .min();
            if let Some(dimension) = stray {
                return Err(MatchError::DimensionMismatch {
                    employee_id: vector.employee_id.clone(),
                    dimension: dimension.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Score a single candidate
    pub fn score(&self, vector: &CandidateVector) -> ScoreBreakdown {
        let mut dimensions = Vec::with_capacity(self.criteria.len());
        let mut total = 0.0f64;

        for criterion in &self.criteria {
            let observed = vector.get(criterion.id());
            let fit = self
                .benchmark
                .target(criterion.id())
                .and_then(|target| sub_score(criterion, target, observed));

            let (value, missing) = match fit {
                Some(s) => (s, false),
                None => (self.missing_penalty, true),
            };
            let contribution = criterion.weight * value;
            total += contribution;

            dimensions.push(DimensionScore {
                dimension: criterion.id().to_string(),
                weight: criterion.weight,
                sub_score: value,
                contribution,
                observed: observed.clone(),
                missing,
            });
        }

        let score = total.clamp(0.0, 1.0);
        let groups = self.group_scores(&dimensions);
        ScoreBreakdown {
            employee_id: vector.employee_id.clone(),
            score,
            match_rate: score * 100.0,
            dimensions,
            groups,
        }
    }

    /// Validate, then score the whole pool.
    ///
    /// Pools of at least `parallel_threshold` candidates are scored on the
    /// rayon pool; output order matches input order either way.
    pub fn score_all<T>(&self, pool: &[T], parallel_threshold: usize) -> Result<Vec<ScoreBreakdown>, MatchError>
    where
        T: AsRef<CandidateVector> + Sync,
    {
        self.validate(pool)?;

        let parallel = pool.len() >= parallel_threshold.max(1);
        debug!(candidates = pool.len(), parallel, "Scoring candidate pool");
        let scores: Vec<ScoreBreakdown> = if parallel {
            pool.par_iter().map(|c| self.score(c.as_ref())).collect()
        } else {
            pool.iter().map(|c| self.score(c.as_ref())).collect()
        };
        Ok(scores)
    }

    fn group_scores(&self, dimensions: &[DimensionScore]) -> Vec<GroupScore> {
        let mut groups: Vec<(String, f64, f64, f64, usize)> = Vec::new();
        for (criterion, scored) in self.criteria.iter().zip(dimensions) {
            let Some(group) = &criterion.dimension.group else {
                continue;
            };
            let entry = match groups.iter().position(|g| &g.0 == group) {
                Some(i) => &mut groups[i],
                None => {
                    groups.push((group.clone(), 0.0, 0.0, 0.0, 0));
                    let last = groups.len() - 1;
                    &mut groups[last]
                }
            };
            entry.1 += scored.contribution;
            entry.2 += scored.weight;
            entry.3 += scored.sub_score;
            entry.4 += 1;
        }

        groups
            .into_iter()
            .map(|(group, weighted, weight, plain, count)| {
                let score = if weight > 0.0 {
                    weighted / weight
                } else {
                    plain / count as f64
                };
                let score = score.clamp(0.0, 1.0);
                GroupScore {
                    group,
                    score,
                    match_rate: score * 100.0,
                }
            })
            .collect()
    }
}
