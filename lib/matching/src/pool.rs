//! Candidate pool loading
//!
//! Every employee the filter admits becomes a candidate, complete data or
//! not. Attributes are projected onto the criteria dimensions with explicit
//! `Missing` entries, so the scorer sees the same dimension set for everyone.

use crate::criteria::ResolvedCriteria;
use crate::error::MatchError;
use serde::{Deserialize, Serialize};
use talentx_core::{CandidateVector, EmployeeProfile, EmployeeRecord, Observation, PoolFilter, TalentSource};
use tracing::{debug, warn};

/// A pool member: descriptive profile plus its aligned vector
#[derive(Debug, Clone)]
pub struct Candidate {
    pub profile: EmployeeProfile,
    pub vector: CandidateVector,
}

impl AsRef<CandidateVector> for Candidate {
    fn as_ref(&self) -> &CandidateVector {
        &self.vector
    }
}

/// Completeness counts for a loaded pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    pub candidates: usize,
    /// Candidates with every criterion present
    pub complete: usize,
    /// Candidates with no criterion present
    pub empty: usize,
    /// Total missing (candidate, dimension) pairs
    pub missing_values: usize,
}

impl PoolStats {
    pub fn compute(pool: &[Candidate], dimensions: usize) -> Self {
        let mut stats = PoolStats {
            candidates: pool.len(),
            ..Default::default()
        };
        for candidate in pool {
            let missing = candidate.vector.missing_count();
            stats.missing_values += missing;
            if missing == 0 {
                stats.complete += 1;
            }
            if missing == dimensions {
                stats.empty += 1;
            }
        }
        stats
    }
}

/// Align one employee's attributes with the criteria dimensions
pub fn project(record: &EmployeeRecord, criteria: &ResolvedCriteria) -> CandidateVector {
    let mut vector = CandidateVector::new(record.id());
    for criterion in criteria {
        let raw = record.attribute(criterion.id());
        let observation = Observation::project(raw, &criterion.dimension.domain);
        if Observation::was_coerced(raw, &observation) {
            warn!(
                employee = %record.id(),
                dimension = %criterion.id(),
                "Attribute does not fit the dimension domain, treating as missing"
            );
        }
        vector.insert(criterion.id(), observation);
    }
    vector
}

/// Project already-fetched records into a candidate pool
pub fn build_pool(records: Vec<EmployeeRecord>, criteria: &ResolvedCriteria) -> Vec<Candidate> {
    records
        .into_iter()
        .map(|record| {
            let vector = project(&record, criteria);
            Candidate {
                profile: record.profile,
                vector,
            }
        })
        .collect()
}

/// Fetch the population matching `filter` and project it onto `criteria`
pub fn load_pool<S: TalentSource + ?Sized>(
    source: &S,
    filter: Option<&PoolFilter>,
    criteria: &ResolvedCriteria,
) -> Result<Vec<Candidate>, MatchError> {
    let records = source.employees(filter)?;
    let pool = build_pool(records, criteria);
    debug!(candidates = pool.len(), "Candidate pool loaded");
    Ok(pool)
}
