//! Context handed to a narrative generator
//!
//! Nothing here produces text. The context bundles the role, the criteria
//! and benchmark used, and the best few candidates with their strengths and
//! gaps, so whatever writes the narrative works from the same numbers the
//! ranking did.

use crate::criteria::ResolvedCriteria;
use crate::engine::MatchReport;
use crate::explain::explain;
use serde::{Deserialize, Serialize};
use talentx_core::{BenchmarkProfile, EmployeeProfile};

/// Sub-scores below this count as a gap
const GAP_THRESHOLD: f64 = 0.5;

/// Number of strengths listed per candidate
const STRENGTHS: usize = 3;

/// The open role a run is matched for
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleProfile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl RoleProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_job_level(mut self, job_level: impl Into<String>) -> Self {
        self.job_level = Some(job_level.into());
        self
    }

    #[must_use]
    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }
}

/// One of the best candidates, as seen by the narrative step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsightCandidate {
    pub rank: usize,
    pub employee: EmployeeProfile,
    pub match_rate: f64,
    /// Highest-contributing dimensions that are not gaps, strongest first
    pub strengths: Vec<String>,
    /// Dimensions with no data or a weak fit
    pub gaps: Vec<String>,
    /// One line per criterion, see [`explain`]
    pub explanation: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsightContext {
    pub role: RoleProfile,
    pub criteria: ResolvedCriteria,
    pub benchmark: BenchmarkProfile,
    pub avg_match_rate: f64,
    pub candidates: Vec<InsightCandidate>,
}

impl InsightContext {
    /// Build the context from a finished run, keeping the best `limit` results
    pub fn from_report(role: RoleProfile, report: &MatchReport, limit: usize) -> Self {
        let candidates = report
            .results
            .iter()
            .take(limit)
            .map(|matched| {
                let breakdown = &matched.result.breakdown;

                let mut by_contribution: Vec<_> = breakdown
                    .dimensions
                    .iter()
                    .filter(|d| !d.missing && d.sub_score >= GAP_THRESHOLD)
                    .collect();
                // Stable sort keeps criteria order among equal contributions
                by_contribution.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
                let strengths = by_contribution
                    .into_iter()
                    .take(STRENGTHS)
                    .map(|d| d.dimension.clone())
                    .collect();

                let gaps = breakdown
                    .dimensions
                    .iter()
                    .filter(|d| d.missing || d.sub_score < GAP_THRESHOLD)
                    .map(|d| d.dimension.clone())
                    .collect();

                InsightCandidate {
                    rank: matched.result.rank,
                    employee: matched.employee.clone(),
                    match_rate: matched.result.match_rate(),
                    strengths,
                    gaps,
                    explanation: explain(&matched.result, &report.criteria, &report.benchmark),
                }
            })
            .collect();

        Self {
            role,
            criteria: report.criteria.clone(),
            benchmark: report.benchmark.clone(),
            avg_match_rate: report.summary.avg_match_rate,
            candidates,
        }
    }
}
