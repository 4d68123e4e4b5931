//! Matching runs
//!
//! `Resolve -> Load Benchmark -> Load Pool -> Validate -> Score -> Rank`.
//! Every fallible step happens before the first candidate is scored. A run
//! reads the catalog, benchmark and pool from a single
//! [`TalentSource::snapshot`], so reruns over the same data return identical
//! reports and a concurrent reload never mixes two datasets into one run.

use crate::benchmark::{from_references, load_benchmark, MAX_REFERENCES};
use crate::config::EngineConfig;
use crate::criteria::{CriterionInput, ResolvedCriteria};
use crate::error::{BenchmarkError, Result};
use crate::explain::MatchSummary;
use crate::insight::{InsightContext, RoleProfile};
use crate::pool::{load_pool, Candidate, PoolStats};
use crate::rank::{rank, RankedResult};
use crate::scorer::Scorer;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use talentx_core::{BenchmarkProfile, EmployeeProfile, EmployeeRecord, PoolFilter, TalentSource};
use tracing::{debug, info};

/// Where a run's benchmark comes from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkSelector {
    /// A stored benchmark profile
    Id(String),
    /// Derived from 1 to 3 reference employees, who leave the pool
    Employees(Vec<String>),
}

/// A matching request as submitted by the role form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchRequest {
    #[serde(default)]
    pub role: RoleProfile,
    pub criteria: Vec<CriterionInput>,
    pub benchmark: BenchmarkSelector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<PoolFilter>,
}

impl MatchRequest {
    pub fn new(criteria: Vec<CriterionInput>, benchmark: BenchmarkSelector) -> Self {
        Self {
            role: RoleProfile::default(),
            criteria,
            benchmark,
            filter: None,
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: RoleProfile) -> Self {
        self.role = role;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: PoolFilter) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// A ranked result together with the employee it belongs to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchedCandidate {
    #[serde(flatten)]
    pub result: RankedResult,
    pub employee: EmployeeProfile,
}

/// Everything a run produced
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchReport {
    pub criteria: ResolvedCriteria,
    /// Snapshot the run scored against, restricted to the criteria
    pub benchmark: BenchmarkProfile,
    /// Best first
    pub results: Vec<MatchedCandidate>,
    pub summary: MatchSummary,
    pub pool: PoolStats,
}

impl MatchReport {
    pub fn result(&self, employee_id: &str) -> Option<&MatchedCandidate> {
        self.results.iter().find(|r| r.result.employee_id() == employee_id)
    }
}

/// Score and rank an already-loaded pool.
///
/// The benchmark is restricted to `criteria` here as well, so callers may
/// pass a full stored profile.
pub fn match_candidates(
    criteria: ResolvedCriteria,
    benchmark: &BenchmarkProfile,
    pool: Vec<Candidate>,
    config: &EngineConfig,
) -> Result<MatchReport> {
    let scorer = Scorer::new(criteria, benchmark, config.missing_penalty)?;
    let scores = scorer.score_all(&pool, config.parallel_threshold)?;
    let stats = PoolStats::compute(&pool, scorer.criteria().len());

    let ranked = rank(scores, scorer.criteria());
    let summary = MatchSummary::compute(&ranked, config);

    let mut profiles: AHashMap<String, EmployeeProfile> = pool
        .into_iter()
        .map(|c| (c.profile.employee_id.clone(), c.profile))
        .collect();
    let results = ranked
        .into_iter()
        .map(|result| {
            let employee = profiles
                .remove(result.employee_id())
                .unwrap_or_else(|| EmployeeProfile {
                    employee_id: result.employee_id().to_string(),
                    full_name: String::new(),
                    position: None,
                    directorate: None,
                    grade: None,
                });
            MatchedCandidate { result, employee }
        })
        .collect();

    let (criteria, benchmark, _) = scorer.into_parts();
    Ok(MatchReport {
        criteria,
        benchmark,
        results,
        summary,
        pool: stats,
    })
}

/// Runs matching requests against one data source
pub struct MatchEngine<S: TalentSource> {
    source: S,
    config: EngineConfig,
}

impl<S: TalentSource> MatchEngine<S> {
    pub fn new(source: S, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { source, config })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate a role's criteria against the current catalog
    pub fn resolve_criteria(&self, inputs: &[CriterionInput]) -> Result<ResolvedCriteria> {
        resolve_criteria(&self.source, inputs)
    }

    /// Execute a full matching run
    pub fn run(&self, request: &MatchRequest) -> Result<MatchReport> {
        info!(
            role = %request.role.name,
            criteria = request.criteria.len(),
            "Starting matching run"
        );

        let snapshot = self.source.snapshot()?;
        let view = snapshot.as_ref();

        let criteria = resolve_criteria(view, &request.criteria)?;
        debug!(dimensions = criteria.len(), "Criteria resolved");

        let (benchmark, references) = resolve_benchmark(view, &request.benchmark, &criteria)?;
        debug!(benchmark = %benchmark.id, version = benchmark.version, "Benchmark loaded");

        let filter = match (&request.filter, references.is_empty()) {
            (None, true) => None,
            (filter, _) => Some(
                filter
                    .clone()
                    .unwrap_or_default()
                    .excluding(references.iter().cloned()),
            ),
        };
        let pool = load_pool(view, filter.as_ref(), &criteria)?;

        let report = match_candidates(criteria, &benchmark, pool, &self.config)?;
        info!(
            candidates = report.summary.candidates_count,
            best = report.summary.best_match_rate,
            "Matching run finished"
        );
        Ok(report)
    }

    /// Run a request and package the best results for a narrative generator
    pub fn insights(&self, request: &MatchRequest) -> Result<InsightContext> {
        let report = self.run(request)?;
        Ok(InsightContext::from_report(
            request.role.clone(),
            &report,
            self.config.insight_top_n,
        ))
    }
}

fn resolve_criteria<S: TalentSource + ?Sized>(source: &S, inputs: &[CriterionInput]) -> Result<ResolvedCriteria> {
    let catalog = source.catalog()?;
    Ok(ResolvedCriteria::resolve(inputs, &catalog)?)
}

/// Resolve the benchmark and the ids of any reference employees
fn resolve_benchmark(
    source: &dyn TalentSource,
    selector: &BenchmarkSelector,
    criteria: &ResolvedCriteria,
) -> Result<(BenchmarkProfile, Vec<String>)> {
    match selector {
        BenchmarkSelector::Id(id) => Ok((load_benchmark(source, id, criteria)?, Vec::new())),
        BenchmarkSelector::Employees(ids) => {
            let mut unique: Vec<String> = Vec::with_capacity(ids.len());
            for id in ids {
                if !unique.contains(id) {
                    unique.push(id.clone());
                }
            }
            if unique.is_empty() || unique.len() > MAX_REFERENCES {
                return Err(BenchmarkError::ReferenceCount(unique.len()).into());
            }

            let references = unique
                .iter()
                .map(|id| {
                    source
                        .employee(id)?
                        .ok_or_else(|| talentx_core::Error::EmployeeNotFound(id.clone()))
                })
                .collect::<talentx_core::Result<Vec<EmployeeRecord>>>()?;

            let benchmark = from_references(
                format!("ref:{}", unique.join("+")),
                reference_name(&references),
                &references,
                criteria,
            )?;
            Ok((benchmark, unique))
        }
    }
}

fn reference_name(references: &[EmployeeRecord]) -> String {
    let names: Vec<&str> = references
        .iter()
        .map(|r| {
            if r.profile.full_name.is_empty() {
                r.id()
            } else {
                r.profile.full_name.as_str()
            }
        })
        .collect();
    format!("Benchmark: {}", names.join(", "))
}
