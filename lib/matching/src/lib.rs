//! # TalentX Matching
//!
//! The talent matching scoring engine: matches employees against a
//! benchmark profile for an open role and returns an explainable ranking.
//!
//! ## Pipeline
//!
//! - **Criteria**: role entries validated against the dimension catalog, weights normalized
//! - **Benchmark**: stored profile (or 1-3 reference employees) restricted to the criteria
//! - **Pool**: every employee in scope, gaps made explicit
//! - **Scorer**: per-dimension fit in [0, 1], weighted aggregate, TGV group rates
//! - **Ranker**: aggregate descending with deterministic tie-breaks
//! - **Explainability**: run summary, histogram, insight context
//!
//! ## Example
//!
//! ```rust
//! use talentx_core::{BenchmarkProfile, Dimension, DimensionCatalog, EmployeeRecord, Target};
//! use talentx_matching::{build_pool, match_candidates, CriterionInput, EngineConfig, ResolvedCriteria};
//! use serde_json::json;
//!
//! let catalog = DimensionCatalog::new(vec![
//!     Dimension::numeric("A", "Analytical", 0.0, 100.0),
//!     Dimension::numeric("B", "Drive", 0.0, 100.0),
//! ]).unwrap();
//! let criteria = ResolvedCriteria::resolve(
//!     &[CriterionInput::new("A", 0.5), CriterionInput::new("B", 0.5)],
//!     &catalog,
//! ).unwrap();
//!
//! let benchmark = BenchmarkProfile::new("b1", "Senior Analyst")
//!     .with_target("A", Target::value(80.0))
//!     .with_target("B", Target::value(50.0));
//!
//! let pool = build_pool(vec![
//!     EmployeeRecord::new("X", "Xena").with_attribute("A", json!(80)).with_attribute("B", json!(50)),
//!     EmployeeRecord::new("Y", "Yusuf").with_attribute("A", json!(60)).with_attribute("B", json!(70)),
//! ], &criteria);
//!
//! let report = match_candidates(criteria, &benchmark, pool, &EngineConfig::default()).unwrap();
//! assert_eq!(report.results[0].result.employee_id(), "X");
//! assert!((report.results[1].result.score() - 0.8).abs() < 1e-9);
//! ```

pub mod benchmark;
pub mod config;
pub mod criteria;
pub mod distance;
pub mod engine;
pub mod error;
pub mod explain;
pub mod insight;
pub mod pool;
pub mod rank;
pub mod scorer;

pub use benchmark::{from_references, load_benchmark, restrict_to_criteria, MAX_REFERENCES};
pub use config::EngineConfig;
pub use criteria::{CriterionInput, ResolvedCriteria, WeightedCriterion};
pub use engine::{match_candidates, BenchmarkSelector, MatchEngine, MatchReport, MatchRequest, MatchedCandidate};
pub use error::{BenchmarkError, CriteriaError, MatchError, Result};
pub use explain::{explain, GroupAverage, HistogramBin, MatchSummary};
pub use insight::{InsightCandidate, InsightContext, RoleProfile};
pub use pool::{build_pool, load_pool, Candidate, PoolStats};
pub use rank::{rank, RankedResult};
pub use scorer::{DimensionScore, GroupScore, ScoreBreakdown, Scorer};
