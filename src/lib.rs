//! # TalentX
//!
//! Explainable talent matching: rank employees against a benchmark profile
//! for an open role, with a sub-score for every dimension.
//!
//! The engine applies a fixed, auditable formula. Each criterion gets a fit
//! in [0, 1] against the benchmark target, missing data is scored with a
//! configurable penalty instead of dropping the employee, and the weighted
//! sum is ranked with deterministic tie-breaks.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! talentx --data-file ./data/talent.json --http-port 8080
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use talentx::prelude::*;
//! use std::sync::Arc;
//!
//! let store = Arc::new(DatasetStore::open("data/talent.json").unwrap());
//! let engine = MatchEngine::new(store, EngineConfig::default()).unwrap();
//!
//! let request = MatchRequest::new(
//!     vec![CriterionInput::new("iq", 2.0), CriterionInput::new("papi_n", 1.0)],
//!     BenchmarkSelector::Id("senior-data-analyst".to_string()),
//! );
//! let report = engine.run(&request).unwrap();
//! for matched in report.results.iter().take(10) {
//!     println!("{} {} {:.1}", matched.result.rank, matched.employee.full_name, matched.result.match_rate());
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - [`talentx-core`](https://docs.rs/talentx-core) - Dimensions, benchmarks, employee records, filters
//! - [`talentx-matching`](https://docs.rs/talentx-matching) - Criteria, scoring, ranking, summaries
//! - [`talentx-storage`](https://docs.rs/talentx-storage) - JSON dataset store
//! - [`talentx-api`](https://docs.rs/talentx-api) - REST API

// Re-export core types
pub use talentx_core::{
    BenchmarkProfile, BenchmarkSummary, CandidateVector, Dimension, DimensionCatalog, Direction,
    EmployeeProfile, EmployeeRecord, Error, Filter, FilterCondition, Observation, PoolFilter,
    Result, TalentSource, Target, ValueDomain,
};

// Re-export matching
pub use talentx_matching::{
    BenchmarkSelector, CriterionInput, EngineConfig, InsightContext, MatchEngine, MatchError,
    MatchReport, MatchRequest, MatchSummary, RankedResult, ResolvedCriteria, RoleProfile,
    ScoreBreakdown, Scorer,
};

// Re-export storage
pub use talentx_storage::{Dataset, DatasetSnapshot, DatasetStore};

// Re-export API
pub use talentx_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BenchmarkProfile, BenchmarkSelector, CriterionInput, Dataset, DatasetStore, Dimension,
        Direction, EmployeeRecord, EngineConfig, MatchEngine, MatchError, MatchReport,
        MatchRequest, PoolFilter, RestApi, RoleProfile, TalentSource, Target,
    };
}
