//! # TalentX Core
//!
//! Core data types for the TalentX matching engine.
//!
//! - [`Dimension`] / [`DimensionCatalog`] - scoring axes and their value domains
//! - [`BenchmarkProfile`] / [`Target`] - the reference profile a role is matched against
//! - [`EmployeeRecord`] / [`CandidateVector`] - raw employee rows and their projection onto dimensions
//! - [`PoolFilter`] - population scope for a run
//! - [`TalentSource`] - the read-only data source contract
//!
//! ## Example
//!
//! ```rust
//! use talentx_core::{Dimension, DimensionCatalog, Observation, ValueDomain};
//! use serde_json::json;
//!
//! let catalog = DimensionCatalog::new(vec![
//!     Dimension::numeric("iq", "IQ", 70.0, 145.0).with_group("Cognitive"),
//! ]).unwrap();
//!
//! let iq = catalog.get("iq").unwrap();
//! let observed = Observation::project(Some(&json!(118)), &iq.domain);
//! assert_eq!(observed, Observation::Number(118.0));
//! ```

pub mod error;
pub mod dimension;
pub mod profile;
pub mod candidate;
pub mod filter;
pub mod source;

pub use error::{Error, Result};
pub use dimension::{Dimension, DimensionCatalog, Direction, ValueDomain};
pub use profile::{BenchmarkProfile, BenchmarkSummary, Target};
pub use candidate::{CandidateVector, EmployeeProfile, EmployeeRecord, Observation};
pub use filter::{Filter, FilterCondition, PoolFilter};
pub use source::TalentSource;
