//! Read-only data source contract
//!
//! Matching never owns storage. Whatever holds dimensions, benchmarks and
//! employee attributes implements [`TalentSource`] and hands out owned
//! copies; the engine treats them as already-resolved data.

use crate::{BenchmarkProfile, DimensionCatalog, EmployeeRecord, PoolFilter, Result};
use std::sync::Arc;

pub trait TalentSource: Send + Sync {
    /// All known scoring dimensions
    fn catalog(&self) -> Result<DimensionCatalog>;

    /// A benchmark snapshot, `None` when the id is unknown
    fn benchmark(&self, id: &str) -> Result<Option<BenchmarkProfile>>;

    /// Every employee matching `filter`, regardless of data completeness
    fn employees(&self, filter: Option<&PoolFilter>) -> Result<Vec<EmployeeRecord>>;

    /// A single employee, `None` when the id is unknown
    fn employee(&self, id: &str) -> Result<Option<EmployeeRecord>>;

    /// A fixed view of the current data.
    ///
    /// Every read through the returned source sees the same dataset, even if
    /// this source is reloaded in the meantime.
    fn snapshot(&self) -> Result<Arc<dyn TalentSource>>;
}

impl<T: TalentSource + ?Sized> TalentSource for Arc<T> {
    fn catalog(&self) -> Result<DimensionCatalog> {
        (**self).catalog()
    }

    fn benchmark(&self, id: &str) -> Result<Option<BenchmarkProfile>> {
        (**self).benchmark(id)
    }

    fn employees(&self, filter: Option<&PoolFilter>) -> Result<Vec<EmployeeRecord>> {
        (**self).employees(filter)
    }

    fn employee(&self, id: &str) -> Result<Option<EmployeeRecord>> {
        (**self).employee(id)
    }

    fn snapshot(&self) -> Result<Arc<dyn TalentSource>> {
        (**self).snapshot()
    }
}
