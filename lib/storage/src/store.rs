use crate::dataset::{Dataset, DatasetDescription};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use talentx_core::{
    BenchmarkProfile, BenchmarkSummary, Dimension, DimensionCatalog, EmployeeRecord, Error, Filter,
    PoolFilter, Result, TalentSource,
};
use tracing::info;

struct Contents {
    catalog: DimensionCatalog,
    benchmarks: BTreeMap<String, BenchmarkProfile>,
    employees: BTreeMap<String, EmployeeRecord>,
    loaded_at: DateTime<Utc>,
}

impl Contents {
    fn build(dataset: Dataset) -> Result<Self> {
        let catalog = DimensionCatalog::new(dataset.dimensions)?;

        let mut benchmarks = BTreeMap::new();
        for profile in dataset.benchmarks {
            if benchmarks.contains_key(&profile.id) {
                return Err(Error::DuplicateBenchmark(profile.id));
            }
            benchmarks.insert(profile.id.clone(), profile);
        }

        let mut employees = BTreeMap::new();
        for record in dataset.employees {
            if employees.contains_key(record.id()) {
                return Err(Error::DuplicateEmployee(record.profile.employee_id));
            }
            employees.insert(record.id().to_string(), record);
        }

        Ok(Self {
            catalog,
            benchmarks,
            employees,
            loaded_at: Utc::now(),
        })
    }
}

/// One loaded version of the dataset.
///
/// Cheap to clone. A snapshot keeps answering from the data it was taken
/// from after the store it came from has been reloaded.
#[derive(Clone)]
pub struct DatasetSnapshot {
    contents: Arc<Contents>,
}

impl DatasetSnapshot {
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.contents.loaded_at
    }
}

impl TalentSource for DatasetSnapshot {
    fn catalog(&self) -> Result<DimensionCatalog> {
        Ok(self.contents.catalog.clone())
    }

    fn benchmark(&self, id: &str) -> Result<Option<BenchmarkProfile>> {
        Ok(self.contents.benchmarks.get(id).cloned())
    }

    fn employees(&self, filter: Option<&PoolFilter>) -> Result<Vec<EmployeeRecord>> {
        Ok(self
            .contents
            .employees
            .values()
            .filter(|e| filter.map_or(true, |f| f.matches(e)))
            .cloned()
            .collect())
    }

    fn employee(&self, id: &str) -> Result<Option<EmployeeRecord>> {
        Ok(self.contents.employees.get(id).cloned())
    }

    fn snapshot(&self) -> Result<Arc<dyn TalentSource>> {
        Ok(Arc::new(self.clone()))
    }
}

/// In-memory talent dataset, optionally backed by a JSON file.
///
/// A reload swaps in a whole new version. Runs read through
/// [`TalentSource::snapshot`] and never see a mix of the two.
pub struct DatasetStore {
    contents: RwLock<Arc<Contents>>,
    path: Option<PathBuf>,
}

impl DatasetStore {
    /// Build a store from an in-memory dataset
    pub fn from_dataset(dataset: Dataset) -> Result<Self> {
        Ok(Self {
            contents: RwLock::new(Arc::new(Contents::build(dataset)?)),
            path: None,
        })
    }

    /// Load a store from a dataset file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let dataset = Dataset::load(&path).map_err(|e| Error::Storage(e.to_string()))?;
        let contents = Contents::build(dataset)?;
        info!(
            path = %path.display(),
            dimensions = contents.catalog.len(),
            benchmarks = contents.benchmarks.len(),
            employees = contents.employees.len(),
            "Dataset loaded"
        );
        Ok(Self {
            contents: RwLock::new(Arc::new(contents)),
            path: Some(path),
        })
    }

    /// Re-read the backing file. The current data stays in place if the
    /// file cannot be loaded.
    pub fn reload(&self) -> Result<DatasetDescription> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| Error::Storage("Store has no backing file".to_string()))?;
        let dataset = Dataset::load(path).map_err(|e| Error::Storage(e.to_string()))?;
        let contents = Arc::new(Contents::build(dataset)?);
        *self.contents.write() = contents;
        info!(path = %path.display(), "Dataset reloaded");
        Ok(self.describe())
    }

    /// The version currently loaded
    pub fn current(&self) -> DatasetSnapshot {
        DatasetSnapshot {
            contents: self.contents.read().clone(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn describe(&self) -> DatasetDescription {
        let contents = self.current().contents;
        DatasetDescription {
            path: self.path.clone(),
            loaded_at: contents.loaded_at,
            dimensions: contents.catalog.len(),
            benchmarks: contents.benchmarks.len(),
            employees: contents.employees.len(),
        }
    }

    /// Dimensions sorted by id
    pub fn dimensions(&self) -> Vec<Dimension> {
        self.current().contents.catalog.sorted().into_iter().cloned().collect()
    }

    pub fn dimension(&self, id: &str) -> Result<Dimension> {
        self.current()
            .contents
            .catalog
            .get(id)
            .cloned()
            .ok_or_else(|| Error::DimensionNotFound(id.to_string()))
    }

    /// Stored benchmarks sorted by id
    pub fn benchmarks(&self) -> Vec<BenchmarkSummary> {
        self.current()
            .contents
            .benchmarks
            .values()
            .map(BenchmarkSummary::from)
            .collect()
    }
}

impl TalentSource for DatasetStore {
    fn catalog(&self) -> Result<DimensionCatalog> {
        self.current().catalog()
    }

    fn benchmark(&self, id: &str) -> Result<Option<BenchmarkProfile>> {
        self.current().benchmark(id)
    }

    fn employees(&self, filter: Option<&PoolFilter>) -> Result<Vec<EmployeeRecord>> {
        self.current().employees(filter)
    }

    fn employee(&self, id: &str) -> Result<Option<EmployeeRecord>> {
        self.current().employee(id)
    }

    fn snapshot(&self) -> Result<Arc<dyn TalentSource>> {
        Ok(Arc::new(self.current()))
    }
}
