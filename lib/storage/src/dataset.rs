// JSON dataset files
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use talentx_core::{BenchmarkProfile, Dimension, EmployeeRecord};

/// Everything the matching engine reads, as stored on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    #[serde(default)]
    pub benchmarks: Vec<BenchmarkProfile>,
    #[serde(default)]
    pub employees: Vec<EmployeeRecord>,
}

impl Dataset {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open dataset {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| anyhow!("Failed to parse dataset {}: {}", path.display(), e))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create dataset {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

/// Dataset description for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub loaded_at: DateTime<Utc>,
    pub dimensions: usize,
    pub benchmarks: usize,
    pub employees: usize,
}
