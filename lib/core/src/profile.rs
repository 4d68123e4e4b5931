//! Benchmark profiles
//!
//! A benchmark is the reference "ideal employee" for a role: one target per
//! dimension. Profiles are plain values; a matching run takes its own copy so
//! every candidate is scored against the same snapshot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reference target for one dimension
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Target {
    /// Numeric point target
    Value { value: f64 },
    /// Numeric ideal band `[low, high]`
    Range { low: f64, high: f64 },
    /// Ideal categories, any of which is a full match
    Categories { values: Vec<String> },
    /// No fixed target, the domain maximum is ideal
    Open,
}

impl Target {
    pub fn value(value: f64) -> Self {
        Target::Value { value }
    }

    pub fn range(low: f64, high: f64) -> Self {
        Target::Range { low, high }
    }

    pub fn categories<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Target::Categories {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Target::Value { .. } | Target::Range { .. } | Target::Open)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Target::Value { .. } => "value",
            Target::Range { .. } => "range",
            Target::Categories { .. } => "categories",
            Target::Open => "open",
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Value { value } => write!(f, "{}", value),
            Target::Range { low, high } => write!(f, "{}..{}", low, high),
            Target::Categories { values } => write!(f, "{}", values.join(" | ")),
            Target::Open => write!(f, "max"),
        }
    }
}

fn default_version() -> u32 {
    1
}

/// A named, versioned reference profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BenchmarkProfile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_version")]
    pub version: u32,
    /// Targets keyed by dimension id
    #[serde(default)]
    pub targets: BTreeMap<String, Target>,
}

impl BenchmarkProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: 1,
            targets: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_target(mut self, dimension: impl Into<String>, target: Target) -> Self {
        self.targets.insert(dimension.into(), target);
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    #[inline]
    pub fn target(&self, dimension: &str) -> Option<&Target> {
        self.targets.get(dimension)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Listing entry for a stored benchmark
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BenchmarkSummary {
    pub id: String,
    pub name: String,
    pub version: u32,
    pub dimensions: usize,
}

impl From<&BenchmarkProfile> for BenchmarkSummary {
    fn from(profile: &BenchmarkProfile) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            version: profile.version,
            dimensions: profile.targets.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_json_shape() {
        let profile = BenchmarkProfile::new("da-senior", "Senior Data Analyst")
            .with_target("iq", Target::value(120.0))
            .with_target("strength", Target::categories(["Analytical"]))
            .with_target("rating", Target::Open);

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["targets"]["iq"]["kind"], "value");
        assert_eq!(json["targets"]["iq"]["value"], 120.0);
        assert_eq!(json["targets"]["rating"]["kind"], "open");
        assert_eq!(json["version"], 1);
    }

    #[test]
    fn test_version_defaults_when_absent() {
        let profile: BenchmarkProfile = serde_json::from_str(
            r#"{"id": "b1", "targets": {"iq": {"kind": "range", "low": 110, "high": 125}}}"#,
        )
        .unwrap();
        assert_eq!(profile.version, 1);
        assert_eq!(profile.target("iq"), Some(&Target::range(110.0, 125.0)));
    }

    #[test]
    fn test_target_display() {
        assert_eq!(Target::value(80.0).to_string(), "80");
        assert_eq!(Target::range(3.0, 4.5).to_string(), "3..4.5");
        assert_eq!(Target::categories(["A", "B"]).to_string(), "A | B");
        assert_eq!(Target::Open.to_string(), "max");
    }

    #[test]
    fn test_summary_from_profile() {
        let profile = BenchmarkProfile::new("b1", "Bench")
            .with_version(3)
            .with_target("iq", Target::value(100.0));
        let summary = BenchmarkSummary::from(&profile);
        assert_eq!(summary.version, 3);
        assert_eq!(summary.dimensions, 1);
    }
}
