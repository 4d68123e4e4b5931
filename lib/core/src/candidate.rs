//! Employee records and candidate vectors

use crate::dimension::ValueDomain;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// An observed value for one dimension, or an explicit gap
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Observation {
    Number(f64),
    Category(String),
    Missing,
}

impl Observation {
    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, Observation::Missing)
    }

    /// Interpret a raw attribute against a dimension's domain.
    ///
    /// Returns `Missing` for absent values, `null`, non-finite numbers and
    /// values whose type does not fit the domain.
    pub fn project(raw: Option<&Value>, domain: &ValueDomain) -> Self {
        let Some(raw) = raw else {
            return Observation::Missing;
        };
        match domain {
            ValueDomain::Numeric { .. } => match raw.as_f64() {
                Some(n) if n.is_finite() => Observation::Number(n),
                _ => Observation::Missing,
            },
            ValueDomain::Categorical { .. } => match raw {
                Value::String(s) if !s.trim().is_empty() => Observation::Category(s.trim().to_string()),
                Value::Number(n) => Observation::Category(n.to_string()),
                Value::Bool(b) => Observation::Category(b.to_string()),
                _ => Observation::Missing,
            },
        }
    }

    /// Whether a raw, non-null attribute was discarded by [`Observation::project`]
    pub fn was_coerced(raw: Option<&Value>, projected: &Observation) -> bool {
        matches!(raw, Some(v) if !v.is_null()) && projected.is_missing()
    }
}

impl std::fmt::Display for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Observation::Number(n) => write!(f, "{}", n),
            Observation::Category(c) => write!(f, "{}", c),
            Observation::Missing => write!(f, "n/a"),
        }
    }
}

/// One employee's observed values keyed by dimension id
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateVector {
    pub employee_id: String,
    values: AHashMap<String, Observation>,
}

impl CandidateVector {
    pub fn new(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            values: AHashMap::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, dimension: impl Into<String>, observation: Observation) -> Self {
        self.insert(dimension, observation);
        self
    }

    pub fn insert(&mut self, dimension: impl Into<String>, observation: Observation) {
        self.values.insert(dimension.into(), observation);
    }

    /// Observation for `dimension`; an unlisted dimension reads as missing
    #[inline]
    pub fn get(&self, dimension: &str) -> &Observation {
        self.values.get(dimension).unwrap_or(&Observation::Missing)
    }

    /// Dimension ids this vector carries an entry for
    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of entries that are explicitly missing
    pub fn missing_count(&self) -> usize {
        self.values.values().filter(|o| o.is_missing()).count()
    }
}

impl AsRef<CandidateVector> for CandidateVector {
    fn as_ref(&self) -> &CandidateVector {
        self
    }
}

/// Descriptive employee data shown next to a score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmployeeProfile {
    pub employee_id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directorate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

/// A stored employee row with its raw attributes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmployeeRecord {
    #[serde(flatten)]
    pub profile: EmployeeProfile,
    /// Raw attribute values keyed by dimension id
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

impl EmployeeRecord {
    pub fn new(employee_id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            profile: EmployeeProfile {
                employee_id: employee_id.into(),
                full_name: full_name.into(),
                position: None,
                directorate: None,
                grade: None,
            },
            attributes: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.profile.employee_id
    }

    #[must_use]
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.profile.position = Some(position.into());
        self
    }

    #[must_use]
    pub fn with_directorate(mut self, directorate: impl Into<String>) -> Self {
        self.profile.directorate = Some(directorate.into());
        self
    }

    #[must_use]
    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.profile.grade = Some(grade.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, dimension: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(dimension.into(), value);
        self
    }

    #[inline]
    pub fn attribute(&self, dimension: &str) -> Option<&Value> {
        self.attributes.get(dimension)
    }
}
