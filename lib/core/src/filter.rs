// Candidate pool filters
use crate::candidate::EmployeeRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub trait Filter {
    fn matches(&self, employee: &EmployeeRecord) -> bool;
}

/// Population scope for a matching run.
///
/// Every list is an any-of match (case-insensitive); empty lists do not
/// restrict. `condition` is applied on top for finer scoping.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PoolFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directorates: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grades: Vec<String>,
    /// Employee ids never included in the pool
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<FilterCondition>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FilterCondition {
    Equals { field: String, value: Value },
    NotEquals { field: String, value: Value },
    GreaterEqual { field: String, value: f64 },
    LessEqual { field: String, value: f64 },
    Contains { field: String, value: String },
    And { conditions: Vec<FilterCondition> },
    Or { conditions: Vec<FilterCondition> },
    Not { condition: Box<FilterCondition> },
}

impl PoolFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn position(mut self, position: impl Into<String>) -> Self {
        self.positions.push(position.into());
        self
    }

    #[must_use]
    pub fn directorate(mut self, directorate: impl Into<String>) -> Self {
        self.directorates.push(directorate.into());
        self
    }

    #[must_use]
    pub fn grade(mut self, grade: impl Into<String>) -> Self {
        self.grades.push(grade.into());
        self
    }

    #[must_use]
    pub fn excluding<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(ids.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: FilterCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    fn any_of(allowed: &[String], value: Option<&String>) -> bool {
        if allowed.is_empty() {
            return true;
        }
        value
            .map(|v| allowed.iter().any(|a| a.eq_ignore_ascii_case(v)))
            .unwrap_or(false)
    }

    /// Profile columns first, then raw attributes
    fn get_field_value(employee: &EmployeeRecord, field: &str) -> Option<Value> {
        let profile = &employee.profile;
        match field {
            "employee_id" => Some(Value::String(profile.employee_id.clone())),
            "full_name" => Some(Value::String(profile.full_name.clone())),
            "position" => profile.position.clone().map(Value::String),
            "directorate" => profile.directorate.clone().map(Value::String),
            "grade" => profile.grade.clone().map(Value::String),
            other => employee.attribute(other).cloned(),
        }
    }

    fn matches_condition(condition: &FilterCondition, employee: &EmployeeRecord) -> bool {
        match condition {
            FilterCondition::Equals { field, value } => Self::get_field_value(employee, field)
                .map(|v| &v == value)
                .unwrap_or(false),
            FilterCondition::NotEquals { field, value } => Self::get_field_value(employee, field)
                .map(|v| &v != value)
                .unwrap_or(true),
            FilterCondition::GreaterEqual { field, value } => Self::get_field_value(employee, field)
                .and_then(|v| v.as_f64())
                .map(|v| v >= *value)
                .unwrap_or(false),
            FilterCondition::LessEqual { field, value } => Self::get_field_value(employee, field)
                .and_then(|v| v.as_f64())
                .map(|v| v <= *value)
                .unwrap_or(false),
            FilterCondition::Contains { field, value } => Self::get_field_value(employee, field)
                .and_then(|v| v.as_str().map(|s| s.to_lowercase()))
                .map(|v| v.contains(&value.to_lowercase()))
                .unwrap_or(false),
            FilterCondition::And { conditions } => {
                conditions.iter().all(|c| Self::matches_condition(c, employee))
            }
            FilterCondition::Or { conditions } => {
                conditions.iter().any(|c| Self::matches_condition(c, employee))
            }
            FilterCondition::Not { condition } => !Self::matches_condition(condition, employee),
        }
    }
}

impl Filter for PoolFilter {
    fn matches(&self, employee: &EmployeeRecord) -> bool {
        let profile = &employee.profile;
        if self.exclude.iter().any(|id| id == &profile.employee_id) {
            return false;
        }
        Self::any_of(&self.positions, profile.position.as_ref())
            && Self::any_of(&self.directorates, profile.directorate.as_ref())
            && Self::any_of(&self.grades, profile.grade.as_ref())
            && self
                .condition
                .as_ref()
                .map(|c| Self::matches_condition(c, employee))
                .unwrap_or(true)
    }
}
