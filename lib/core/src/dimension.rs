//! Scoring dimensions
//!
//! A dimension is one measurable axis an employee is compared on: a
//! personality index, a strength area, a yearly performance rating.
//! Dimensions are declared once in a [`DimensionCatalog`] and referenced by id
//! everywhere else.

use crate::{Error, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// How an observed value relates to the benchmark target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The benchmark target is the ideal; deviation either way costs score
    #[default]
    TargetIsIdeal,
    /// More is better; the target (if any) acts as a threshold
    HigherIsBetter,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::TargetIsIdeal => "target_is_ideal",
            Direction::HigherIsBetter => "higher_is_better",
        }
    }
}

/// Value domain of a dimension
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueDomain {
    /// Numeric scale bounded by `[min, max]`
    Numeric { min: f64, max: f64 },
    /// Categorical value set. An empty set accepts any category.
    Categorical {
        #[serde(default)]
        values: Vec<String>,
    },
}

impl ValueDomain {
    pub fn numeric(min: f64, max: f64) -> Self {
        ValueDomain::Numeric { min, max }
    }

    pub fn categorical<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ValueDomain::Categorical {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueDomain::Numeric { .. })
    }

    /// Width of a numeric domain (`max - min`), `None` for categorical domains
    #[inline]
    pub fn width(&self) -> Option<f64> {
        match self {
            ValueDomain::Numeric { min, max } => Some(max - min),
            ValueDomain::Categorical { .. } => None,
        }
    }

    /// Whether `value` belongs to a categorical domain (case-insensitive)
    pub fn allows_category(&self, value: &str) -> bool {
        match self {
            ValueDomain::Numeric { .. } => false,
            ValueDomain::Categorical { values } => {
                values.is_empty() || values.iter().any(|v| v.eq_ignore_ascii_case(value))
            }
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ValueDomain::Numeric { .. } => "numeric",
            ValueDomain::Categorical { .. } => "categorical",
        }
    }
}

/// A named scoring axis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dimension {
    pub id: String,
    pub display_name: String,
    pub domain: ValueDomain,
    /// Default direction, criteria may override it
    #[serde(default)]
    pub direction: Direction,
    /// Talent group (TGV) this dimension rolls up into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Dimension {
    pub fn numeric(id: impl Into<String>, display_name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            domain: ValueDomain::numeric(min, max),
            direction: Direction::TargetIsIdeal,
            group: None,
        }
    }

    pub fn categorical<I, S>(id: impl Into<String>, display_name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            domain: ValueDomain::categorical(values),
            direction: Direction::TargetIsIdeal,
            group: None,
        }
    }

    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Check the dimension is usable for scoring
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidDimension {
                id: self.id.clone(),
                reason: "id cannot be empty".to_string(),
            });
        }
        match &self.domain {
            ValueDomain::Numeric { min, max } => {
                if !min.is_finite() || !max.is_finite() || max <= min {
                    return Err(Error::InvalidDimension {
                        id: self.id.clone(),
                        reason: format!("numeric domain [{}, {}] must be finite with max > min", min, max),
                    });
                }
                if !(max - min).is_finite() {
                    return Err(Error::InvalidDimension {
                        id: self.id.clone(),
                        reason: format!("numeric domain [{}, {}] is too wide to score", min, max),
                    });
                }
            }
            ValueDomain::Categorical { .. } => {
                if self.direction == Direction::HigherIsBetter {
                    return Err(Error::InvalidDimension {
                        id: self.id.clone(),
                        reason: "categorical dimensions have no ordering".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// The set of dimensions known to the system
#[derive(Debug, Clone, Default)]
pub struct DimensionCatalog {
    dimensions: AHashMap<String, Dimension>,
}

impl DimensionCatalog {
    /// Build a catalog, validating each dimension and rejecting duplicate ids
    pub fn new(dimensions: Vec<Dimension>) -> Result<Self> {
        let mut map = AHashMap::with_capacity(dimensions.len());
        for dimension in dimensions {
            dimension.validate()?;
            if map.contains_key(&dimension.id) {
                return Err(Error::DuplicateDimension(dimension.id));
            }
            map.insert(dimension.id.clone(), dimension);
        }
        Ok(Self { dimensions: map })
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&Dimension> {
        self.dimensions.get(id)
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.dimensions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Dimensions sorted by id
    pub fn sorted(&self) -> Vec<&Dimension> {
        let mut dims: Vec<_> = self.dimensions.values().collect();
        dims.sort_by(|a, b| a.id.cmp(&b.id));
        dims
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_rejects_duplicates() {
        let result = DimensionCatalog::new(vec![
            Dimension::numeric("papi_n", "Need to finish", 0.0, 9.0),
            Dimension::numeric("papi_n", "Need to finish", 0.0, 9.0),
        ]);
        assert!(matches!(result, Err(Error::DuplicateDimension(id)) if id == "papi_n"));
    }

    #[test]
    fn test_catalog_rejects_empty_numeric_domain() {
        let result = DimensionCatalog::new(vec![Dimension::numeric("iq", "IQ", 100.0, 100.0)]);
        assert!(matches!(result, Err(Error::InvalidDimension { .. })));
    }

    #[test]
    fn test_catalog_rejects_overflowing_numeric_domain() {
        let result = DimensionCatalog::new(vec![Dimension::numeric("x", "X", -1e308, 1e308)]);
        assert!(matches!(result, Err(Error::InvalidDimension { id, .. }) if id == "x"));
        assert!(Dimension::numeric("x", "X", -1e307, 1e307).validate().is_ok());
    }

    #[test]
    fn test_categorical_cannot_be_higher_is_better() {
        let dim = Dimension::categorical("mbti", "MBTI", ["INTJ", "ENFP"])
            .with_direction(Direction::HigherIsBetter);
        assert!(dim.validate().is_err());
    }

    #[test]
    fn test_allows_category_is_case_insensitive() {
        let domain = ValueDomain::categorical(["Analytical", "Achiever"]);
        assert!(domain.allows_category("analytical"));
        assert!(!domain.allows_category("Futuristic"));
        assert!(ValueDomain::categorical(Vec::<String>::new()).allows_category("anything"));
    }

    #[test]
    fn test_sorted_is_deterministic() {
        let catalog = DimensionCatalog::new(vec![
            Dimension::numeric("rating", "Rating", 1.0, 5.0),
            Dimension::numeric("iq", "IQ", 70.0, 145.0),
            Dimension::categorical("strength_1", "Top strength", Vec::<String>::new()),
        ])
        .unwrap();
        let ids: Vec<_> = catalog.sorted().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["iq", "rating", "strength_1"]);
    }

    #[test]
    fn test_domain_serde_shape() {
        let dim = Dimension::numeric("iq", "IQ", 70.0, 145.0).with_group("Cognitive");
        let json = serde_json::to_value(&dim).unwrap();
        assert_eq!(json["domain"]["kind"], "numeric");
        assert_eq!(json["direction"], "target_is_ideal");
        assert_eq!(json["group"], "Cognitive");
    }
}
