//! Response types returned by the data source.
//!
//! These structs define the shape of query, variable-listing and health-check
//! output as rendered by `trapq`.

use serde::{Deserialize, Serialize};

use crate::enums::FieldType;

/// Name of the field substituted for an empty `$[*].id` result.
pub const PLACEHOLDER_FIELD: &str = "Placeholder";

/// One output column: the matched values of a single query target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub values: Vec<String>,
}

impl Field {
    /// A generic-typed field.
    #[must_use]
    pub fn other(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Other,
            values,
        }
    }

    /// The single-row placeholder used when an identifiers query matched nothing.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::other(PLACEHOLDER_FIELD, vec![String::new()])
    }
}

/// A table-like collection of fields. Fields are not required to be of
/// equal length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFrame {
    pub fields: Vec<Field>,
}

impl DataFrame {
    #[must_use]
    pub const fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// True when every field has zero values (vacuously true without fields).
    #[must_use]
    pub fn all_values_empty(&self) -> bool {
        self.fields.iter().all(|f| f.values.is_empty())
    }
}

/// Result of one query invocation. A failed invocation carries no frames.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub data: Vec<DataFrame>,
}

impl QueryResponse {
    #[must_use]
    pub const fn empty() -> Self {
        Self { data: Vec::new() }
    }

    #[must_use]
    pub fn single(frame: DataFrame) -> Self {
        Self { data: vec![frame] }
    }

    /// All fields across all frames, in order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.data.iter().flat_map(|frame| frame.fields.iter())
    }
}

/// One listed variable value; `text` always equals `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricFindValue {
    pub text: String,
    pub value: String,
}

impl MetricFindValue {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            text: value.clone(),
            value,
        }
    }
}

/// Response from the data source health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

impl HealthStatus {
    #[must_use]
    pub fn success() -> Self {
        Self {
            status: String::from("success"),
            message: String::from("Success"),
        }
    }
}
