//! Query invocation request types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::QueryType;

/// One query target collected by the host panel editor.
///
/// A target produces at most one output field; a target whose resolved
/// `query_text` is empty produces none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryTarget {
    pub query_type: QueryType,
    #[serde(default)]
    pub query_text: Option<String>,
    pub field_name: String,
}

impl QueryTarget {
    #[must_use]
    pub fn new(query_type: QueryType, query_text: &str, field_name: &str) -> Self {
        Self {
            query_type,
            query_text: Some(query_text.to_string()),
            field_name: field_name.to_string(),
        }
    }
}

/// Inclusive time window an invocation is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeRange {
    #[must_use]
    pub const fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// `from <= instant <= to`.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant <= self.to
    }
}

/// A query invocation: a time window and the ordered targets to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub range: TimeRange,
    pub targets: Vec<QueryTarget>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn range_bounds_are_inclusive() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        let range = TimeRange::new(from, to);

        assert!(range.contains(from));
        assert!(range.contains(to));
        assert!(!range.contains(from - chrono::Duration::milliseconds(1)));
        assert!(!range.contains(to + chrono::Duration::milliseconds(1)));
    }

    #[test]
    fn target_decodes_host_shape() {
        let target: QueryTarget = serde_json::from_str(
            r#"{"queryType": "Traps", "queryText": "$[*].id", "fieldName": "ID"}"#,
        )
        .unwrap();
        assert_eq!(target, QueryTarget::new(QueryType::Traps, "$[*].id", "ID"));
    }

    #[test]
    fn target_without_text_decodes() {
        let target: QueryTarget =
            serde_json::from_str(r#"{"queryType": "Samplings", "fieldName": "X"}"#).unwrap();
        assert!(target.query_text.is_none());
    }
}
