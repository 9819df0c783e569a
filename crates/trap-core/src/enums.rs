//! Query types, variable names and output field types.
//!
//! `QueryType` and `VariableQuery` use the exact spelling the host panel sends
//! (`Traps`, `Samplings`, `Persons`, `EntryPoints`).

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// QueryType
// ---------------------------------------------------------------------------

/// Which collection a query target is evaluated against.
///
/// Any name other than `Traps` or `Samplings` decodes to `Unknown`; such a
/// target still produces its field, with no values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryType {
    Traps,
    Samplings,
    #[serde(other)]
    Unknown,
}

impl QueryType {
    /// Parse the host's spelling; anything unrecognized is `Unknown`.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "Traps" => Self::Traps,
            "Samplings" => Self::Samplings,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Traps => "Traps",
            Self::Samplings => "Samplings",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// VariableQuery
// ---------------------------------------------------------------------------

/// Logical variable names the data source can list values for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableQuery {
    /// Distinct person identifiers across all samplings' analyses.
    Persons,
    /// Distinct entry-point labels across all traps.
    EntryPoints,
}

impl VariableQuery {
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "Persons" => Some(Self::Persons),
            "EntryPoints" => Some(Self::EntryPoints),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Persons => "Persons",
            Self::EntryPoints => "EntryPoints",
        }
    }
}

impl fmt::Display for VariableQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FieldType
// ---------------------------------------------------------------------------

/// Value type of an output field. Matched values are always serialized to
/// text, so every field is generic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    #[default]
    Other,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Traps", QueryType::Traps)]
    #[case("Samplings", QueryType::Samplings)]
    #[case("traps", QueryType::Unknown)]
    #[case("", QueryType::Unknown)]
    fn query_type_parse(#[case] input: &str, #[case] expected: QueryType) {
        assert_eq!(QueryType::parse(input), expected);
    }

    #[test]
    fn unknown_query_type_deserializes() {
        let parsed: QueryType = serde_json::from_str("\"Findings\"").unwrap();
        assert_eq!(parsed, QueryType::Unknown);
        let parsed: QueryType = serde_json::from_str("\"Samplings\"").unwrap();
        assert_eq!(parsed, QueryType::Samplings);
    }

    #[test]
    fn variable_query_parse() {
        assert_eq!(VariableQuery::parse("Persons"), Some(VariableQuery::Persons));
        assert_eq!(
            VariableQuery::parse("EntryPoints"),
            Some(VariableQuery::EntryPoints)
        );
        assert_eq!(VariableQuery::parse("Islands"), None);
    }

    #[test]
    fn field_type_serializes_as_other() {
        assert_eq!(serde_json::to_string(&FieldType::Other).unwrap(), "\"other\"");
    }
}
