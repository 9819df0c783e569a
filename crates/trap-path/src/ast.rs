//! Parsed form of a path query.

use std::str::FromStr;

use crate::error::PathError;
use crate::filter::Expr;

/// A parsed path query: `$` followed by segments applied left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPath {
    pub segments: Vec<Segment>,
}

impl FromStr for JsonPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse(s)
    }
}

/// One step of a path query.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// `.name`, `[...]`: select among the children of each node.
    Child(Vec<Selector>),
    /// `..name`, `..[...]`: select among the children of each node and of
    /// all its descendants.
    Descendant(Vec<Selector>),
}

/// What a segment picks out of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    Name(String),
    Index(i64),
    Wildcard,
    Slice {
        start: Option<i64>,
        end: Option<i64>,
        step: Option<i64>,
    },
    Filter(Expr),
}
