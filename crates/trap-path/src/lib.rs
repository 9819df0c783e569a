//! # trap-path
//!
//! Path-query engine for the in-memory trap and sampling collections.
//!
//! Supports:
//! - `$.island` / `$['island']`: Direct child access
//! - `$[0]` / `$[-1]`: Array index (negative counts from the end)
//! - `$[0:3]` / `$[::2]`: Array slice
//! - `$[*]` / `$.*`: Wildcard (all elements or member values)
//! - `$..person`: Recursive descent
//! - `$[0,2]` / `$['id','date']`: Unions
//! - `$[?(@.presenceOfIndividuals==true)]`: Filter expressions
//!
//! Filter expressions compare `@`-relative (or `$`-rooted) paths with
//! literals using loose scripting semantics: a missing member equals `null`,
//! numbers compare equal to numeric strings, and a bare path is a
//! truthiness test (`null`, missing, `false`, `0` and `""` are false).

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod filter;
pub mod parser;

pub use ast::JsonPath;
pub use error::PathError;
pub use evaluator::{evaluate, evaluate_owned};
pub use parser::parse;

use serde_json::Value;

/// Parse `query` and evaluate it against `root`.
///
/// # Errors
///
/// Returns [`PathError`] if `query` is not a valid path query.
pub fn query<'a>(root: &'a Value, query: &str) -> Result<Vec<&'a Value>, PathError> {
    let path = parse(query)?;
    Ok(evaluate(&path, root))
}
