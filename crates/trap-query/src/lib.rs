//! # trap-query
//!
//! The query pipeline behind Trapline's data source. One invocation:
//!
//! 1. fetches both collections (with fallback endpoints) via `trap-api`
//! 2. filters traps by installation date and samplings by observation date
//! 3. attaches each sampling's trap entry point and island
//! 4. per target, substitutes template variables and rewrites the shorthand
//!    filter syntax when a substitution happened
//! 5. flattens nested analyses/results when the query reaches into them
//! 6. evaluates the path query and projects the matches into a field
//!
//! Failures abort the whole invocation; [`DataSource::query`] logs them and
//! answers with an empty response.

mod datasource;
mod enrich;
mod error;
mod flatten;
mod projection;
mod rewrite;
mod template;
mod time_range;
mod variables;

pub use datasource::{DataSource, run_targets};
pub use enrich::{enrich, trap_index};
pub use error::QueryError;
pub use flatten::{FlattenMode, flatten};
pub use projection::{ALL_IDS_QUERY, assemble, project};
pub use rewrite::{Clause, parse_clauses, render, rewrite};
pub use template::{Substitutor, TemplateVariables};
pub use time_range::{filter_samplings, filter_traps, parse_instant};
pub use variables::{entry_points, persons};
