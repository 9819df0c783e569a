//! Turning query matches into output fields and the response frame.

use serde_json::Value;
use trap_core::{DataFrame, Field, QueryResponse};

/// The all-identifiers query. When it is the last one evaluated and nothing
/// matched anywhere, the response is a single placeholder field so the
/// dashboard has something to render.
pub const ALL_IDS_QUERY: &str = "$[*].id";

/// One output field: every match serialized as compact JSON text, so strings
/// keep their quotes and objects/arrays are emitted whole.
#[must_use]
pub fn project<'a>(name: &str, matches: impl IntoIterator<Item = &'a Value>) -> Field {
    Field::other(name, matches.into_iter().map(Value::to_string).collect())
}

/// Wrap the produced fields into the response frame, applying the
/// placeholder rule for [`ALL_IDS_QUERY`].
#[must_use]
pub fn assemble(fields: Vec<Field>, last_query: Option<&str>) -> QueryResponse {
    let frame = DataFrame::new(fields);
    if frame.all_values_empty() && last_query == Some(ALL_IDS_QUERY) {
        tracing::debug!("no values for the all-identifiers query, returning placeholder");
        return QueryResponse::single(DataFrame::new(vec![Field::placeholder()]));
    }
    QueryResponse::single(frame)
}
