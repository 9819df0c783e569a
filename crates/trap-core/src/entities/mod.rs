//! Records of the two upstream collections.
//!
//! A record keeps the document the API delivered and exposes typed readers
//! for the keys the pipeline relies on. Serializing a record writes that
//! document back unchanged, which is what path queries are written against.

mod record_id;
mod sampling;
mod trap;

pub use record_id::RecordId;
pub use sampling::{ANALYSES_KEY, Analysis, Sampling};
pub use trap::{Trap, TrapProjection};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::CoreError;

/// Decode raw upstream JSON items into typed records.
///
/// Only a missing or unusable `id`, or an item that is not an object, fails
/// decoding; every other attribute may hold any JSON value. The first failing
/// item aborts the whole batch.
///
/// # Errors
///
/// Returns [`CoreError::InvalidRecord`] naming the collection and the index
/// of the offending item.
pub fn decode_records<T: DeserializeOwned>(
    collection: &str,
    items: Vec<Value>,
) -> Result<Vec<T>, CoreError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| CoreError::InvalidRecord {
                collection: collection.to_string(),
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// The `id` of an upstream document.
fn required_id(document: &Map<String, Value>) -> Result<RecordId, CoreError> {
    document
        .get("id")
        .and_then(RecordId::from_value)
        .ok_or_else(|| CoreError::Validation("missing or non-scalar `id`".into()))
}
