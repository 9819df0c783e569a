use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::{RecordId, TrapProjection, required_id};
use crate::errors::CoreError;

/// Upstream key of the analyses array.
pub const ANALYSES_KEY: &str = "analyzes";

/// A dated observation event at a trap.
///
/// Like [`super::Trap`], the upstream document is kept verbatim. `entryPoint`
/// and `island` are not delivered by the API; enrichment writes them, null
/// when the trap is unknown.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Sampling {
    id: RecordId,
    document: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for Sampling {
    type Error = CoreError;

    fn try_from(document: Map<String, Value>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: required_id(&document)?,
            document,
        })
    }
}

impl Serialize for Sampling {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.document.serialize(serializer)
    }
}

impl Sampling {
    #[must_use]
    pub const fn id(&self) -> &RecordId {
        &self.id
    }

    /// The referenced trap, when `trapId` is a string or an integer.
    #[must_use]
    pub fn trap_id(&self) -> Option<RecordId> {
        self.get("trapId").and_then(RecordId::from_value)
    }

    /// The observation date text. Non-string dates read as `None`.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.get("date").and_then(Value::as_str)
    }

    #[must_use]
    pub fn entry_point(&self) -> Option<&str> {
        self.get("entryPoint").and_then(Value::as_str)
    }

    #[must_use]
    pub fn island(&self) -> Option<&str> {
        self.get("island").and_then(Value::as_str)
    }

    /// Raw upstream attribute.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    /// Entries of the analyses array. Empty when the key is absent or does
    /// not hold an array.
    pub fn analyses(&self) -> impl Iterator<Item = Analysis<'_>> {
        self.get(ANALYSES_KEY)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(Analysis::new)
    }

    /// Copy the trap projection onto this sampling. `None` writes nulls.
    pub fn attach_trap(&mut self, projection: Option<&TrapProjection>) {
        let (entry_point, island) = projection.map_or((Value::Null, Value::Null), |p| {
            (p.entry_point.clone(), p.island.clone())
        });
        self.document.insert("entryPoint".into(), entry_point);
        self.document.insert("island".into(), island);
    }

    /// A copy of this sampling whose analyses array holds only `analysis`.
    #[must_use]
    pub fn with_single_analysis(&self, analysis: Value) -> Self {
        let mut copy = self.clone();
        copy.document
            .insert(ANALYSES_KEY.into(), Value::Array(vec![analysis]));
        copy
    }

    /// Non-empty person identifiers across all analyses, in order.
    pub fn persons(&self) -> impl Iterator<Item = &str> {
        self.analyses()
            .filter_map(|a| a.person())
            .filter(|p| !p.is_empty())
    }
}

/// One entry of a sampling's analyses array: a per-person examination with
/// its ordered results. Result attributes are opaque.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Analysis<'a> {
    value: &'a Value,
}

impl<'a> Analysis<'a> {
    #[must_use]
    pub const fn new(value: &'a Value) -> Self {
        Self { value }
    }

    #[must_use]
    pub fn person(&self) -> Option<&'a str> {
        self.value.get("person").and_then(Value::as_str)
    }

    /// Entries of the results array. Empty when absent or not an array.
    #[must_use]
    pub fn results(&self) -> &'a [Value] {
        self.value
            .get("results")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        self.value.clone()
    }

    /// A copy of this analysis whose results array holds only `result`.
    #[must_use]
    pub fn with_single_result(&self, result: &Value) -> Value {
        let mut copy = self.value.clone();
        if let Value::Object(map) = &mut copy {
            map.insert("results".into(), Value::Array(vec![result.clone()]));
        }
        copy
    }
}
