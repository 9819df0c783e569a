use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::{RecordId, required_id};
use crate::errors::CoreError;

/// A fixed field installation that hosts sampling events.
///
/// The upstream document is kept as delivered: absent keys stay absent and
/// key order is preserved, so path queries see exactly what the API sent.
/// Only `id` is required. `leavingDate` absent or null means the trap is
/// still active.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Trap {
    id: RecordId,
    document: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for Trap {
    type Error = CoreError;

    fn try_from(document: Map<String, Value>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: required_id(&document)?,
            document,
        })
    }
}

impl Serialize for Trap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.document.serialize(serializer)
    }
}

impl Trap {
    #[must_use]
    pub const fn id(&self) -> &RecordId {
        &self.id
    }

    /// The entry point label, when it is a string.
    #[must_use]
    pub fn entry_point(&self) -> Option<&str> {
        self.get("entryPoint").and_then(Value::as_str)
    }

    /// The installation date text. Non-string dates read as `None`.
    #[must_use]
    pub fn installation_date(&self) -> Option<&str> {
        self.get("installationDate").and_then(Value::as_str)
    }

    /// Whether the trap has not been removed yet.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.get("leavingDate").is_none_or(Value::is_null)
    }

    /// Raw upstream attribute.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    /// The reduced view of this trap copied onto its samplings. Missing
    /// attributes become null.
    #[must_use]
    pub fn projection(&self) -> TrapProjection {
        TrapProjection {
            entry_point: self.get("entryPoint").cloned().unwrap_or(Value::Null),
            island: self.get("island").cloned().unwrap_or(Value::Null),
        }
    }
}

/// Entry point and island of a trap, denormalized onto samplings as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrapProjection {
    pub entry_point: Value,
    pub island: Value,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn keeps_unknown_attributes() {
        let trap: Trap = serde_json::from_value(json!({
            "id": 1,
            "entryPoint": "Harbour",
            "island": "North",
            "installationDate": "2024-03-01",
            "leavingDate": null,
            "model": "bucket"
        }))
        .unwrap();

        assert!(trap.is_active());
        assert_eq!(trap.id(), &RecordId::Number(1));
        assert_eq!(trap.get("model"), Some(&json!("bucket")));
        assert_eq!(
            trap.projection(),
            TrapProjection {
                entry_point: json!("Harbour"),
                island: json!("North"),
            }
        );
    }

    #[test]
    fn serializes_back_to_the_upstream_document() {
        let upstream = json!({"leavingDate": "2024-05-01", "id": 9, "notes": {"a": 1}});
        let trap: Trap = serde_json::from_value(upstream.clone()).unwrap();
        let value = serde_json::to_value(&trap).unwrap();

        assert!(!trap.is_active());
        assert_eq!(value, upstream);
        assert_eq!(
            serde_json::to_string(&trap).unwrap(),
            r#"{"leavingDate":"2024-05-01","id":9,"notes":{"a":1}}"#
        );
    }

    #[test]
    fn attributes_of_any_type_are_accepted() {
        let trap: Trap = serde_json::from_value(json!({
            "id": "T-4",
            "entryPoint": 17,
            "island": {"name": "North"},
            "installationDate": 1_709_251_200_000_i64
        }))
        .unwrap();

        assert!(trap.entry_point().is_none());
        assert!(trap.installation_date().is_none());
        assert_eq!(trap.projection().entry_point, json!(17));
        assert_eq!(trap.projection().island, json!({"name": "North"}));
    }

    #[test]
    fn missing_projection_attributes_are_null() {
        let trap: Trap = serde_json::from_value(json!({"id": 2})).unwrap();
        assert_eq!(trap.projection(), TrapProjection::default());
    }

    #[test]
    fn id_is_required() {
        assert!(serde_json::from_value::<Trap>(json!({"entryPoint": "Port"})).is_err());
        assert!(serde_json::from_value::<Trap>(json!({"id": null})).is_err());
    }
}
