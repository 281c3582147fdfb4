//! Record type held by the store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A stored record: a generated identity plus free-form fields.
///
/// Serializes flat, with `id` first:
/// `{"id": "...", "name": "Ana", "email": "ana@x.com"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Identity, unique within its table.
    pub id: Uuid,

    /// Handler-supplied fields, in insertion order.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Create a record with a fresh identity.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            id: Uuid::new_v4(),
            fields,
        }
    }

    /// Look up a field by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_flat_with_id_first() {
        let mut fields = Map::new();
        fields.insert("name".into(), json!("Ana"));
        fields.insert("email".into(), json!("ana@x.com"));
        let record = Record::new(fields);

        let text = serde_json::to_string(&record).unwrap();
        assert!(text.starts_with(&format!("{{\"id\":\"{}\"", record.id)));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["name"], "Ana");
        assert_eq!(value["email"], "ana@x.com");
    }

    #[test]
    fn identities_differ() {
        let a = Record::new(Map::new());
        let b = Record::new(Map::new());
        assert_ne!(a.id, b.id);
    }
}
