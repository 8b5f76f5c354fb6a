//! Dataset items: plain strings or keyed records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A keyed record item (JSON object)
pub type Record = Map<String, Value>;

/// One element of the indexed dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    Text(String),
    Record(Record),
}

impl Item {
    /// Indexable text of `key`.
    ///
    /// Only non-empty string fields of records count; plain strings have no
    /// fields.
    pub fn field(&self, key: &str) -> Option<&str> {
        match self {
            Item::Text(_) => None,
            Item::Record(record) => match record.get(key) {
                Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
                _ => None,
            },
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Item::Text(s) => Some(s.as_str()),
            Item::Record(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Item::Record(r) => Some(r),
            Item::Text(_) => None,
        }
    }
}

impl From<&str> for Item {
    fn from(s: &str) -> Self {
        Item::Text(s.to_string())
    }
}

impl From<String> for Item {
    fn from(s: String) -> Self {
        Item::Text(s)
    }
}

impl From<Record> for Item {
    fn from(r: Record) -> Self {
        Item::Record(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_mixed() {
        let items: Vec<Item> = serde_json::from_value(json!(["北京", {"name": "上海"}])).unwrap();
        assert_eq!(items[0].as_text(), Some("北京"));
        assert_eq!(items[1].field("name"), Some("上海"));
    }

    #[test]
    fn test_field_skips_empty_and_non_string() {
        let item: Item = serde_json::from_value(json!({"a": "", "b": 3, "c": null})).unwrap();
        assert_eq!(item.field("a"), None);
        assert_eq!(item.field("b"), None);
        assert_eq!(item.field("c"), None);
        assert_eq!(item.field("missing"), None);
        assert_eq!(Item::from("text").field("a"), None);
    }
}
