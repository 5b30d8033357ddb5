//! Insertion-ordered payload of a format object.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::Value;

/// String-keyed mapping that keeps keys in first-seen order.
///
/// Re-inserting a key replaces its value in place, so a later duplicate wins
/// but the key keeps the position of its first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    entries: Vec<(String, Value)>,
}

impl Format {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for Format {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> Value {
        Value::Str(text.into())
    }

    #[test]
    fn keys_keep_first_seen_order() {
        let mut format = Format::new();
        format.insert("b".into(), s("1"));
        format.insert("a".into(), s("2"));
        format.insert("c".into(), s("3"));
        assert_eq!(format.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn duplicate_key_overwrites_in_place() {
        let mut format = Format::new();
        assert_eq!(format.insert("x".into(), s("old")), None);
        format.insert("y".into(), s("other"));
        assert_eq!(format.insert("x".into(), s("new")), Some(s("old")));
        assert_eq!(format.len(), 2);
        assert_eq!(format.get("x"), Some(&s("new")));
        assert_eq!(format.keys().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn serializes_as_an_ordered_object() {
        let mut format = Format::new();
        format.insert("z".into(), s("1"));
        format.insert("a".into(), s("2"));
        let json = serde_json::to_string(&format).unwrap();
        assert_eq!(json, r#"{"z":"1","a":"2"}"#);
    }
}
