//! Host-supplied configuration values.
//!
//! The host evaluates configuration lazily, so a declared attribute can be
//! in one of three states: known, explicitly null (or absent), or not yet
//! knowable at this point of the host's evaluation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A configuration value as the host hands it to the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Value<T> {
    /// The value is known.
    Known(T),
    /// Absent from the configuration, or explicitly null.
    #[default]
    Null,
    /// Declared, but depends on something the host has not resolved yet.
    Unknown,
}

impl<T> Value<T> {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    /// The known value, if there is one.
    pub fn known(&self) -> Option<&T> {
        match self {
            Value::Known(v) => Some(v),
            Value::Null | Value::Unknown => None,
        }
    }
}

impl<T> From<Option<T>> for Value<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Value::Known(v),
            None => Value::Null,
        }
    }
}

// Unknown values cannot cross a JSON document; the host constructs them
// in-process. On the wire a value is either present or null.
impl<T: Serialize> Serialize for Value<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Known(v) => serializer.serialize_some(v),
            Value::Null | Value::Unknown => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Value<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Value::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Config {
        #[serde(default)]
        key: Value<String>,
    }

    #[test]
    fn deserialize_states() {
        let c: Config = serde_json::from_str(r#"{"key":"abc"}"#).unwrap();
        assert_eq!(c.key, Value::Known("abc".to_string()));

        let c: Config = serde_json::from_str(r#"{"key":null}"#).unwrap();
        assert!(c.key.is_null());

        let c: Config = serde_json::from_str("{}").unwrap();
        assert!(c.key.is_null());
    }

    #[test]
    fn known_accessor() {
        assert_eq!(Value::Known(5).known(), Some(&5));
        assert_eq!(Value::<i32>::Null.known(), None);
        assert_eq!(Value::<i32>::Unknown.known(), None);
        assert!(Value::<i32>::Unknown.is_unknown());
    }

    #[test]
    fn unknown_serializes_as_null() {
        let json = serde_json::to_value(Value::<String>::Unknown).unwrap();
        assert!(json.is_null());
    }
}
