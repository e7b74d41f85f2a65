use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// A value that can be attached to a log record.
///
/// Text records use its `Display` form; JSON records keep its serialized
/// type, so numbers and booleans stay numbers and booleans. Implemented for
/// every type that is both `Serialize` and `Display`.
pub trait FieldValue: fmt::Display {
    fn to_json(&self) -> Value;
}

impl<T> FieldValue for T
where
    T: Serialize + fmt::Display + ?Sized,
{
    fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::String(self.to_string()))
    }
}

/// A structured key/value pair attached to a log record.
///
/// ```rust
/// let logger = rotalog::Logger::default();
/// logger.info("Application started", &[("version", &"1.0.0"), ("workers", &4)]);
/// ```
pub type Field<'a> = (&'a str, &'a dyn FieldValue);

/// Renders fields as `key=value` pairs separated by spaces.
pub(crate) struct KeyValues<'a>(pub &'a [Field<'a>]);

impl KeyValues<'_> {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The fields as a JSON object. A repeated key keeps its last value.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .0
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_json()))
            .collect();
        Value::Object(map)
    }
}

impl fmt::Display for KeyValues<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            let value = value.to_string();
            if needs_quoting(&value) {
                write!(f, "{}={:?}", key, value)?;
            } else {
                write!(f, "{}={}", key, value)?;
            }
        }
        Ok(())
    }
}

fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '=' || c == '"')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_pairs() {
        let fields: &[Field<'_>] = &[("version", &"1.0.0"), ("data", &1)];
        assert_eq!(KeyValues(fields).to_string(), "version=1.0.0 data=1");
    }

    #[test]
    fn test_values_with_spaces_are_quoted() {
        let fields: &[Field<'_>] = &[("path", &"/var/log/my app.log"), ("empty", &"")];
        assert_eq!(
            KeyValues(fields).to_string(),
            r#"path="/var/log/my app.log" empty="""#
        );
    }

    #[test]
    fn test_empty() {
        let kv = KeyValues(&[]);
        assert!(kv.is_empty());
        assert_eq!(kv.to_string(), "");
        assert_eq!(kv.to_json(), json!({}));
    }

    #[test]
    fn test_json_keeps_value_types() {
        let ratio = 0.5;
        let fields: &[Field<'_>] = &[
            ("count", &42),
            ("user", &"bob smith"),
            ("ok", &true),
            ("ratio", &ratio),
            ("level", &crate::Level::Warning),
        ];
        assert_eq!(
            KeyValues(fields).to_json(),
            json!({
                "count": 42,
                "user": "bob smith",
                "ok": true,
                "ratio": 0.5,
                "level": "warning",
            })
        );
    }

    #[test]
    fn test_json_repeated_key_keeps_last() {
        let fields: &[Field<'_>] = &[("attempt", &1), ("attempt", &2)];
        assert_eq!(KeyValues(fields).to_json(), json!({ "attempt": 2 }));
    }
}
