//! Conversion between typed records and the schemaless field maps the
//! document store holds.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use todo_core::{TodoError, TodoResult};

/// Field map of a single document. The store id is never part of it.
pub type Fields = serde_json::Map<String, serde_json::Value>;

pub fn to_fields<T: Serialize>(record: &T) -> TodoResult<Fields> {
    match serde_json::to_value(record)? {
        serde_json::Value::Object(fields) => Ok(fields),
        other => Err(TodoError::Serialization(format!(
            "expected a document object, got {}",
            other
        ))),
    }
}

pub fn from_fields<T: DeserializeOwned>(fields: Fields) -> TodoResult<T> {
    Ok(serde_json::from_value(serde_json::Value::Object(fields))?)
}

/// Form inputs store untouched optional fields as empty strings.
pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

pub(crate) mod due_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Reads `YYYY-MM-DD`. Anything else stored under the field is dropped
    /// with a warning so one malformed document cannot fail a whole fetch.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => match NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(e) => {
                    tracing::warn!("Ignoring unreadable due date '{}': {}", s, e);
                    None
                }
            },
            Some(other) => {
                tracing::warn!("Ignoring non-string due date {}", other);
                None
            }
        })
    }
}
