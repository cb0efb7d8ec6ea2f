//! Opaque workspace state document.

use super::StateDomainError;
use serde::Serialize;
use serde_json::{Map, Value};

/// Name of the only document field the visibility policy interprets.
pub const TASKS_FIELD: &str = "tasks";

/// Structured application state of one workspace.
///
/// The document is a JSON object whose fields pass through every read and
/// write unchanged, with the exception of [`TASKS_FIELD`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StateDocument(Map<String, Value>);

impl StateDocument {
    /// Returns the raw `tasks` field, if present.
    #[must_use]
    pub fn tasks(&self) -> Option<&Value> {
        self.0.get(TASKS_FIELD)
    }

    /// Returns the document with its `tasks` field replaced.
    #[must_use]
    pub fn with_tasks(mut self, tasks: Vec<Value>) -> Self {
        self.0.insert(TASKS_FIELD.to_owned(), Value::Array(tasks));
        self
    }

    /// Returns this document with every top-level field of `overlay`
    /// written over it.
    #[must_use]
    pub fn overlaid_with(mut self, overlay: Self) -> Self {
        self.0.extend(overlay.0);
        self
    }

    /// Returns the top-level fields.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Converts the document into a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for StateDocument {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl TryFrom<Value> for StateDocument {
    type Error = StateDomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            Value::Null | Value::Bool(false) => Err(StateDomainError::MissingState),
            Value::String(ref text) if text.is_empty() => Err(StateDomainError::MissingState),
            Value::Number(ref number) if is_zero(number) => Err(StateDomainError::MissingState),
            Value::Array(_) => Err(StateDomainError::NotAnObject("array")),
            Value::String(_) => Err(StateDomainError::NotAnObject("string")),
            Value::Number(_) => Err(StateDomainError::NotAnObject("number")),
            Value::Bool(true) => Err(StateDomainError::NotAnObject("boolean")),
        }
    }
}

fn is_zero(number: &serde_json::Number) -> bool {
    number.as_u64() == Some(0)
        || number.as_i64() == Some(0)
        || number.as_f64().is_some_and(|value| value.abs() < f64::MIN_POSITIVE)
}
