//! Request parsing shared by the endpoint handlers.

use serde::Deserialize;
use serde_json::Value;

/// Query parameters accepted by the `GET` and `DELETE` handlers.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WorkspaceQuery {
    pub(super) location_id: Option<String>,
    pub(super) workspace_id: Option<String>,
    pub(super) user_email: Option<String>,
}

/// Treats an absent or empty value as missing.
pub(super) fn present(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

/// Parses a JSON request body; an empty body or `null` counts as `{}`.
///
/// Returns `None` when the body is not valid JSON of the expected shape.
pub(super) fn parse_body<T>(body: &[u8]) -> Option<T>
where
    T: for<'de> Deserialize<'de> + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Some(T::default());
    }
    match serde_json::from_slice::<Value>(body).ok()? {
        Value::Null => Some(T::default()),
        value => serde_json::from_value(value).ok(),
    }
}
