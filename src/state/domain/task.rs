//! Typed view over task entries embedded in a state document.

use serde_json::Value;

/// Key holding the assignee of a task.
const ASSIGNEE_FIELD: &str = "assigneeEmail";

/// Read-only view of one entry of the `tasks` list.
///
/// Only the assignee is interpreted; every other field is opaque.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskView<'a>(&'a Value);

impl<'a> TaskView<'a> {
    /// Wraps a raw task value.
    #[must_use]
    pub const fn new(value: &'a Value) -> Self {
        Self(value)
    }

    /// Returns the lowercased assignee email.
    ///
    /// A missing, empty or non-string assignee, and a task that is not an
    /// object, all yield the empty string.
    #[must_use]
    pub fn assignee_email(&self) -> String {
        self.0
            .get(ASSIGNEE_FIELD)
            .and_then(Value::as_str)
            .map(str::to_lowercase)
            .unwrap_or_default()
    }

    /// Returns `true` when the task is assigned to `user_email`, ignoring
    /// case.
    #[must_use]
    pub fn is_assigned_to(&self, user_email: &str) -> bool {
        self.assignee_email() == user_email.to_lowercase()
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn as_value(&self) -> &'a Value {
        self.0
    }
}
