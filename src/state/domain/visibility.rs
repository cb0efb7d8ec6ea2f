//! Member visibility policy over the `tasks` list of a state document.
//!
//! A `member` only ever sees the tasks assigned to them, and a write from a
//! member can only create, change or delete their own tasks. Tasks owned by
//! anyone else are carried over from the stored document untouched,
//! whatever the member's client sent for them.

use super::{StateDocument, TaskView};
use serde_json::Value;

/// Returns the tasks assigned to `user_email`, in their original order.
///
/// Input that is not an array yields an empty list.
#[must_use]
pub fn filter_for_member(tasks: &Value, user_email: &str) -> Vec<Value> {
    task_views(tasks)
        .filter(|task| task.is_assigned_to(user_email))
        .map(|task| task.as_value().clone())
        .collect()
}

/// Merges a member's task list into the stored one.
///
/// The result is every stored task not owned by `user_email`, followed by
/// every incoming task owned by `user_email`. Non-array inputs count as
/// empty lists.
#[must_use]
pub fn merge_for_member(existing: &Value, incoming: &Value, user_email: &str) -> Vec<Value> {
    let others = task_views(existing).filter(|task| !task.is_assigned_to(user_email));
    let own = task_views(incoming).filter(|task| task.is_assigned_to(user_email));
    others.chain(own).map(|task| task.as_value().clone()).collect()
}

/// Returns the document as a member sees it.
///
/// A present `tasks` field is replaced by the member's own tasks; a
/// document without one is returned unchanged.
#[must_use]
pub fn visible_to_member(document: StateDocument, user_email: &str) -> StateDocument {
    match document.tasks() {
        Some(tasks) => {
            let own = filter_for_member(tasks, user_email);
            document.with_tasks(own)
        }
        None => document,
    }
}

/// Builds the document to store for a member write.
///
/// Top-level fields of `incoming` override those of `existing`, except
/// `tasks`, which becomes [`merge_for_member`] of the two lists. A missing
/// stored document counts as an empty one.
#[must_use]
pub fn merge_member_write(
    existing: Option<StateDocument>,
    incoming: StateDocument,
    user_email: &str,
) -> StateDocument {
    let base = existing.unwrap_or_default();
    let tasks = merge_for_member(
        base.tasks().unwrap_or(&Value::Null),
        incoming.tasks().unwrap_or(&Value::Null),
        user_email,
    );
    base.overlaid_with(incoming).with_tasks(tasks)
}

fn task_views(tasks: &Value) -> impl Iterator<Item = TaskView<'_>> {
    tasks
        .as_array()
        .into_iter()
        .flatten()
        .map(TaskView::new)
}
