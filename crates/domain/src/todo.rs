//! Todo — the single persisted item of the service.

use serde::{Deserialize, Serialize};

use crate::id::TodoId;

/// Width of the `description` column. Longer values are rejected by the
/// storage engine, not by the domain.
pub const DESCRIPTION_MAX_LEN: usize = 256;

/// A stored todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub description: String,
    pub is_completed: bool,
}

/// Input for creating a todo. The id is assigned by storage on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTodo {
    pub description: String,
    pub is_completed: bool,
}

impl NewTodo {
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            is_completed: false,
        }
    }

    #[must_use]
    pub fn completed(mut self, is_completed: bool) -> Self {
        self.is_completed = is_completed;
        self
    }

    /// Attach the storage-assigned id.
    #[must_use]
    pub fn with_id(self, id: TodoId) -> Todo {
        Todo {
            id,
            description: self.description,
            is_completed: self.is_completed,
        }
    }
}

/// Partial update of a todo.
///
/// `None` means "leave the stored value unchanged"; there is no way to clear a
/// field, only to keep or overwrite it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoPatch {
    pub id: TodoId,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
}

impl TodoPatch {
    /// A patch for `id` that changes nothing yet.
    #[must_use]
    pub fn new(id: TodoId) -> Self {
        Self {
            id,
            description: None,
            is_completed: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn is_completed(mut self, is_completed: bool) -> Self {
        self.is_completed = Some(is_completed);
        self
    }

    /// Whether applying this patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.is_completed.is_none()
    }

    /// Apply the present fields to `todo`, keeping the others.
    ///
    /// Mirrors the `COALESCE(new, current)` update performed by the SQL stores.
    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(description) = &self.description {
            todo.description.clone_from(description);
        }
        if let Some(is_completed) = self.is_completed {
            todo.is_completed = is_completed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Todo {
        NewTodo::new("a").with_id(TodoId::new(1))
    }

    #[test]
    fn should_default_new_todo_to_not_completed() {
        let todo = NewTodo::new("write docs");
        assert_eq!(todo.description, "write docs");
        assert!(!todo.is_completed);
    }

    #[test]
    fn should_keep_completion_when_patch_only_sets_description() {
        let mut todo = stored();
        TodoPatch::new(todo.id).description("b").apply_to(&mut todo);
        assert_eq!(todo.description, "b");
        assert!(!todo.is_completed);
    }

    #[test]
    fn should_keep_description_when_patch_only_sets_completion() {
        let mut todo = stored();
        TodoPatch::new(todo.id).is_completed(true).apply_to(&mut todo);
        assert_eq!(todo.description, "a");
        assert!(todo.is_completed);
    }

    #[test]
    fn should_leave_todo_untouched_when_patch_is_empty() {
        let mut todo = stored();
        let patch = TodoPatch::new(todo.id);
        assert!(patch.is_empty());
        patch.apply_to(&mut todo);
        assert_eq!(todo, stored());
    }

    #[test]
    fn should_serialize_with_camel_case_fields() {
        let json = serde_json::to_value(stored()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "description": "a", "isCompleted": false})
        );
    }
}
