//! Todo domain entity and the commands that change it.

use serde::{Deserialize, Serialize};

/// A user-owned task record.
///
/// Serialized in camelCase (`isCompleted`, `userId`) to match the
/// existing web client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub user_id: i32,
}

/// Data for a new todo. The owner comes from the authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTodo {
    pub name: String,
    pub description: Option<String>,
    pub is_completed: bool,
}

/// Partial update of a todo.
///
/// `name` and `description` are applied only when present;
/// `is_completed` is always written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTodo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_completed: bool,
}

impl Todo {
    /// Apply an update in place.
    pub fn apply(&mut self, changes: UpdateTodo) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        self.is_completed = changes.is_completed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Todo {
        Todo {
            id: 1,
            name: "Buy milk".to_string(),
            description: Some("2 liters".to_string()),
            is_completed: false,
            user_id: 42,
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["isCompleted"], false);
        assert_eq!(json["userId"], 42);
        assert_eq!(json["description"], "2 liters");
    }

    #[test]
    fn test_apply_keeps_missing_fields() {
        let mut todo = sample();
        todo.apply(UpdateTodo {
            name: None,
            description: None,
            is_completed: true,
        });

        assert_eq!(todo.name, "Buy milk");
        assert_eq!(todo.description.as_deref(), Some("2 liters"));
        assert!(todo.is_completed);
    }

    #[test]
    fn test_apply_always_writes_completion_flag() {
        let mut todo = sample();
        todo.is_completed = true;
        todo.apply(UpdateTodo {
            name: Some("Buy oat milk".to_string()),
            description: None,
            is_completed: false,
        });

        assert_eq!(todo.name, "Buy oat milk");
        assert!(!todo.is_completed);
    }
}
