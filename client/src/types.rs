//! Domain types for the todo API.
//!
//! # Design
//! `Todo` is a plain mutable value: all fields are public and the caller
//! owns mutation. Ids are assigned by the server, so a locally constructed
//! item starts with `id: None`, and `None` serializes as `null` to keep the
//! wire shape identical across create and update. `TodoList` mirrors the
//! server's list envelope (`{"todos": [...]}`) rather than a bare array,
//! and iterates in the order the server returned.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single todo item.
///
/// Constructed locally with [`Todo::new`] (no id yet) or deserialized from
/// a server response (id present). A server-assigned id is not meant to be
/// changed by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub title: String,
    pub body: String,
    pub priority: i32,
    #[serde(default)]
    pub id: Option<u64>,
}

impl Todo {
    /// A new, unpersisted todo. The server assigns the id on create.
    pub fn new(title: &str, body: &str, priority: i32) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            priority,
            id: None,
        }
    }
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "#{id} {} (priority {}): {}", self.title, self.priority, self.body),
            None => write!(f, "#? {} (priority {}): {}", self.title, self.priority, self.body),
        }
    }
}

/// Ordered collection of todos as returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoList {
    pub todos: Vec<Todo>,
}

impl TodoList {
    pub fn iter(&self) -> std::slice::Iter<'_, Todo> {
        self.todos.iter()
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }
}

impl IntoIterator for TodoList {
    type Item = Todo;
    type IntoIter = std::vec::IntoIter<Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.todos.into_iter()
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a Todo;
    type IntoIter = std::slice::Iter<'a, Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.todos.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_todo_has_no_id() {
        let todo = Todo::new("Wake up", "Wake up", 1);
        assert_eq!(todo.id, None);
        assert_eq!(todo.title, "Wake up");
        assert_eq!(todo.body, "Wake up");
        assert_eq!(todo.priority, 1);
    }

    #[test]
    fn unpersisted_todo_serializes_with_null_id() {
        let json = serde_json::to_value(Todo::new("Wake up", "Wake up", 1)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "Wake up", "body": "Wake up", "priority": 1, "id": null})
        );
    }

    #[test]
    fn todo_roundtrips_through_json() {
        let todo = Todo {
            title: "Shower".to_string(),
            body: "Get ready for work".to_string(),
            priority: 2,
            id: Some(3),
        };
        let json = serde_json::to_string(&todo).unwrap();
        let back: Todo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, todo);
    }

    #[test]
    fn roundtrip_preserves_an_absent_id() {
        let todo = Todo::new("Work", "Go to work", 5);
        let json = serde_json::to_string(&todo).unwrap();
        let back: Todo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, todo);
    }

    #[test]
    fn missing_id_field_deserializes_to_none() {
        let todo: Todo =
            serde_json::from_str(r#"{"title":"Wake up","body":"Wake up","priority":1}"#).unwrap();
        assert_eq!(todo.id, None);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let todo: Todo = serde_json::from_str(
            r#"{"title":"Wake up","body":"Wake up","priority":1,"id":4,"uri":"/todos/api/v1.0/todo/4"}"#,
        )
        .unwrap();
        assert_eq!(todo.id, Some(4));
    }

    #[test]
    fn list_iterates_in_wire_order() {
        let list: TodoList = serde_json::from_str(
            r#"{"todos":[
                {"title":"Wake up","body":"Wake up","priority":1,"id":1},
                {"title":"Breakfast","body":"Eat Breakfast","priority":2,"id":2}
            ]}"#,
        )
        .unwrap();
        assert_eq!(list.len(), 2);
        assert!(!list.is_empty());
        let titles: Vec<&str> = list.iter().map(|todo| todo.title.as_str()).collect();
        assert_eq!(titles, ["Wake up", "Breakfast"]);
        let owned: Vec<Todo> = list.into_iter().collect();
        assert_eq!(owned[1].id, Some(2));
    }

    #[test]
    fn display_includes_the_id_when_assigned() {
        let mut todo = Todo::new("Shower", "Get ready for work", 2);
        assert_eq!(todo.to_string(), "#? Shower (priority 2): Get ready for work");
        todo.id = Some(3);
        assert_eq!(todo.to_string(), "#3 Shower (priority 2): Get ready for work");
    }
}
