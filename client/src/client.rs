//! Typed operations over the authenticated transport.
//!
//! # Design
//! `TodoClient` pairs a base URL with a [`Transport`] and maps each domain
//! operation onto one endpoint call: serialize, send, parse. Response
//! parsing lives in small free functions (`parse_todo_list`,
//! `parse_todo_envelope`, `adopt_created_id`) so the JSON handling is
//! testable without a server. Operations return `Result` with a
//! cause-specific [`ApiError`]; callers that prefer to log and carry on
//! match at the call site.

use serde::Deserialize;

use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{Todo, TodoList};

const APPLICATION_JSON: &str = "application/json";

/// Synchronous client for the todo API.
///
/// Holds the base URL and the authenticated transport and nothing else, so
/// one client can serve any number of sequential calls.
#[derive(Clone)]
pub struct TodoClient {
    base_url: String,
    transport: Transport,
}

/// Wire envelope for single-item responses (`{"todo": {...}}`).
#[derive(Debug, Deserialize)]
struct TodoEnvelope {
    todo: Todo,
}

impl TodoClient {
    pub fn new(base_url: &str, username: &str, password: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport: Transport::new(username, password),
        }
    }

    /// Fetch every todo the server knows about, in server order.
    pub fn list_todos(&self) -> Result<TodoList, ApiError> {
        let body = self.transport.get(&self.endpoint("/todos/api/v1.0/todos"))?;
        parse_todo_list(&body)
    }

    /// Create a todo from the given fields.
    ///
    /// Servers differ in what a create returns: some echo the stored item,
    /// some send a bare acknowledgement. The reply is inspected either way:
    /// when the server echoes the stored item the returned todo carries its
    /// id, and when the reply has no id (or no body at all) the todo comes
    /// back exactly as constructed, id `None`.
    pub fn create_todo(&self, title: &str, body: &str, priority: i32) -> Result<Todo, ApiError> {
        let todo = Todo::new(title, body, priority);
        let payload =
            serde_json::to_string(&todo).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let reply = self.transport.post(
            &self.endpoint("/todos/api/v1.0/todo/create"),
            APPLICATION_JSON,
            &payload,
        )?;
        Ok(adopt_created_id(todo, &reply))
    }

    /// Fetch a single todo by its server-assigned id.
    pub fn get_todo(&self, id: u64) -> Result<Todo, ApiError> {
        let body = self
            .transport
            .get(&self.endpoint(&format!("/todos/api/v1.0/todo/{id}")))?;
        parse_todo_envelope(&body)
    }

    /// First todo whose title matches exactly, scanning in list order.
    ///
    /// `Ok(None)` means the list was fetched and held no match; a failed
    /// fetch surfaces as the underlying error.
    pub fn find_by_title(&self, title: &str) -> Result<Option<Todo>, ApiError> {
        let todos = self.list_todos()?;
        Ok(todos.into_iter().find(|todo| todo.title == title))
    }

    /// Delete a todo by id.
    pub fn remove_todo(&self, id: u64) -> Result<(), ApiError> {
        self.transport
            .delete(&self.endpoint(&format!("/todos/api/v1.0/delete/{id}")))?;
        Ok(())
    }

    /// Push the item's current fields to the server.
    ///
    /// Requires a server-assigned id; an item that was never persisted is
    /// rejected with [`ApiError::MissingId`] before any request is sent.
    pub fn update_todo(&self, todo: &Todo) -> Result<(), ApiError> {
        let id = todo.id.ok_or(ApiError::MissingId)?;
        let payload =
            serde_json::to_string(todo).map_err(|e| ApiError::Serialization(e.to_string()))?;
        self.transport.put(
            &self.endpoint(&format!("/todos/api/v1.0/todo/update/{id}")),
            APPLICATION_JSON,
            &payload,
        )?;
        Ok(())
    }

    fn endpoint(&self, suffix: &str) -> String {
        format!("{}{}", self.base_url, suffix)
    }
}

fn parse_todo_list(body: &str) -> Result<TodoList, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn parse_todo_envelope(body: &str) -> Result<Todo, ApiError> {
    let envelope: TodoEnvelope =
        serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))?;
    Ok(envelope.todo)
}

/// Adopt the server-assigned id out of a create reply, if one was echoed.
///
/// Accepts either the `{"todo": {...}}` envelope or a bare item object; any
/// other reply, including an empty body, leaves the todo untouched.
fn adopt_created_id(mut todo: Todo, reply: &str) -> Todo {
    if let Some(id) = echoed_id(reply) {
        todo.id = Some(id);
    }
    todo
}

fn echoed_id(reply: &str) -> Option<u64> {
    let value: serde_json::Value = serde_json::from_str(reply).ok()?;
    let item = value.get("todo").unwrap_or(&value);
    item.get("id")?.as_u64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:5000", "jason", "jason")
    }

    #[test]
    fn endpoint_joins_base_and_suffix() {
        assert_eq!(
            client().endpoint("/todos/api/v1.0/todos"),
            "http://localhost:5000/todos/api/v1.0/todos"
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:5000/", "jason", "jason");
        assert_eq!(
            client.endpoint("/todos/api/v1.0/todo/7"),
            "http://localhost:5000/todos/api/v1.0/todo/7"
        );
    }

    #[test]
    fn update_without_id_fails_fast() {
        // Nothing listens on this port; the check fires before any request.
        let client = TodoClient::new("http://127.0.0.1:1", "jason", "jason");
        let err = client.update_todo(&Todo::new("Wake up", "Wake up", 1)).unwrap_err();
        assert!(matches!(err, ApiError::MissingId));
    }

    #[test]
    fn parse_todo_list_reads_the_envelope() {
        let list = parse_todo_list(
            r#"{"todos":[{"title":"Wake up","body":"Wake up","priority":1,"id":1}]}"#,
        )
        .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.todos[0].title, "Wake up");
        assert_eq!(list.todos[0].id, Some(1));
    }

    #[test]
    fn parse_todo_list_rejects_a_bare_array() {
        let err = parse_todo_list(r#"[{"title":"Wake up","body":"Wake up","priority":1,"id":1}]"#)
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_todo_list_rejects_bad_json() {
        let err = parse_todo_list("not json").unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_todo_envelope_unwraps_the_item() {
        let todo = parse_todo_envelope(
            r#"{"todo":{"title":"Shower","body":"Get ready for work","priority":2,"id":3}}"#,
        )
        .unwrap();
        assert_eq!(todo.title, "Shower");
        assert_eq!(todo.id, Some(3));
    }

    #[test]
    fn parse_todo_envelope_requires_the_wrapper() {
        let err = parse_todo_envelope(r#"{"title":"Shower","body":"x","priority":2,"id":3}"#)
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn created_id_adopted_from_an_envelope_reply() {
        let todo = adopt_created_id(
            Todo::new("Wake up", "Wake up", 1),
            r#"{"todo":{"title":"Wake up","body":"Wake up","priority":1,"id":7}}"#,
        );
        assert_eq!(todo.id, Some(7));
    }

    #[test]
    fn created_id_adopted_from_a_bare_item_reply() {
        let todo = adopt_created_id(
            Todo::new("Wake up", "Wake up", 1),
            r#"{"title":"Wake up","body":"Wake up","priority":1,"id":7}"#,
        );
        assert_eq!(todo.id, Some(7));
    }

    #[test]
    fn empty_create_reply_leaves_the_todo_as_built() {
        let todo = adopt_created_id(Todo::new("Wake up", "Wake up", 1), "");
        assert_eq!(todo.id, None);
        assert_eq!(todo.title, "Wake up");
        assert_eq!(todo.body, "Wake up");
        assert_eq!(todo.priority, 1);
    }

    #[test]
    fn idless_create_reply_leaves_the_todo_as_built() {
        let todo = adopt_created_id(Todo::new("Wake up", "Wake up", 1), r#"{"result":true}"#);
        assert_eq!(todo.id, None);
    }

    #[test]
    fn transport_faults_map_to_api_errors() {
        let err = ApiError::from(TransportError::Status {
            status: 404,
            reason: "Not Found".to_string(),
        });
        assert!(matches!(err, ApiError::NotFound));

        let err = ApiError::from(TransportError::Status {
            status: 500,
            reason: "Internal Server Error".to_string(),
        });
        assert!(matches!(err, ApiError::Http { status: 500, .. }));

        let err = ApiError::from(TransportError::Io("connection refused".to_string()));
        assert!(matches!(err, ApiError::Io(_)));
    }
}
