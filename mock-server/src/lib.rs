use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{delete, get, post, put},
    Json, Router,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub title: String,
    pub body: String,
    pub priority: i32,
    pub id: Option<u64>,
}

#[derive(Deserialize)]
pub struct TodoInput {
    pub title: String,
    pub body: String,
    pub priority: i32,
}

#[derive(Serialize, Deserialize)]
pub struct TodoEnvelope {
    pub todo: Todo,
}

#[derive(Serialize, Deserialize)]
pub struct TodoListEnvelope {
    pub todos: Vec<Todo>,
}

#[derive(Default)]
pub struct Store {
    next_id: u64,
    todos: BTreeMap<u64, Todo>,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    authorization: String,
}

pub fn app(username: &str, password: &str) -> Router {
    let credentials = STANDARD.encode(format!("{username}:{password}"));
    let state = AppState {
        db: Arc::new(RwLock::new(Store::default())),
        authorization: format!("Basic {credentials}"),
    };
    Router::new()
        .route("/todos/api/v1.0/todos", get(list_todos))
        .route("/todos/api/v1.0/todo/create", post(create_todo))
        .route("/todos/api/v1.0/todo/{id}", get(get_todo))
        .route("/todos/api/v1.0/todo/update/{id}", put(update_todo))
        .route("/todos/api/v1.0/delete/{id}", delete(delete_todo))
        .with_state(state)
}

pub async fn run(
    listener: TcpListener,
    username: &str,
    password: &str,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app(username, password)).await
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), StatusCode> {
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if presented == Some(state.authorization.as_str()) {
        Ok(())
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

async fn list_todos(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TodoListEnvelope>, StatusCode> {
    authorize(&state, &headers)?;
    let store = state.db.read().await;
    Ok(Json(TodoListEnvelope {
        todos: store.todos.values().cloned().collect(),
    }))
}

async fn create_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<TodoInput>,
) -> Result<(StatusCode, Json<TodoEnvelope>), StatusCode> {
    authorize(&state, &headers)?;
    let mut store = state.db.write().await;
    store.next_id += 1;
    let id = store.next_id;
    let todo = Todo {
        title: input.title,
        body: input.body,
        priority: input.priority,
        id: Some(id),
    };
    store.todos.insert(id, todo.clone());
    Ok((StatusCode::CREATED, Json(TodoEnvelope { todo })))
}

async fn get_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<Json<TodoEnvelope>, StatusCode> {
    authorize(&state, &headers)?;
    let store = state.db.read().await;
    store
        .todos
        .get(&id)
        .cloned()
        .map(|todo| Json(TodoEnvelope { todo }))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(input): Json<TodoInput>,
) -> Result<Json<TodoEnvelope>, StatusCode> {
    authorize(&state, &headers)?;
    let mut store = state.db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    todo.title = input.title;
    todo.body = input.body;
    todo.priority = input.priority;
    Ok(Json(TodoEnvelope { todo: todo.clone() }))
}

async fn delete_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    authorize(&state, &headers)?;
    let mut store = state.db.write().await;
    store
        .todos
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
