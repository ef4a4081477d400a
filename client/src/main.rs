//! Scripted demonstration run against a live todo server.
//!
//! Creates a handful of todos, lists them, removes one, updates another,
//! then filters by priority. Server location and credentials come from
//! `TODO_API_URL`, `TODO_API_USER`, and `TODO_API_PASSWORD`; failures of
//! individual steps are logged and the run continues where it can.

use todo_client::{ApiError, TodoClient};
use tracing_subscriber::EnvFilter;

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn main() -> Result<(), ApiError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let base_url = env_or("TODO_API_URL", "http://127.0.0.1:5000");
    let username = env_or("TODO_API_USER", "jason");
    let password = env_or("TODO_API_PASSWORD", "jason");
    let client = TodoClient::new(&base_url, &username, &password);

    println!("Adding todos");
    let items = [
        ("Wake up", "Wake up", 1),
        ("Breakfast", "Eat Breakfast", 2),
        ("Shower", "Get ready for work", 2),
        ("Work", "Go to work", 5),
    ];
    for (title, body, priority) in items {
        match client.create_todo(title, body, priority) {
            Ok(todo) => println!("  created {todo}"),
            Err(err) => tracing::warn!(title, error = %err, "could not create todo"),
        }
    }

    println!("Getting todos");
    for todo in &client.list_todos()? {
        println!("  {todo}");
    }

    println!("Removing a todo");
    match client.find_by_title("Breakfast")?.and_then(|todo| todo.id) {
        Some(id) => client.remove_todo(id)?,
        None => tracing::warn!("no todo titled Breakfast to remove"),
    }

    println!("Getting remaining todos");
    for todo in &client.list_todos()? {
        println!("  {todo}");
    }

    println!("Updating a todo");
    match client.find_by_title("Shower")?.and_then(|todo| todo.id) {
        Some(id) => {
            let mut todo = client.get_todo(id)?;
            todo.title = "Relax".to_string();
            todo.body = "Take the day off".to_string();
            match client.update_todo(&todo) {
                Ok(()) => println!("  update succeeded"),
                Err(err) => tracing::warn!(id, error = %err, "could not update todo"),
            }
        }
        None => tracing::warn!("no todo titled Shower to update"),
    }

    println!("Getting updated list of todos");
    let todos = client.list_todos()?;
    for todo in &todos {
        println!("  {todo}");
    }

    println!("Getting todo(s) with priority 2");
    for todo in todos.iter().filter(|todo| todo.priority == 2) {
        println!("  {todo}");
    }

    Ok(())
}
