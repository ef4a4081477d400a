//! Client for a remote todo-list HTTP service.
//!
//! # Overview
//! Wraps a fixed set of REST endpoints (list, create, get, update, delete)
//! behind typed operations on [`TodoClient`]. Requests are synchronous and
//! carry HTTP Basic credentials; bodies are JSON on the wire and [`Todo`] /
//! [`TodoList`] values in the caller's hands.
//!
//! # Design
//! - One blocking HTTP request per operation; no retries, no caching, no
//!   shared state beyond the base URL and credentials.
//! - [`Transport`] owns authentication and the 2xx status window; the
//!   client layers the endpoint table and JSON mapping on top.
//! - Failures stay distinguishable: [`ApiError`] separates a missing todo
//!   from a refused connection from a malformed body.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::{ApiError, TransportError};
pub use http::Transport;
pub use types::{Todo, TodoList};
