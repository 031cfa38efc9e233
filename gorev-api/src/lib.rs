//! HTTP client for the gorev task API.
//!
//! Wraps every call to the remote task and auth services, attaches the
//! bearer token when one is set, and maps failures into [`ApiError`].
//! Holds no task state of its own; callers reconcile responses into
//! their own view of the list.

mod client;
mod error;
mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use types::{AuthRequest, AuthResponse, Todo, TodoPayload};
