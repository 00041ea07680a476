//! # memo-client
//!
//! Client for a small memo (note) API. Memos carry `#hashtags` that the
//! server groups into categories; deleting or editing a memo needs the
//! password it was written with.
//!
//! - [`types::ApiClient`] issues the HTTP calls
//! - [`app::MemoApp`] keeps the UI state and runs the event handlers
//! - [`view::render`] draws that state as text

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod modules;
pub mod types;
pub mod view;

pub use app::{Alert, AppState, MemoApp};
pub use config::{Config, PasswordMode};
pub use error::{MemoError, Result};
pub use types::ApiClient;
