//! HTTP server for Paddock.
//!
//! Serves the collections of a [`paddock_store::Paddock`] as REST resources:
//! records under `/:collection/:id` and associations under
//! `/:collection/:id/:related[/:related_id]`, with optional bearer-token
//! authentication and per-request access logging.

pub mod auth;
pub mod body;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use auth::{Action, AllowAllAuth, AuthProvider, Credentials, Identity, TokenAuth};
pub use body::RecordBody;
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::PaddockServer;
pub use state::AppState;
