//! Shared library for the agenda relay Lambda.
//!
//! This crate provides the request gate, entry normalization, and the Notion
//! client used by the `agenda` function.

pub mod auth;
pub mod config;
pub mod entry;
pub mod error;
pub mod http;
pub mod models;
pub mod normalize;
pub mod notion;

pub use auth::{is_health_check, ApiKeyGate, API_KEY_HEADER, HEALTH_PATH};
pub use config::Config;
pub use entry::Entry;
pub use error::{Error, Result};
pub use models::{AgendaRequest, AgendaResponse, ErrorResponse, NormalizedFields};
pub use normalize::{fold, Vocabulary};
pub use notion::{NotionClient, PageCreator};
