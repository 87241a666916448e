//! tmdb-core: shared types for the TMDB provider.
//!
//! This crate is the foundational dependency for the provider and its HTTP
//! client: the diagnostics collector, schema declarations, host-supplied
//! configuration values, the masked credential, the unified error type, and
//! client settings.

pub mod config;
pub mod credential;
pub mod diagnostics;
pub mod error;
pub mod schema;
pub mod value;

// Re-export the most commonly used items at the crate root.
pub use config::ClientSettings;
pub use credential::Credential;
pub use diagnostics::{AttributePath, Diagnostic, Diagnostics, PathStep, Severity};
pub use error::{Error, Result};
pub use schema::{Attribute, AttributeKind, Schema};
pub use value::Value;
