//! Unified error type for the TMDB provider.
//!
//! Every failure mode of a configure or read invocation is a variant of
//! [`Error`]. Errors never cross the host boundary as Rust errors: the
//! operation that detects one converts it into a [`Diagnostic`] via
//! [`Error::into_diagnostic`] (or `From<Error>`) and returns it with the
//! rest of the invocation's diagnostics.

use crate::config::{API_KEY_ATTRIBUTE, API_KEY_ENV};
use crate::diagnostics::{AttributePath, Diagnostic};

/// Unified error type covering all failure modes of the provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The declared API key is not yet knowable in the host's evaluation.
    /// Fatal for the current configure cycle.
    #[error("unknown value for `{attribute}`")]
    UnknownValue {
        /// The declared attribute whose value is unknown.
        attribute: String,
    },

    /// Neither the declared configuration nor the environment produced a
    /// non-empty API key.
    #[error("missing credential: set `{attribute}` or {env_var}")]
    MissingCredential {
        /// The declared attribute that can carry the key.
        attribute: String,
        /// The environment variable consulted as fallback.
        env_var: String,
    },

    /// The remote API client could not be constructed.
    #[error("client construction failed: {0}")]
    ClientConstruction(String),

    /// A fetch against the remote API failed.
    #[error("{context}: {message}")]
    CollaboratorRead {
        /// What was being read, e.g. "Unable to Read TMDB Movie with ID: 550".
        context: String,
        /// The underlying collaborator error message.
        message: String,
    },

    /// A read was attempted before the data source received a client.
    #[error("data source `{0}` is not configured")]
    Unconfigured(String),

    /// Declared configuration does not satisfy a schema, or a settings file
    /// could not be parsed.
    #[error("{summary}: {detail}")]
    InvalidConfig {
        /// The offending attribute, if the problem is tied to one.
        path: Option<AttributePath>,
        /// Short description.
        summary: String,
        /// Longer explanation.
        detail: String,
    },

    /// The host asked for a data source type this provider does not serve.
    #[error("unknown data source: {0}")]
    UnknownDataSource(String),
}

impl Error {
    /// Convenience constructor for [`Error::UnknownValue`] on the API key.
    pub fn unknown_credential() -> Self {
        Error::UnknownValue {
            attribute: API_KEY_ATTRIBUTE.to_string(),
        }
    }

    /// Convenience constructor for [`Error::MissingCredential`].
    pub fn missing_credential() -> Self {
        Error::MissingCredential {
            attribute: API_KEY_ATTRIBUTE.to_string(),
            env_var: API_KEY_ENV.to_string(),
        }
    }

    /// Convenience constructor for [`Error::CollaboratorRead`].
    pub fn read(context: impl Into<String>, source: impl std::fmt::Display) -> Self {
        Error::CollaboratorRead {
            context: context.into(),
            message: source.to_string(),
        }
    }

    /// Convenience constructor for [`Error::InvalidConfig`] bound to an
    /// attribute.
    pub fn invalid_attribute(
        path: AttributePath,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Error::InvalidConfig {
            path: Some(path),
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    /// Convenience constructor for [`Error::InvalidConfig`] with no
    /// attribute path.
    pub fn invalid_config(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::InvalidConfig {
            path: None,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    /// The declared attribute this error is tied to, if any.
    pub fn path(&self) -> Option<AttributePath> {
        match self {
            Error::UnknownValue { attribute } | Error::MissingCredential { attribute, .. } => {
                Some(AttributePath::root(attribute.clone()))
            }
            Error::InvalidConfig { path, .. } => path.clone(),
            Error::ClientConstruction(_)
            | Error::CollaboratorRead { .. }
            | Error::Unconfigured(_)
            | Error::UnknownDataSource(_) => None,
        }
    }

    /// Convert into an error-severity [`Diagnostic`] with a human-readable
    /// summary and remediation detail.
    pub fn into_diagnostic(self) -> Diagnostic {
        let path = self.path();
        let (summary, detail) = match self {
            Error::UnknownValue { .. } => (
                "Unknown TMDB API Key".to_string(),
                format!(
                    "The provider cannot create the TMDB API client as there is an unknown \
                     configuration value for the TMDB API key. Either target apply the source \
                     of the value first, set the value statically in the configuration, or use \
                     the {API_KEY_ENV} environment variable."
                ),
            ),
            Error::MissingCredential { attribute, env_var } => (
                "Missing TMDB API Key".to_string(),
                format!(
                    "The provider cannot create the TMDB API client as there is a missing or \
                     empty value for the TMDB API key. Set the `{attribute}` value in the \
                     configuration or use the {env_var} environment variable. If either is \
                     already set, ensure the value is not empty."
                ),
            ),
            Error::ClientConstruction(message) => (
                "Unable to Create TMDB API Client".to_string(),
                format!(
                    "An unexpected error occurred when creating the TMDB API client. If the \
                     error is not clear, please contact the provider developers.\n\n\
                     TMDB Client Error: {message}"
                ),
            ),
            Error::CollaboratorRead { context, message } => (context, message),
            Error::Unconfigured(data_source) => (
                "Unconfigured Data Source".to_string(),
                format!(
                    "The `{data_source}` data source was read before the provider supplied a \
                     TMDB API client. Ensure the provider is configured before reading."
                ),
            ),
            Error::InvalidConfig { summary, detail, .. } => (summary, detail),
            Error::UnknownDataSource(type_name) => (
                "Unknown Data Source".to_string(),
                format!("This provider does not implement a data source named `{type_name}`."),
            ),
        };

        let diagnostic = Diagnostic::error(summary, detail);
        match path {
            Some(path) => diagnostic.with_path(path),
            None => diagnostic,
        }
    }
}

impl From<Error> for Diagnostic {
    fn from(err: Error) -> Self {
        err.into_diagnostic()
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
