//! Construction of the shared TMDB client handle.
//!
//! The provider builds exactly one [`ClientHandle`] per configure cycle and
//! hands clones of it to every data source. Construction goes through a
//! [`ClientFactory`] so tests can substitute an in-memory catalog.

use std::sync::Arc;

use tracing::debug;

use tmdb_client::{ClientError, MovieCatalog, TmdbClient};
use tmdb_core::{ClientSettings, Credential, Diagnostics, Error};

/// Shared, read-only handle to the remote movie catalog.
pub type ClientHandle = Arc<dyn MovieCatalog>;

/// Turns a resolved credential into a [`ClientHandle`].
pub trait ClientFactory: Send + Sync {
    fn build(&self, credential: &Credential) -> Result<ClientHandle, ClientError>;
}

impl<F> ClientFactory for F
where
    F: Fn(&Credential) -> Result<ClientHandle, ClientError> + Send + Sync,
{
    fn build(&self, credential: &Credential) -> Result<ClientHandle, ClientError> {
        self(credential)
    }
}

/// Default factory producing an HTTP [`TmdbClient`].
#[derive(Debug, Clone, Default)]
pub struct HttpClientFactory {
    settings: ClientSettings,
}

impl HttpClientFactory {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }
}

impl ClientFactory for HttpClientFactory {
    fn build(&self, credential: &Credential) -> Result<ClientHandle, ClientError> {
        let client = TmdbClient::new(credential, &self.settings)?;
        debug!(base_url = client.base_url(), "Built TMDB HTTP client");
        Ok(Arc::new(client))
    }
}

/// Build the client handle, converting a construction failure into exactly
/// one error diagnostic.
pub fn build_client(
    factory: &dyn ClientFactory,
    credential: &Credential,
) -> (Option<ClientHandle>, Diagnostics) {
    let mut diags = Diagnostics::new();
    match factory.build(credential) {
        Ok(handle) => (Some(handle), diags),
        Err(e) => {
            diags.push(Error::ClientConstruction(e.to_string()).into());
            (None, diags)
        }
    }
}
