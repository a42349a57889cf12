use std::sync::{Arc, Mutex, MutexGuard};

use paddock_store::Paddock;

use crate::auth::{AllowAllAuth, AuthProvider, TokenAuth};
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// Shared state handed to every handler.
///
/// The whole [`Paddock`] sits behind one mutex. A handler locks it once and
/// does all of its store and graph work under that guard, so a destroy and
/// its edge cascade are never observed half done.
#[derive(Clone)]
pub struct AppState {
    paddock: Arc<Mutex<Paddock>>,
    auth: Arc<dyn AuthProvider>,
}

impl AppState {
    pub fn new(paddock: Paddock, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            paddock: Arc::new(Mutex::new(paddock)),
            auth,
        }
    }

    /// Build an empty store and the auth provider the configuration asks for.
    pub fn from_config(config: &ServerConfig) -> ServerResult<Self> {
        let paddock = config.build_paddock()?;
        let auth: Arc<dyn AuthProvider> = match &config.auth_token {
            Some(token) => Arc::new(TokenAuth::new(token.clone(), config.allow_anonymous_read)),
            None => Arc::new(AllowAllAuth),
        };
        Ok(Self::new(paddock, auth))
    }

    /// Lock the store for the duration of one request.
    pub fn lock(&self) -> ServerResult<MutexGuard<'_, Paddock>> {
        self.paddock
            .lock()
            .map_err(|e| ServerError::Internal(format!("lock poisoned: {e}")))
    }

    pub fn auth(&self) -> &dyn AuthProvider {
        self.auth.as_ref()
    }

    /// Another handle to the same store, for embedding and tests.
    pub fn paddock(&self) -> Arc<Mutex<Paddock>> {
        Arc::clone(&self.paddock)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
