use std::collections::HashSet;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

use serde::{Deserialize, Serialize};

use paddock_store::{IdStrategy, Paddock};

use crate::error::{ServerError, ServerResult};

/// Server configuration, usually read from a TOML file.
///
/// Every field has a default except `collections`, which must be filled in
/// before [`ServerConfig::validate`] passes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Collection names served; fixed for the lifetime of the server.
    pub collections: Vec<String>,
    /// Field holding each record's identifier.
    pub id_field: String,
    pub id_strategy: IdStrategy,
    /// Emit a tracing span per HTTP request.
    pub access_log: bool,
    /// Shared bearer token. When unset, every request is allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// With a token configured, whether reads work without one.
    pub allow_anonymous_read: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 3000)),
            collections: Vec::new(),
            id_field: "id".into(),
            id_strategy: IdStrategy::Sequential,
            access_log: true,
            auth_token: None,
            allow_anonymous_read: true,
        }
    }
}

impl ServerConfig {
    /// Default configuration serving `collections`.
    pub fn with_collections<I, S>(collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            collections: collections.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Read and parse a TOML file. The result is not validated.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> ServerResult<String> {
        toml::to_string_pretty(self).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Check the settings that cannot be fixed up at request time.
    pub fn validate(&self) -> ServerResult<()> {
        if self.collections.is_empty() {
            return Err(ServerError::Config("at least one collection is required".into()));
        }
        let mut seen = HashSet::new();
        for name in &self.collections {
            if name.is_empty() || name.contains('/') {
                return Err(ServerError::Config(format!(
                    "collection name `{name}` must be a non-empty path segment"
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(ServerError::Config(format!("collection `{name}` is listed twice")));
            }
        }
        if self.id_field.is_empty() {
            return Err(ServerError::Config("id_field must not be empty".into()));
        }
        if matches!(&self.auth_token, Some(token) if token.is_empty()) {
            return Err(ServerError::Config("auth_token must not be empty".into()));
        }
        Ok(())
    }

    /// Validate, then build the empty store this configuration describes.
    pub fn build_paddock(&self) -> ServerResult<Paddock> {
        self.validate()?;
        let paddock = Paddock::new(self.collections.iter().cloned(), self.id_field.clone())?;
        Ok(paddock.with_id_strategy(self.id_strategy))
    }
}
