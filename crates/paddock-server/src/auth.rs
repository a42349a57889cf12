use async_trait::async_trait;
use axum::http::{header, HeaderMap, Method};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub authenticated: bool,
}

impl Identity {
    pub fn anonymous() -> Self { Self { name: "anonymous".into(), authenticated: false } }
    pub fn user(name: impl Into<String>) -> Self { Self { name: name.into(), authenticated: true } }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    Bearer(String),
    Anonymous,
}

impl Credentials {
    /// Read an `Authorization: Bearer <token>` header. Anything else is
    /// treated as anonymous.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| Self::Bearer(token.trim().to_string()))
            .unwrap_or(Self::Anonymous)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Read { collection: String },
    Write { collection: String },
}

impl Action {
    /// GET and HEAD read; every other method writes.
    pub fn for_request(method: &Method, collection: impl Into<String>) -> Self {
        let collection = collection.into();
        if *method == Method::GET || *method == Method::HEAD {
            Self::Read { collection }
        } else {
            Self::Write { collection }
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { collection } => write!(f, "read:{collection}"),
            Self::Write { collection } => write!(f, "write:{collection}"),
        }
    }
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity>;
    async fn authorize(&self, identity: &Identity, action: &Action) -> ServerResult<bool>;
}

pub struct AllowAllAuth;

#[async_trait]
impl AuthProvider for AllowAllAuth {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity> {
        match credentials {
            Credentials::Bearer(token) => Ok(Identity::user(format!("bearer:{}", token.chars().take(8).collect::<String>()))),
            Credentials::Anonymous => Ok(Identity::anonymous()),
        }
    }

    async fn authorize(&self, _identity: &Identity, _action: &Action) -> ServerResult<bool> {
        Ok(true)
    }
}

/// A single shared bearer token. Holders of the token may do anything;
/// anonymous callers may only read, and only if `allow_anonymous_read`.
pub struct TokenAuth {
    token: String,
    allow_anonymous_read: bool,
}

impl TokenAuth {
    pub fn new(token: impl Into<String>, allow_anonymous_read: bool) -> Self {
        Self { token: token.into(), allow_anonymous_read }
    }
}

#[async_trait]
impl AuthProvider for TokenAuth {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity> {
        match credentials {
            Credentials::Bearer(token) if *token == self.token => Ok(Identity::user("token")),
            Credentials::Bearer(_) => Err(ServerError::AuthFailed("invalid bearer token".into())),
            Credentials::Anonymous => Ok(Identity::anonymous()),
        }
    }

    async fn authorize(&self, identity: &Identity, action: &Action) -> ServerResult<bool> {
        if identity.authenticated {
            return Ok(true);
        }
        Ok(matches!(action, Action::Read { .. }) && self.allow_anonymous_read)
    }
}
