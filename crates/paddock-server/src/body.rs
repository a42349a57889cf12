use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde_json::Value;

use paddock_store::Record;

use crate::error::ServerError;

/// A request body decoded as a single JSON object.
///
/// The content type is not inspected. An empty body decodes to an empty
/// record; anything other than a JSON object is rejected with
/// [`ServerError::BadRequestBody`] before any handler runs.
#[derive(Clone, Debug)]
pub struct RecordBody(pub Record);

impl RecordBody {
    pub fn decode(bytes: &[u8]) -> Result<Record, ServerError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Record::new());
        }
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| ServerError::BadRequestBody(e.to_string()))?;
        Record::from_value(value)
            .ok_or_else(|| ServerError::BadRequestBody("expected a JSON object".into()))
    }
}

#[async_trait]
impl<S> FromRequest<S> for RecordBody
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ServerError::BadRequestBody(e.body_text()))?;
        Self::decode(&bytes).map(Self)
    }
}
