//! Request handlers. Each one locks the store once and translates the
//! outcome into a status code and JSON body.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};

use paddock_store::{Paddock, Record, StoreError};

use crate::body::RecordBody;
use crate::error::ServerResult;
use crate::state::AppState;

/// Server info: name, version and the collections being served.
pub async fn info_handler(State(state): State<AppState>) -> ServerResult<Json<Value>> {
    let paddock = state.lock()?;
    Ok(Json(json!({
        "name": "paddock",
        "version": env!("CARGO_PKG_VERSION"),
        "collections": paddock.collections().collect::<Vec<_>>(),
        "id_field": paddock.id_field(),
    })))
}

pub async fn list_records(
    State(state): State<AppState>,
    Path(collection): Path<String>,
) -> ServerResult<Json<Vec<Record>>> {
    let paddock = state.lock()?;
    Ok(Json(paddock.find_all(&collection)?))
}

pub async fn create_record(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    RecordBody(record): RecordBody,
) -> ServerResult<(StatusCode, Json<Record>)> {
    let mut paddock = state.lock()?;
    let created = paddock.create(&collection, record)?.clone();
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> ServerResult<Json<Record>> {
    let paddock = state.lock()?;
    Ok(Json(paddock.find(&collection, &id)?.clone()))
}

/// Serves both PUT and PATCH: the body is merged field by field and the
/// identifier is never changed.
pub async fn update_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    RecordBody(patch): RecordBody,
) -> ServerResult<Json<Record>> {
    let mut paddock = state.lock()?;
    Ok(Json(paddock.update(&collection, &id, patch)?.clone()))
}

pub async fn delete_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> ServerResult<StatusCode> {
    let mut paddock = state.lock()?;
    if !paddock.destroy(&collection, &id)? {
        return Err(StoreError::NotFound { collection, id }.into());
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_associated(
    State(state): State<AppState>,
    Path((collection, id, related)): Path<(String, String, String)>,
) -> ServerResult<Json<Vec<Record>>> {
    let paddock = state.lock()?;
    ensure_source(&paddock, &collection, &id, &related)?;
    Ok(Json(paddock.find_by_association(&collection, &id, &related)?))
}

pub async fn unassociate_all(
    State(state): State<AppState>,
    Path((collection, id, related)): Path<(String, String, String)>,
) -> ServerResult<StatusCode> {
    let mut paddock = state.lock()?;
    ensure_source(&paddock, &collection, &id, &related)?;
    paddock.remove_edges_by_type(&collection, &id, &related)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn associate(
    State(state): State<AppState>,
    Path((collection, id, related, related_id)): Path<(String, String, String, String)>,
) -> ServerResult<StatusCode> {
    let mut paddock = state.lock()?;
    ensure_source(&paddock, &collection, &id, &related)?;
    paddock.associate(&collection, &id, &related, &related_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unassociate(
    State(state): State<AppState>,
    Path((collection, id, related, related_id)): Path<(String, String, String, String)>,
) -> ServerResult<StatusCode> {
    let mut paddock = state.lock()?;
    ensure_source(&paddock, &collection, &id, &related)?;
    paddock.remove_edge(&collection, &id, &related, &related_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Both collections must be known (400) and the source record must exist
/// (404) before the graph is consulted.
fn ensure_source(paddock: &Paddock, collection: &str, id: &str, related: &str) -> ServerResult<()> {
    for name in [collection, related] {
        if !paddock.exists(name) {
            return Err(StoreError::UnknownCollection(name.to_string()).into());
        }
    }
    paddock.find(collection, id)?;
    Ok(())
}
