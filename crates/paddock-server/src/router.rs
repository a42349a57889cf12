use std::collections::HashMap;

use axum::extract::{Path, Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::auth::{Action, Credentials};
use crate::error::{ServerError, ServerResult};
use crate::handler;
use crate::state::AppState;

/// Build the axum router with all Paddock endpoints.
///
/// Collection routes pass through the auth middleware; `/` does not.
pub fn build_router(state: AppState, access_log: bool) -> Router {
    let router = Router::new()
        .route(
            "/:collection",
            get(handler::list_records).post(handler::create_record),
        )
        .route(
            "/:collection/:id",
            get(handler::get_record)
                .put(handler::update_record)
                .patch(handler::update_record)
                .delete(handler::delete_record),
        )
        .route(
            "/:collection/:id/:related",
            get(handler::list_associated).delete(handler::unassociate_all),
        )
        .route(
            "/:collection/:id/:related/:related_id",
            axum::routing::post(handler::associate).delete(handler::unassociate),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .route("/", get(handler::info_handler))
        .with_state(state);

    if access_log {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

async fn authenticate(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    request: Request,
    next: Next,
) -> ServerResult<Response> {
    let credentials = Credentials::from_headers(request.headers());
    let identity = state.auth().authenticate(&credentials).await?;

    let collection = params.get("collection").cloned().unwrap_or_default();
    let action = Action::for_request(request.method(), collection);
    if !state.auth().authorize(&identity, &action).await? {
        return Err(if identity.authenticated {
            ServerError::AuthorizationDenied { action: action.to_string() }
        } else {
            ServerError::AuthFailed(format!("credentials required for {action}"))
        });
    }

    Ok(next.run(request).await)
}
