pub mod cli_arguments;
pub mod request_id;
pub mod route;
pub mod select_server;
pub mod server_record;
pub mod server_repository;

use std::sync::Arc;

use axum::extract::Request;
use axum::http::header;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};

use crate::request_id::{UNKNOWN_REQUEST_ID, UuidRequestId, X_REQUEST_ID};
use crate::route::api_error::ApiError;
use crate::route::{best_server, cors, health::health, servers};
use crate::select_server::select_server::SelectServer;
use crate::server_repository::server_repository::ServerRepository;

#[derive(Clone)]
pub struct ServerState {
    /// `None` when no database is configured.
    pub repository: Option<Arc<dyn ServerRepository>>,
    pub select_server: Arc<dyn SelectServer>,
}

impl ServerState {
    pub fn new(
        repository: Option<Arc<dyn ServerRepository>>,
        select_server: Arc<dyn SelectServer>,
    ) -> Self {
        Self {
            repository,
            select_server,
        }
    }

    pub(crate) fn repository(&self) -> Result<Arc<dyn ServerRepository>, ApiError> {
        self.repository
            .clone()
            .ok_or(ApiError::ConfigurationMissing)
    }
}

pub fn router(server_state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/best-server",
            post(best_server::best_server)
                .options(best_server::preflight)
                .fallback(best_server::method_not_allowed),
        )
        .route(
            "/servers",
            get(servers::list_servers)
                .post(servers::create_server)
                .delete(servers::deactivate_server)
                .options(servers::preflight)
                .fallback(servers::method_not_allowed),
        )
        .with_state(server_state)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            cors::allow_any_origin(),
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let request_id = request
                        .headers()
                        .get(X_REQUEST_ID)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or(UNKNOWN_REQUEST_ID);

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                })
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
        .layer(SetRequestIdLayer::new(
            X_REQUEST_ID.clone(),
            UuidRequestId::default(),
        ))
}
