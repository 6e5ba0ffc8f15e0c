use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ServerState;
use crate::route::api_error::ApiError;
use crate::route::cors::{self, REGISTRY_ALLOWED_HEADERS, REGISTRY_ALLOWED_METHODS};
use crate::route::request_body::parse_json_body;
use crate::server_record::{CreatedServer, NewServer, ServerRecord};

#[derive(Debug, Default, Deserialize)]
pub struct ListServersQuery {
    pub active: Option<String>,
}

impl ListServersQuery {
    /// Anything other than a case-insensitive `true` lists every server.
    fn active_only(&self) -> bool {
        self.active
            .as_deref()
            .unwrap_or("true")
            .eq_ignore_ascii_case("true")
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DeactivateQuery {
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ServerList {
    pub servers: Vec<ServerRecord>,
}

#[derive(Debug, Serialize)]
pub struct ServerCreated {
    pub success: bool,
    pub server: CreatedServer,
}

#[derive(Debug, Serialize)]
pub struct ServerDeactivated {
    pub success: bool,
    pub message: &'static str,
}

pub async fn list_servers(
    State(state): State<ServerState>,
    Query(query): Query<ListServersQuery>,
) -> Result<Json<ServerList>, ApiError> {
    let repository = state.repository()?;

    let servers = if query.active_only() {
        repository.list_active().await?
    } else {
        repository.list_all().await?
    };

    Ok(Json(ServerList { servers }))
}

pub async fn create_server(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<(StatusCode, Json<ServerCreated>), ApiError> {
    let repository = state.repository()?;
    let new_server = parse_json_body::<NewServer>(&body)?;

    let server = repository.insert(new_server).await?;
    info!(server_id = server.id, "Server {} registered", server.name);

    Ok((
        StatusCode::CREATED,
        Json(ServerCreated {
            success: true,
            server,
        }),
    ))
}

/// Soft delete. Reports success even when the id matches nothing.
pub async fn deactivate_server(
    State(state): State<ServerState>,
    Query(query): Query<DeactivateQuery>,
) -> Result<Json<ServerDeactivated>, ApiError> {
    let repository = state.repository()?;

    let id = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::InvalidInput(String::from("Server ID required")))?;
    let id: i32 = id
        .parse()
        .map_err(|_| ApiError::InvalidInput(format!("Invalid server ID: {id}")))?;

    match repository.deactivate(id).await? {
        0 => warn!(server_id = id, "Deactivation matched no server"),
        _ => info!(server_id = id, "Server deactivated"),
    }

    Ok(Json(ServerDeactivated {
        success: true,
        message: "Server deactivated",
    }))
}

pub async fn preflight() -> Response {
    cors::preflight(REGISTRY_ALLOWED_METHODS, REGISTRY_ALLOWED_HEADERS)
}

/// The registry validates its configuration before looking at the method.
pub async fn method_not_allowed(State(state): State<ServerState>) -> ApiError {
    match state.repository() {
        Ok(_) => ApiError::MethodNotAllowed,
        Err(error) => error,
    }
}
