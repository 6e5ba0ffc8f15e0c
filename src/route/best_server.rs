use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ServerState;
use crate::route::api_error::ApiError;
use crate::route::cors::{self, SELECTOR_ALLOWED_HEADERS, SELECTOR_ALLOWED_METHODS};
use crate::route::request_body::parse_json_body;
use crate::select_server::{haversine::Coordinates, request::Request};
use crate::server_record::ServerRecord;

pub const SELECTION_REASON: &str = "Optimal by location, ping and load";

#[derive(Debug, Default, Deserialize)]
pub struct BestServerRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl BestServerRequest {
    fn origin(&self) -> Result<Coordinates, ApiError> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Coordinates::new(latitude, longitude)),
            _ => Err(ApiError::InvalidInput(String::from(
                "Latitude and longitude required",
            ))),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BestServerResponse {
    pub server: ServerRecord,
    pub reason: &'static str,
}

pub async fn best_server(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<BestServerResponse>, ApiError> {
    let repository = state.repository()?;
    let origin = parse_json_body::<BestServerRequest>(&body)?.origin()?;

    let candidates = repository.list_selectable().await?;
    let selected = state.select_server.execute(Request { origin, candidates })?;

    info!(
        server_id = selected.server.id,
        score = selected.score,
        "Best server selected for ({}, {})",
        origin.latitude,
        origin.longitude
    );

    Ok(Json(BestServerResponse {
        server: selected.server,
        reason: SELECTION_REASON,
    }))
}

pub async fn preflight() -> Response {
    cors::preflight(SELECTOR_ALLOWED_METHODS, SELECTOR_ALLOWED_HEADERS)
}

pub async fn method_not_allowed() -> impl IntoResponse {
    ApiError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::select_server::error::Error;
    use crate::select_server::score_select_server::ScoreSelectServer;
    use crate::select_server::select_server::MockSelectServer;
    use crate::server_record::tests::make_server;
    use crate::server_repository::server_repository::{MockServerRepository, ServerRepository};
    use crate::server_repository::server_repository_error::ServerRepositoryError;
    use crate::{ServerState, router};

    fn state_with(repository: MockServerRepository) -> ServerState {
        ServerState {
            repository: Some(Arc::new(repository) as Arc<dyn ServerRepository>),
            select_server: Arc::new(ScoreSelectServer::new()),
        }
    }

    async fn send(state: ServerState, method: Method, body: &str) -> (StatusCode, Value) {
        let response = router(state)
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri("/best-server")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };

        (status, json)
    }

    #[tokio::test]
    async fn should_select_the_nearest_server() {
        let mut repository = MockServerRepository::default();

        repository.expect_list_selectable().times(1).returning(|| {
            let mut moscow = make_server(1, 55.75, 37.62);
            moscow.ping_ms = Some(10);
            moscow.config_data = Some(String::from("[Interface]"));
            let mut london = make_server(2, 51.5, -0.12);
            london.ping_ms = Some(5);

            Ok(vec![london, moscow])
        });

        let (status, body) = send(
            state_with(repository),
            Method::POST,
            r#"{"latitude": 55.75, "longitude": 37.62}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["server"]["id"], 1);
        assert_eq!(body["server"]["config_data"], "[Interface]");
        assert_eq!(body["reason"], "Optimal by location, ping and load");
    }

    #[tokio::test]
    async fn should_require_both_coordinates() {
        for payload in [r#"{"latitude": 55.75}"#, r#"{"longitude": 37.62}"#, "", "{}"] {
            let mut repository = MockServerRepository::default();
            repository.expect_list_selectable().never();

            let (status, body) = send(state_with(repository), Method::POST, payload).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Latitude and longitude required");
        }
    }

    #[tokio::test]
    async fn should_reject_non_numeric_coordinates() {
        let (status, _) = send(
            state_with(MockServerRepository::default()),
            Method::POST,
            r#"{"latitude": "north", "longitude": 37.62}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_answer_not_found_when_nothing_is_selectable() {
        let mut repository = MockServerRepository::default();
        repository
            .expect_list_selectable()
            .returning(|| Ok(Vec::new()));

        let (status, body) = send(
            state_with(repository),
            Method::POST,
            r#"{"latitude": 0, "longitude": 0}"#,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No available servers");
    }

    #[tokio::test]
    async fn should_map_selector_errors_to_not_found() {
        let mut repository = MockServerRepository::default();
        repository
            .expect_list_selectable()
            .returning(|| Ok(vec![make_server(1, 0.0, 0.0)]));

        let mut select_server = MockSelectServer::default();
        select_server
            .expect_execute()
            .times(1)
            .returning(|_| Err(Error::NoServersAvailable));

        let state = ServerState {
            repository: Some(Arc::new(repository)),
            select_server: Arc::new(select_server),
        };

        let (status, _) = send(state, Method::POST, r#"{"latitude": 0, "longitude": 0}"#).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_surface_datastore_failures() {
        let mut repository = MockServerRepository::default();
        repository
            .expect_list_selectable()
            .returning(|| Err(ServerRepositoryError::Datastore(String::from("connection refused"))));

        let (status, body) = send(
            state_with(repository),
            Method::POST,
            r#"{"latitude": 0, "longitude": 0}"#,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "connection refused");
    }

    #[tokio::test]
    async fn should_fail_without_database_configuration() {
        let state = ServerState {
            repository: None,
            select_server: Arc::new(ScoreSelectServer::new()),
        };

        let (status, body) = send(state, Method::POST, r#"{"latitude": 0, "longitude": 0}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Database configuration missing");
    }

    #[tokio::test]
    async fn should_refuse_other_methods_before_checking_configuration() {
        for method in [Method::GET, Method::PUT, Method::DELETE] {
            let state = ServerState {
                repository: None,
                select_server: Arc::new(ScoreSelectServer::new()),
            };

            let (status, body) = send(state, method, "").await;

            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(body["error"], "Method not allowed");
        }
    }

    #[tokio::test]
    async fn should_answer_preflight_requests() {
        let response = router(state_with(MockServerRepository::default()))
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/best-server")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, OPTIONS"
        );
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
