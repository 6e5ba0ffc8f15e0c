use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

pub(crate) const SELECTOR_ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
pub(crate) const SELECTOR_ALLOWED_HEADERS: &str = "Content-Type";
pub(crate) const REGISTRY_ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub(crate) const REGISTRY_ALLOWED_HEADERS: &str = "Content-Type, X-Auth-Token";

pub(crate) fn allow_any_origin() -> HeaderValue {
    HeaderValue::from_static("*")
}

/// Empty 200 answering a CORS preflight. The origin header is added by the
/// router-wide layer.
pub(crate) fn preflight(methods: &'static str, headers: &'static str) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, methods),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, headers),
        ],
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::{StatusCode, header};

    use crate::route::cors::{REGISTRY_ALLOWED_HEADERS, REGISTRY_ALLOWED_METHODS, preflight};

    #[tokio::test]
    async fn should_answer_a_preflight_with_an_empty_body() {
        let response = preflight(REGISTRY_ALLOWED_METHODS, REGISTRY_ALLOWED_HEADERS);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, X-Auth-Token"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }
}
