use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::backend::AppState;

#[derive(Debug, Deserialize)]
pub struct LogRequest {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogResponse {
    pub success: bool,
}

/// Create the logging API router
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(log_message))
}

/// Write a log line from the storefront page into the backend log
#[axum::debug_handler]
pub async fn log_message(
    State(_app_state): State<AppState>,
    Json(request): Json<LogRequest>,
) -> Result<Json<LogResponse>, (StatusCode, Json<Value>)> {
    if request.message.trim().is_empty() {
        let error_response = serde_json::json!({
            "error": "Log message cannot be empty",
            "code": "INVALID_INPUT"
        });
        return Err((StatusCode::BAD_REQUEST, Json(error_response)));
    }

    let component = request.component.as_deref().unwrap_or("storefront");
    let message = format!("[{}] {}", component, request.message);

    match request.level.to_lowercase().as_str() {
        "debug" => debug!("{}", message),
        "info" => info!("{}", message),
        "warn" | "warning" => warn!("{}", message),
        "error" => error!("{}", message),
        _ => info!("{}", message),
    }

    Ok(Json(LogResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::test_support::test_state;
    use axum::{body::Body, http::{Method, Request}};
    use serde_json::json;
    use tower::util::ServiceExt; // for `oneshot`

    fn log_request(body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_log_message_accepted() {
        let (state, _) = test_state();
        let app = router().with_state(state);

        for level in ["debug", "info", "WARN", "error", "trace"] {
            let request = log_request(json!({"level": level, "message": "copy button clicked"}));
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "level {}", level);

            let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let log_response: LogResponse = serde_json::from_slice(&body).unwrap();
            assert!(log_response.success);
        }
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let (state, _) = test_state();
        let app = router().with_state(state);

        let request = log_request(
            json!({"level": "info", "message": "  ", "component": "estimate"}),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
