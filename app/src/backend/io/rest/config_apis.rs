use axum::{extract::State, response::Json, routing::get, Router};
use log::info;

use crate::backend::AppState;
use shared::EstimatorConfig;

/// Create the config API router
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_config))
}

/// The active pricing configuration, for rendering rate cards on the page
#[axum::debug_handler]
pub async fn get_config(State(app_state): State<AppState>) -> Json<EstimatorConfig> {
    info!("GET /api/config");
    Json(app_state.estimator_service.config().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::test_support::test_state;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt; // for `oneshot`

    #[tokio::test]
    async fn test_get_config() {
        let (state, _) = test_state();
        let app = router().with_state(state);

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["delivery_fee"], 250);
        assert_eq!(json["base_rates"]["month"]["air"], 4000);
        assert_eq!(json["volume_discounts"][1]["min_qty"], 5);

        let config: EstimatorConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config, EstimatorConfig::default());
    }
}
