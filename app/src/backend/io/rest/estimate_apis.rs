use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use log::{info, warn};
use serde_json::Value;

use crate::backend::AppState;
use shared::{EstimateResponse, RawSelection, ValidateSelectionResponse};

/// Create the estimate API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_estimate))
        .route("/validate", post(validate_selection))
}

/// Price a form selection, render it, and remember it for the next visit
#[axum::debug_handler]
pub async fn create_estimate(
    State(app_state): State<AppState>,
    Json(request): Json<RawSelection>,
) -> Json<EstimateResponse> {
    info!("POST /api/estimate - request: {:?}", request);

    let (selection, breakdown) = app_state.estimator_service.estimate_raw(&request);
    let view = app_state.estimate_view_service.build_view(&selection, &breakdown);
    let summary = app_state.estimate_view_service.build_summary(&selection, &breakdown);
    let whatsapp_link = app_state.messaging_service.chat_link(Some(&summary));

    if !app_state.selection_service.save_last_selection(&selection) {
        warn!("Estimate computed but selection was not remembered");
    }

    Json(EstimateResponse {
        selection,
        breakdown,
        view,
        summary,
        whatsapp_link,
    })
}

/// Strictly validate a form selection without pricing it
#[axum::debug_handler]
pub async fn validate_selection(
    State(app_state): State<AppState>,
    Json(request): Json<RawSelection>,
) -> Result<Json<ValidateSelectionResponse>, (StatusCode, Json<Value>)> {
    info!("POST /api/estimate/validate - request: {:?}", request);

    match app_state.estimator_service.validate_selection(&request) {
        Ok(selection) => Ok(Json(ValidateSelectionResponse { selection })),
        Err(e) => {
            info!("Selection rejected: {}", e);
            let error_response = serde_json::json!({
                "error": e.to_string(),
                "code": "INVALID_SELECTION"
            });
            Err((StatusCode::BAD_REQUEST, Json(error_response)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::LAST_SELECTION_KEY;
    use crate::backend::storage::KeyValueStore;
    use crate::backend::test_support::test_state;
    use axum::{
        body::Body,
        http::{Method, Request},
    };
    use serde_json::json;
    use tower::util::ServiceExt; // for `oneshot`

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_bulk_month_estimate() {
        let (state, _) = test_state();
        let app = router().with_state(state);

        let request = post_json(
            "/",
            json!({"plan": "month", "model": "air", "qty": "5", "duration": "1"}),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let estimate: EstimateResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(estimate.breakdown.raw_subtotal, 20000);
        assert_eq!(estimate.breakdown.discount_percent, 8);
        assert_eq!(estimate.breakdown.discount_amount, 1600);
        assert_eq!(estimate.breakdown.deposit_amount, 12000);
        assert_eq!(estimate.breakdown.total_due, 30650);
        assert_eq!(estimate.view.rows.len(), 3);
        assert!(estimate.summary.contains("TOTAL DUE: ₱30,650"));
        assert!(estimate.whatsapp_link.starts_with("https://wa.me/639000000000?text="));
    }

    #[tokio::test]
    async fn test_estimate_coerces_bad_input() {
        let (state, _) = test_state();
        let app = router().with_state(state);

        let request = post_json(
            "/",
            json!({"plan": "day", "model": "pro", "qty": "0", "duration": "abc"}),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let estimate: EstimateResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(estimate.selection.quantity, 1);
        assert_eq!(estimate.selection.duration, 1);
        assert_eq!(estimate.breakdown.total_due, 800 + 3000 + 250);
    }

    #[tokio::test]
    async fn test_estimate_remembers_selection() {
        let (state, store) = test_state();
        let app = router().with_state(state);

        let request = post_json(
            "/",
            json!({"plan": "week", "model": "pro", "qty": 3, "duration": 2}),
        );
        app.oneshot(request).await.unwrap();

        let saved = store.get(LAST_SELECTION_KEY).unwrap().unwrap();
        let saved: Value = serde_json::from_str(&saved).unwrap();
        assert_eq!(saved, json!({"plan": "week", "model": "pro", "qty": 3, "duration": 2}));
    }

    #[tokio::test]
    async fn test_validate_accepts_clean_selection() {
        let (state, _) = test_state();
        let app = router().with_state(state);

        let request = post_json(
            "/validate",
            json!({"plan": "day", "model": "air", "qty": "2", "duration": "3"}),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let validated: ValidateSelectionResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(validated.selection.quantity, 2);
        assert_eq!(validated.selection.duration, 3);
    }

    #[tokio::test]
    async fn test_validate_rejects_bad_quantity() {
        let (state, store) = test_state();
        let app = router().with_state(state);

        let request = post_json(
            "/validate",
            json!({"plan": "day", "model": "air", "qty": "0", "duration": "1"}),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error_json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(error_json["code"], "INVALID_SELECTION");
        assert!(error_json["error"].as_str().unwrap().contains("Quantity"));

        // Validation alone never touches the cache
        assert!(store.get(LAST_SELECTION_KEY).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_validate_rejects_unknown_rate() {
        let (state, _) = test_state();
        let app = router().with_state(state);

        let request = post_json(
            "/validate",
            json!({"plan": "year", "model": "air", "qty": "1", "duration": "1"}),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
