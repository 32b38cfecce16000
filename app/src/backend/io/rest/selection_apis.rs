use axum::{extract::State, response::Json, routing::get, Router};
use log::info;

use crate::backend::AppState;
use shared::LastSelectionResponse;

/// Create the selection API router
pub fn router() -> Router<AppState> {
    Router::new().route("/last", get(get_last_selection))
}

/// The last remembered estimate selection. `selection` is null when there is
/// nothing usable to prefill the form with.
#[axum::debug_handler]
pub async fn get_last_selection(State(app_state): State<AppState>) -> Json<LastSelectionResponse> {
    info!("GET /api/selection/last");

    let selection = app_state.selection_service.load_last_selection();
    Json(LastSelectionResponse { selection })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::LAST_SELECTION_KEY;
    use crate::backend::storage::KeyValueStore;
    use crate::backend::test_support::test_state;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt; // for `oneshot`

    async fn fetch_last(app: Router) -> LastSelectionResponse {
        let request = Request::builder().uri("/last").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_nothing_saved_yet() {
        let (state, _) = test_state();
        let response = fetch_last(router().with_state(state)).await;
        assert_eq!(response.selection, None);
    }

    #[tokio::test]
    async fn test_returns_saved_selection() {
        let (state, store) = test_state();
        store
            .set(LAST_SELECTION_KEY, r#"{"plan":"day","model":"pro","qty":2,"duration":7}"#)
            .unwrap();

        let response = fetch_last(router().with_state(state)).await;
        let selection = response.selection.unwrap();
        assert_eq!(selection.plan, "day");
        assert_eq!(selection.model, "pro");
        assert_eq!(selection.quantity, 2);
        assert_eq!(selection.duration, 7);
    }

    #[tokio::test]
    async fn test_corrupt_entry_reads_as_empty() {
        let (state, store) = test_state();
        store.set(LAST_SELECTION_KEY, "{{{").unwrap();

        let response = fetch_last(router().with_state(state)).await;
        assert_eq!(response.selection, None);
    }
}
