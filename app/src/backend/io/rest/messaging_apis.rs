use axum::{
    extract::{Query, RawQuery, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use log::info;
use serde::Deserialize;
use serde_json::Value;

use crate::backend::AppState;
use shared::{ContactLinksResponse, ContactRequest, UtmNoteResponse, WhatsAppLinkResponse};

#[derive(Debug, Deserialize)]
pub struct WhatsAppLinkQuery {
    pub text: Option<String>,
}

/// Create the messaging API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contact", post(create_contact_links))
        .route("/whatsapp", get(get_whatsapp_link))
        .route("/utm", get(get_utm_note))
}

/// Mail draft and chat link for a contact-form submission
#[axum::debug_handler]
pub async fn create_contact_links(
    State(app_state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<ContactLinksResponse>, (StatusCode, Json<Value>)> {
    info!("POST /api/messaging/contact - action: {}", request.action);

    if request.action.trim().is_empty() {
        let error_response = serde_json::json!({
            "error": "Form action cannot be empty",
            "code": "INVALID_INPUT"
        });
        return Err((StatusCode::BAD_REQUEST, Json(error_response)));
    }

    let links = app_state
        .messaging_service
        .contact_links(&request.action, &request.form);
    Ok(Json(links))
}

/// Chat link for the given text, or for the default inquiry when none is given
#[axum::debug_handler]
pub async fn get_whatsapp_link(
    State(app_state): State<AppState>,
    Query(query): Query<WhatsAppLinkQuery>,
) -> Json<WhatsAppLinkResponse> {
    info!("GET /api/messaging/whatsapp - query: {:?}", query);

    let link = app_state.messaging_service.chat_link(query.text.as_deref());
    Json(WhatsAppLinkResponse { link })
}

/// Campaign note built from the `utm_*` parameters of this request's query
#[axum::debug_handler]
pub async fn get_utm_note(
    State(_app_state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Json<UtmNoteResponse> {
    info!("GET /api/messaging/utm - query: {:?}", query);

    let note = query.as_deref().and_then(crate::backend::domain::utm_note);
    Json(UtmNoteResponse { note })
}
