//! Pre-filled chat links, contact-form email drafts and campaign notes.
//!
//! Everything here only builds strings. Opening the link or submitting the
//! draft is left to the page.

use log::debug;
use shared::{ContactForm, ContactLinksResponse, EstimatorConfig};
use url::form_urlencoded;

const WHATSAPP_BASE_URL: &str = "https://wa.me";
const UTM_KEYS: [&str; 4] = ["utm_source", "utm_medium", "utm_campaign", "utm_content"];

/// `https://wa.me/<number>?text=<message>`, with the message percent-encoded
/// the way browsers encode a URI component (spaces become `%20`).
pub fn whatsapp_link(number: &str, message: &str) -> String {
    format!(
        "{}/{}?text={}",
        WHATSAPP_BASE_URL,
        number,
        urlencoding::encode(message)
    )
}

/// Opening message used when a chat is started without a summary
pub fn default_inquiry(business_name: &str) -> String {
    format!(
        "Hi {}! I'd like to rent a MacBook. My location: ____. Duration: ____. Budget: ____. Model preference: ____.",
        business_name
    )
}

/// Rewrite a `mailto:` form action so the draft carries a structured subject
/// and body. Other actions are returned untouched.
pub fn compose_mailto(action: &str, form: &ContactForm) -> String {
    if !action.starts_with("mailto:") {
        debug!("Form action {} is not a mailto link, leaving it unchanged", action);
        return action.to_string();
    }

    let subject = format!("Rental request — {}", field(&form.name));
    let body = format!(
        "Name: {}\nEmail: {}\nPhone: {}\nPlan: {}\nMessage: {}\n\nSource: Website contact form",
        field(&form.name),
        field(&form.email),
        field(&form.phone),
        field(&form.plan),
        field(&form.message),
    );

    format!(
        "{}?subject={}&body={}",
        action,
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    )
}

/// One-line chat message mirroring a contact-form submission
pub fn contact_chat_message(form: &ContactForm) -> String {
    format!(
        "Hi, I'm {}. Plan: {}. Phone/email: {} / {}. Message: {}",
        field(&form.name),
        field(&form.plan),
        field(&form.phone),
        field(&form.email),
        field(&form.message),
    )
}

/// Campaign attribution from a URL query string (with or without the leading
/// `?`). Returns `key:value` pairs for the known `utm_*` keys joined by ` | `,
/// or `None` when none of them carry a value.
pub fn utm_note(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let params: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();

    let parts: Vec<String> = UTM_KEYS
        .iter()
        .filter_map(|key| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .filter(|(_, v)| !v.is_empty())
                .map(|(k, v)| format!("{}:{}", k, v))
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Service that builds outbound links with the configured recipient
#[derive(Clone)]
pub struct MessagingService {
    whatsapp_number: String,
    business_name: String,
}

impl MessagingService {
    pub fn new(config: &EstimatorConfig) -> Self {
        Self {
            whatsapp_number: config.whatsapp_number.clone(),
            business_name: config.business_name.clone(),
        }
    }

    /// Chat link for a message; an empty or missing message uses the default inquiry
    pub fn chat_link(&self, message: Option<&str>) -> String {
        match message {
            Some(text) if !text.is_empty() => whatsapp_link(&self.whatsapp_number, text),
            _ => whatsapp_link(&self.whatsapp_number, &default_inquiry(&self.business_name)),
        }
    }

    /// Mail draft plus the matching chat link for a contact-form submission
    pub fn contact_links(&self, action: &str, form: &ContactForm) -> ContactLinksResponse {
        ContactLinksResponse {
            mailto: compose_mailto(action, form),
            whatsapp_link: self.chat_link(Some(&contact_chat_message(form))),
        }
    }
}
