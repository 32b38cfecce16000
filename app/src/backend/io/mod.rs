//! # IO Module
//!
//! Adapter layer between the storefront page and the domain logic.
//!
//! Translates HTTP requests into domain calls and formats domain results as
//! JSON. No pricing or messaging rules live here.
//!
//! ## Supported Operations
//!
//! - **POST /api/estimate**: price a raw form selection and remember it
//! - **POST /api/estimate/validate**: strict check of a raw selection
//! - **GET /api/selection/last**: the last remembered selection, for prefill
//! - **POST /api/messaging/contact**: mail draft and chat link for the contact form
//! - **GET /api/messaging/whatsapp**: chat link for arbitrary text
//! - **GET /api/messaging/utm**: campaign note from the page's query string
//! - **GET /api/config**: the pricing configuration the page displays
//! - **POST /api/log**: forward page log lines into the backend log

pub mod rest;

pub use rest::*;
