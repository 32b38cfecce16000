//! # REST API Interface Layer
//!
//! HTTP endpoints for the rental estimator. Each module exposes a `router()`
//! that `create_router` nests under its `/api/...` prefix.
//!
//! Errors are returned as `{"error": <message>, "code": <CODE>}` with a 4xx
//! or 5xx status.

pub mod estimate_apis;
pub mod selection_apis;
pub mod messaging_apis;
pub mod config_apis;
pub mod logging_apis;
