//! # Domain Module
//!
//! Business rules of the rental storefront, independent of HTTP and of how
//! anything is stored.
//!
//! ## Module Organization
//!
//! - **estimator_service**: the pricing rule and form-input normalization
//! - **estimate_view**: currency formatting, the estimate card and text summary
//! - **messaging_service**: chat links, contact-form mail drafts, campaign notes
//! - **selection_service**: the last-selection cache behind a key-value store
//! - **config_service**: loading and validating the pricing configuration
//!
//! ## Business Rules
//!
//! - Price = base rate × duration × quantity, less one volume discount tier
//! - Only the highest qualifying discount tier applies
//! - Refundable deposit is charged for at most a configured number of units
//! - Total = discounted subtotal + deposit + flat delivery fee
//! - Invalid form input is coerced, never rejected, unless strict validation is asked for

pub mod estimator_service;
pub mod estimate_view;
pub mod messaging_service;
pub mod selection_service;
pub mod config_service;

pub use estimator_service::*;
pub use estimate_view::*;
pub use messaging_service::*;
pub use selection_service::*;
pub use config_service::*;
