//! Rental estimator: pricing core, presentation helpers and a loopback REST
//! bridge for the storefront page.

pub mod backend;
