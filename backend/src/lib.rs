//! Data layer and REST API for a short-term rental marketplace.
//!
//! The [`domain`] owns records, validation and services; [`outbound`] holds
//! storage and persistence adapters; [`inbound`] exposes the services over
//! HTTP.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
