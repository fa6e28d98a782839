//! Dining-review platform backend.
//!
//! Users register, submit allergy-specific restaurant reviews, and
//! administrators moderate those reviews before they affect a restaurant's
//! published ratings. Layout follows the hexagonal boundary: domain types
//! and services under [`domain`], REST handlers under [`inbound`], Diesel
//! persistence adapters under [`outbound`].

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request-scoped tracing middleware.
pub use middleware::Trace;
