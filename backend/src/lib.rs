//! Clinic backend library modules.
//!
//! The crate is laid out hexagonally: `domain` owns entities, services, and
//! ports; `inbound` adapts HTTP requests onto driving ports; `outbound` holds
//! the PostgreSQL, in-memory, and security adapters behind driven ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
