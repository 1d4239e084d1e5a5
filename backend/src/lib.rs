//! Napchart backend: owner-scoped nap records behind a session-authenticated
//! REST API.
//!
//! The crate follows a hexagonal layout. [`domain`] holds entities, the
//! access-control services and their ports; [`inbound`] adapts HTTP requests
//! onto driving ports; [`outbound`] implements driven ports over PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
