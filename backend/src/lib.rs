//! Case management backend library modules.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
