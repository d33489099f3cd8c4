//! Shared application state handed to HTTP handlers.

use std::sync::Arc;

use crate::domain::ports::{AuthOperations, CaseOperations, TokenService};

/// Driving ports the HTTP adapter dispatches into.
///
/// Handlers depend on trait objects only, so tests can swap in stub
/// implementations without a database or real token keys.
#[derive(Clone)]
pub struct HttpState {
    pub cases: Arc<dyn CaseOperations>,
    pub auth: Arc<dyn AuthOperations>,
    pub tokens: Arc<dyn TokenService>,
}

impl HttpState {
    pub fn new(
        cases: Arc<dyn CaseOperations>,
        auth: Arc<dyn AuthOperations>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            cases,
            auth,
            tokens,
        }
    }
}
