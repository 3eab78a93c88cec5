//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see domain ports, so
//! they stay testable without network I/O.

use std::sync::Arc;

use crate::domain::ports::ProfileGenerator;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub profiles: Arc<dyn ProfileGenerator>,
}

impl HttpState {
    pub fn new(profiles: Arc<dyn ProfileGenerator>) -> Self {
        Self { profiles }
    }
}
