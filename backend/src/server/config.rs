//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use profile_backend::domain::ports::ProfileGenerator;

/// Everything the server needs beyond its health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) profiles: Arc<dyn ProfileGenerator>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, profiles: Arc<dyn ProfileGenerator>) -> Self {
        Self {
            bind_addr,
            profiles,
        }
    }
}
