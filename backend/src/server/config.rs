//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use clinic_backend::outbound::ClinicRepositories;
use clinic_backend::outbound::security::TokenSecret;

/// Everything `create_server` needs beyond the health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) repositories: ClinicRepositories,
    pub(crate) token_secret: TokenSecret,
}

impl ServerConfig {
    /// Serve `repositories` on `bind_addr`, signing tokens with `token_secret`.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        repositories: ClinicRepositories,
        token_secret: TokenSecret,
    ) -> Self {
        Self {
            bind_addr,
            repositories,
            token_secret,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
