//! Assembled inputs for [`super::create_server`].

use std::net::SocketAddr;

use actix_web::cookie::Key;
use napchart::outbound::persistence::DbPool;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Everything the server needs once settings have been resolved.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            bind_addr,
            db_pool: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Serve from PostgreSQL instead of the fixture adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(mut self, prometheus: PrometheusMetrics) -> Self {
        self.prometheus = Some(prometheus);
        self
    }
}
