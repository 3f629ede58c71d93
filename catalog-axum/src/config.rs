//! Settings of the catalog's HTTP surface.

use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};

/// Where the catalog API listens, and how much a single listing may return.
///
/// Clients choose a page size with the `size` query parameter of
/// `/api/products` and `/api/tag/{name}/products`. Requests for more than
/// `page_limit` products are served `page_limit` products instead.
///
/// In a `catalogd` config file this is the `[server]` section:
///
/// ```toml
/// [server]
/// bind_address = "127.0.0.1:3000"
/// page_limit = 50
/// ```
///
/// ```
/// use catalog_axum::config::AxumConfig;
///
/// let config = AxumConfig::default();
/// assert_eq!(config.bind_address.port(), 8080);
/// assert_eq!(config.page_limit, 100);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AxumConfig {
    /// Socket the API listens on; every interface on port 8080 by default
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Upper bound on the number of products in one page
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080))
}

fn default_page_limit() -> u32 {
    100
}

impl Default for AxumConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            page_limit: default_page_limit(),
        }
    }
}
