use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::time::Duration;

/// ICANN-operated root server (l.root-servers.net), the fixed entry point of every walk.
pub const DEFAULT_ROOT_SERVER: Ipv4Addr = Ipv4Addr::new(199, 7, 83, 42);

pub const DEFAULT_DNS_PORT: u16 = 53;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default = "default_root_server")]
    pub root_server: Ipv4Addr,

    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Nested name-server resolutions allowed below the requested name.
    #[serde(default = "default_max_referral_depth")]
    pub max_referral_depth: usize,

    /// Queries allowed for one top-level resolution, nested lookups included.
    #[serde(default = "default_max_queries")]
    pub max_queries: usize,
}

impl ResolverConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root_server: default_root_server(),
            dns_port: default_dns_port(),
            query_timeout_ms: default_query_timeout_ms(),
            max_referral_depth: default_max_referral_depth(),
            max_queries: default_max_queries(),
        }
    }
}

fn default_root_server() -> Ipv4Addr {
    DEFAULT_ROOT_SERVER
}

fn default_dns_port() -> u16 {
    DEFAULT_DNS_PORT
}

fn default_query_timeout_ms() -> u64 {
    2000
}

fn default_max_referral_depth() -> usize {
    8
}

fn default_max_queries() -> usize {
    64
}
