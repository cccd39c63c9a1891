//! Listener address

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Args;

/// Address the HTTP listener binds to.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Interface to bind, rejected at startup unless it parses as an IP address
    #[arg(
        short = 'H',
        long,
        env = "SERVER_HOST",
        default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED)
    )]
    pub host: IpAddr,

    /// TCP port
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 8698)]
    pub port: u16,
}

impl ServerRuntimeConfig {
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
