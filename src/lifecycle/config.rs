//! Server configuration: defaults, builder, and command-line/env overrides.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;

/// Default bind address.
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(DEFAULT_HOST, DEFAULT_PORT),
        }
    }
}

impl ServerConfig {
    /// Creates a new server config builder.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }
}

/// Builder for ServerConfig.
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    host: Option<IpAddr>,
    port: Option<u16>,
}

impl ServerConfigBuilder {
    /// Sets the bind host.
    pub fn host(mut self, host: IpAddr) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the listen port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Builds the server config.
    pub fn build(self) -> ServerConfig {
        ServerConfig {
            addr: SocketAddr::new(
                self.host.unwrap_or(DEFAULT_HOST),
                self.port.unwrap_or(DEFAULT_PORT),
            ),
        }
    }
}

/// Command-line interface for the typed-gather server.
#[derive(Debug, Parser)]
#[command(name = "typed-gather")]
#[command(about = "Typed records and concurrent fetches over HTTP", long_about = None)]
pub struct Args {
    /// Address to bind
    #[arg(long, env = "TYPED_GATHER_HOST", default_value_t = DEFAULT_HOST)]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "TYPED_GATHER_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        ServerConfig::builder().host(args.host).port(args.port).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binds_all_interfaces_on_8000() {
        assert_eq!(ServerConfig::default().addr.to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn test_args_override_host_and_port() {
        let args = Args::try_parse_from(["typed-gather", "--host", "127.0.0.1", "--port", "9090"]).unwrap();
        let config = ServerConfig::from(args);
        assert_eq!(config.addr.to_string(), "127.0.0.1:9090");
    }

    #[test]
    fn test_builder_keeps_unset_defaults() {
        let config = ServerConfig::builder().port(3000).build();
        assert_eq!(config.addr, SocketAddr::new(DEFAULT_HOST, 3000));
    }
}
