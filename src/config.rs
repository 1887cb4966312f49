use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_BASE_URL: &str = "https://api.mixpeek.com";
pub const DEFAULT_COLLECTION: &str = "movie_trailers";

/// Process-wide settings, parsed once in `main` and handed to the components that need them.
///
/// Every option can also be set through the environment (a `.env` file is loaded first).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "vsearch",
    version,
    about = "HTTP search facade over the Mixpeek multimodal search API"
)]
pub struct Config {
    /// Mixpeek API key sent as a bearer token.
    #[arg(long, env = "MIXPEEK_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: ApiKey,

    /// Base URL of the Mixpeek API.
    #[arg(long, env = "MIXPEEK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Address to bind the HTTP server to.
    #[arg(long, env = "VSEARCH_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Collection searched when a request names none.
    #[arg(long, env = "COLLECTION_NAME", default_value = DEFAULT_COLLECTION)]
    pub default_collection: String,

    /// Seconds before an outbound search call is abandoned.
    #[arg(long, env = "MIXPEEK_TIMEOUT_SECS", default_value_t = 30)]
    pub provider_timeout_secs: u64,

    /// Seconds allowed for establishing the outbound TCP connection.
    #[arg(long, env = "MIXPEEK_CONNECT_TIMEOUT_SECS", default_value_t = 10)]
    pub connect_timeout_secs: u64,
}

impl Config {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[derive(Clone, Default)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for ApiKey {
    fn from(value: String) -> Self {
        Self(value.trim().to_string())
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let argv = std::iter::once("vsearch").chain(args.iter().copied());
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn explicit_flags_override_defaults() {
        let config = parse(&[
            "--api-key",
            "  secret  ",
            "--base-url",
            "http://localhost:9000",
            "--host",
            "127.0.0.1",
            "--port",
            "3000",
            "--default-collection",
            "trailers",
            "--provider-timeout-secs",
            "5",
            "--connect-timeout-secs",
            "2",
        ]);

        assert_eq!(config.api_key.expose(), "secret");
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.listen_addr(), "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.default_collection, "trailers");
        assert_eq!(config.provider_timeout(), Duration::from_secs(5));
        assert_eq!(config.connect_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn rejects_non_numeric_port() {
        let result = Config::try_parse_from(["vsearch", "--port", "http"]);
        assert!(result.is_err());
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::from("sk-live-123".to_string());
        assert_eq!(format!("{key:?}"), "[REDACTED]");
        assert!(!key.is_empty());
    }
}
