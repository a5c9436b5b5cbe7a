use crate::error::Error;
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub type SharedConfig = Arc<Config>;

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to.
    #[serde(default = "default_api_bind_addr")]
    pub api_bind_addr: SocketAddr,
    /// Inbound request timeout, in seconds.
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_api_timeout")]
    pub api_timeout: Duration,
    /// Base URL of the dynamic DNS provider the relay updates.
    #[serde(default = "default_provider_base_url")]
    pub provider_base_url: String,
    /// Timeout for the provider update call, in seconds.
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_upstream_timeout")]
    pub upstream_timeout: Duration,
    /// Header carrying the caller's real address, set by the router/proxy
    /// in front of the relay.
    #[serde(default = "default_client_ip_header")]
    pub client_ip_header: String,
}

fn default_api_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8084))
}

fn default_api_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_provider_base_url() -> String {
    "https://entrydns.net".to_string()
}

fn default_upstream_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_client_ip_header() -> String {
    "x-real-ip".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_bind_addr: default_api_bind_addr(),
            api_timeout: default_api_timeout(),
            provider_base_url: default_provider_base_url(),
            upstream_timeout: default_upstream_timeout(),
            client_ip_header: default_client_ip_header(),
        }
    }
}

impl Config {
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        Ok(conf)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let conf: Config = serde_json::from_str("{}").expect("empty object must parse");
        assert_eq!(conf.api_bind_addr, "0.0.0.0:8084".parse().unwrap());
        assert_eq!(conf.api_timeout, Duration::from_secs(30));
        assert_eq!(conf.provider_base_url, "https://entrydns.net");
        assert_eq!(conf.client_ip_header, "x-real-ip");
    }

    #[test]
    fn test_full_config() {
        let conf: Config = serde_json::from_str(
            r#"{
                "api_bind_addr": "127.0.0.1:9000",
                "api_timeout": 5,
                "provider_base_url": "https://dns.example.com",
                "upstream_timeout": 10,
                "client_ip_header": "x-forwarded-for"
            }"#,
        )
        .expect("full config must parse");
        assert_eq!(conf.api_bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(conf.api_timeout, Duration::from_secs(5));
        assert_eq!(conf.upstream_timeout, Duration::from_secs(10));
        assert_eq!(conf.provider_base_url, "https://dns.example.com");
        assert_eq!(conf.client_ip_header, "x-forwarded-for");
    }
}
