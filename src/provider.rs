//! Client for the upstream dynamic DNS provider.
//!
//! The provider is treated as an opaque HTTP endpoint with an EntryDNS-style
//! record-modify URL: `GET <base>/records/modify/<token>?ip=<IPv4>`. Only the
//! response status code participates in decision making; the body is read for
//! diagnostics and dropped.

use crate::config::SharedConfig;
use crate::error::Error;
use axum::http::StatusCode;

pub struct ProviderClient {
    base_url: String,
    http: reqwest::Client,
}

impl ProviderClient {
    pub fn new(config: &SharedConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;
        Ok(ProviderClient {
            base_url: config.provider_base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Ask the provider to point the record behind `token` at `ip`.
    ///
    /// Completes with the provider's HTTP status code; transport failures
    /// (refused connection, TLS, timeout) surface as [`Error::Upstream`].
    pub async fn modify_record(&self, token: &str, ip: &str) -> Result<StatusCode, Error> {
        // The token is part of the URL path, so the URL itself must stay out
        // of the logs.
        let url = format!("{}/records/modify/{}", self.base_url, token);
        let response = self.http.get(&url).query(&[("ip", ip)]).send().await?;
        let status = response.status();
        tracing::info!("provider answered {status} for ip {ip}");
        match response.text().await {
            Ok(body) if !body.is_empty() => tracing::debug!("provider response body: {body}"),
            Ok(_) => {}
            Err(err) => tracing::debug!("failed reading provider response body: {err}"),
        }
        Ok(status)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Config;
    use std::sync::Arc;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base_url: &str) -> ProviderClient {
        let config = Arc::new(Config {
            provider_base_url: base_url.to_string(),
            ..Config::default()
        });
        ProviderClient::new(&config).expect("client must build")
    }

    #[tokio::test]
    async fn test_modify_record_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/records/modify/TOKEN123"))
            .and(query_param("ip", "203.0.113.5"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&server)
            .await;

        let status = client_for(&server.uri())
            .modify_record("TOKEN123", "203.0.113.5")
            .await
            .expect("provider call must complete");
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_modify_record_provider_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let status = client_for(&server.uri())
            .modify_record("TOKEN123", "203.0.113.5")
            .await
            .expect("non-2xx is not a transport error");
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_modify_record_unreachable_provider() {
        // Nothing listens on the discard port.
        let err = client_for("http://127.0.0.1:9")
            .modify_record("TOKEN123", "203.0.113.5")
            .await
            .expect_err("connecting to a closed port must fail");
        assert!(matches!(err, Error::Upstream(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = client_for("https://entrydns.net/");
        assert_eq!(client.base_url, "https://entrydns.net");
    }
}
