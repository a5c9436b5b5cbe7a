//! Error types.

/// Error enumerates the possible Dyn Relay error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when [trying to load a `Config`][crate::config::Config::try_from_file]
    /// fails due to invalid JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),

    /// Returned when the update call to the dynamic DNS provider fails to
    /// complete, e.g. connection refused, TLS failure, or timeout. A provider
    /// that answers with a non-success status is *not* an `Upstream` error;
    /// its status code is part of the [update outcome][crate::api].
    #[error("provider request failed")]
    Upstream(#[from] reqwest::Error),

    /// Returned when resolving a hostname for the staleness check fails.
    /// Non-fatal to request handling: the caller proceeds as if no current
    /// IP is known.
    #[error("DNS lookup failed")]
    Resolve(#[from] trust_dns_resolver::error::ResolveError),
}
