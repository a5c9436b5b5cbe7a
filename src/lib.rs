//! Dyn Relay
//!
//! A tiny stand-in for a [Dyn DNS]-style update server, suitable for home
//! routers (e.g. D-Link) that can be pointed at a custom DynDNS endpoint.
//!
//! The router calls `/update` with Basic-Auth credentials whenever it detects
//! an IP address change. Dyn Relay extracts the caller's address from a
//! trusted forwarded-IP header, optionally checks whether the DNS record is
//! actually stale, and forwards the change to an [EntryDNS]-style provider
//! (`GET /records/modify/<token>?ip=...`), answering with a short Dyn-DNS
//! result code.
//!
//! [Dyn DNS]: https://help.dyn.com/remote-access-api/
//! [EntryDNS]: https://entrydns.net
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod config;
pub mod error;
pub mod provider;
pub mod resolver;

pub use api::new as new_http;
pub use config::{Config, SharedConfig};
pub use provider::ProviderClient;
pub use resolver::{DynHostResolver, HostResolver, SystemResolver};
