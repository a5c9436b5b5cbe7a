//! HTTP API implementing the Dyn DNS update convention.
//!
//! # API Endpoints
//!
//! ## `/healthcheck` (GET)
//!
//!   Returns HTTP 200 (OK) and the JSON body `{"ok":"healthy"}` when the service is operational.
//!
//! ## `/update` (any method)
//!
//!   The update endpoint a router calls when it detects an IP address change.
//!   Routers disagree on the exact path (`/update`, `/nic/update`, ...), so any
//!   request whose path mentions `/update` is handled; everything else is
//!   answered 404 with an empty body.
//!
//!   The caller's address is read from the configured forwarded-IP header
//!   (`x-real-ip` by default) and the provider token from the password half of
//!   the `Authorization: Basic` credentials. An optional `hostname` query
//!   parameter names the FQDN to check before updating: when its current `A`
//!   record already equals the caller's address, the provider is not called at
//!   all.
//!
//!   The response is `text/plain`: the result code on the first line, a
//!   `status path remote-addr` echo line, then every received request header
//!   as a `name : value` line (sensitive headers redacted).
//!
//!   | Condition | status | result |
//!   |---|---|---|
//!   | path without `/update` | 404 | (none) |
//!   | missing client-IP header | 402 | `nofqdn` |
//!   | record already current | 200 | `nochg` |
//!   | missing `Authorization` | 401 | `badauth` |
//!   | `Authorization` not Basic | 403 | `badauth` |
//!   | malformed Basic credentials | 406 | `badauth` |
//!   | provider answered 200 | 200 | `good` |
//!   | provider answered non-200 | provider status | `911` |
//!   | provider unreachable | 502 | `dnserr` |

mod model;
mod outcome;
mod routes;
pub mod server;

pub use outcome::ResultCode;
pub use server::new;
