//! dataverse-webapi - HTTP client for the Dataverse Web API.
//!
//! [`WebApiClient`] creates, reads, updates and deletes records (batching
//! bulk creates through `$batch`), runs read-only SQL through the
//! server-side query procedure, and provisions tables, waiting until a new
//! table is queryable before returning.
//!
//! Every request goes through the request retry policy from
//! [`ClientConfig`](dataverse_core::ClientConfig). The HTTP layer is the
//! [`Transport`](dataverse_core::Transport) trait; [`HttpTransport`] is the
//! reqwest implementation used by [`WebApiClient::new`].

mod client;
pub mod endpoints;
mod metadata;
mod query;
mod records;
mod transport;

#[cfg(test)]
mod mock;

pub use client::WebApiClient;
pub use transport::HttpTransport;
