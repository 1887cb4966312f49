//! Mixpeek API gateway: wire types and the HTTP client for `/features/search`.

pub mod client;
pub mod types;

use std::time::Duration;

use reqwest::Client;

pub use client::{MixpeekClient, MixpeekError, SearchProvider};

/// Shared outbound HTTP client. Built once at startup and cloned into the gateway.
pub fn build_http_client(
    connect_timeout: Duration,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(timeout)
        .build()
}
