//! HTTP transport with retry and backoff

mod client;

pub use client::{HttpClient, HttpClientBuilder};
