//! Outbound HTTP plumbing.

pub mod client;

pub use client::{HttpTimeouts, build_http_client};
