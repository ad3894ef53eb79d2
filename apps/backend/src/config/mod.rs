//! Startup configuration.

pub mod counterpart;
