//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Upstream HTTP clients for text completion and image generation
//! - Offline mocks of both upstreams
//! - The inbound HTTP API and CLI controllers

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
