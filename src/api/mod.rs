//! Beamlit control-plane API access.
//!
//! The transport boundary for the rest of the crate: one request in, one
//! fully drained response out. Status interpretation lives with the callers.
//!
//! # Module Structure
//!
//! - [`client`] - HTTP client for the control plane

pub mod client;

pub use client::{ApiClient, ApiResponse};
