//! Shared end-to-end test infrastructure.
#![allow(dead_code)] // Each test binary uses a subset of the helpers.

pub mod client;
pub mod constants;
pub mod fixtures;
pub mod server;
