//! Application layer - use-case handlers wiring domain and ports.

pub mod handlers;
