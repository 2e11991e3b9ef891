//! Shared service plumbing: tracing, request ids, health probes and the response envelope.

pub mod envelope;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
