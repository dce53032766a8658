//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. CORS (tower-http): browser clients are served from another origin
//! 2. Access logger: request id, method, path, status, latency

pub mod access;
