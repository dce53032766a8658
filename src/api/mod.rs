//! HTTP API for the skin condition classifier.
//!
//! Four JSON endpoints nested under `/api/`, all reading the same
//! immutable `ApiContext`. The router is composable: `api_router()`
//! returns a `Router` that can be served directly or mounted elsewhere.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::api_router;
pub use server::{start_api_server, ApiServer, ApiSession};
pub use types::ApiContext;
