//! API endpoint handlers.
//!
//! Handlers stay thin: they extract, call into `reference` / `prediction`,
//! and shape the JSON.

pub mod diseases;
pub mod health;
pub mod predict;
