//! Adspend Core - domain entities, services, and traits.
//!
//! This crate contains the core logic for the two-stage marketing
//! spend / revenue pipeline. It is database-agnostic and defines
//! repository traits that are implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod pipeline;
pub mod revenue;
pub mod spend;
pub mod training;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
