//! SQLite storage implementation for the adspend pipeline.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `adspend-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for the input tables and both artifacts
//! - Database-specific row types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies
//! exist. The core crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!    storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod revenue;
pub mod spend;
pub mod training;

// Re-export database utilities
pub use db::{
    create_pool, ensure_columns, get_connection, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from adspend-core for convenience
pub use adspend_core::errors::{DatabaseError, Error, Result};
