//! rusty-inbox/crates/storage-adapters/src/lib.rs
//!
//! Implementations of the `InboxRepository` port: Postgres for production,
//! an in-memory store for tests and local development.

pub mod memory;

#[cfg(feature = "db-postgres")]
pub mod postgres;

pub use memory::MemoryInboxRepository;

#[cfg(feature = "db-postgres")]
pub use postgres::PgInboxRepository;
