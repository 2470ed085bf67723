//! Reference storage for the staybook engine
//!
//! The engine injects persistence through the repository traits in
//! [`staybook_core::traits`]; the real system backs them with a hosted
//! document database, and any key-value or relational store satisfies the
//! contract. This crate ships the in-memory implementation used by tests
//! and small embeddings.

pub mod memory;

pub use memory::MemoryStore;
