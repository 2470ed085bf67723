//! Staybook Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the staybook booking engine. It includes:
//!
//! - Domain models (Listing, Booking, ManualBlock, etc.)
//! - Repository traits for the injected persistence boundary
//! - Unified error handling with stable error codes
//! - Refund policy configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use config::{PolicyConfig, RefundPolicy};
pub use error::EngineError;

/// Result type alias using EngineError
pub type EngineResult<T> = Result<T, EngineError>;
