//! Shared error types for the ambient I/O surfaces (loader, config) that sit
//! outside the core's architecturally-error-free boundary.

pub mod error;

pub use error::SimError;
