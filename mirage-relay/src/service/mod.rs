//! Service Module
//!
//! Business logic layer for the relay. Services validate, pick between the
//! mock and real upstream paths, and normalize upstream responses.

pub mod generate;
pub mod status;

// Re-export for convenience
pub use generate as generate_service;
pub use status as status_service;
