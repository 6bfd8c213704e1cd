//! Mirage Core
//!
//! Core types and abstractions for the Mirage image generation system.
//!
//! This crate contains:
//! - Domain types: Core business entities (JobHandle, JobStatus, etc.)
//! - DTOs: Data transfer objects exchanged over the relay endpoints

pub mod domain;
pub mod dto;
