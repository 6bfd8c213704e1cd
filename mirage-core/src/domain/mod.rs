//! Core domain types
//!
//! Business entities behind the wire DTOs. Job handles and generation
//! requests are shared by the relay and the client orchestrator;
//! [`job::JobStatus`] is what the relay normalizes upstream results into
//! before rendering them onto the wire. Wire naming lives in
//! [`crate::dto`], not here.

pub mod job;
pub mod request;
