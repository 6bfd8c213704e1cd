//! Data Transfer Objects
//!
//! Wire shapes for the relay endpoints. Request and response bodies use
//! camelCase field names; the status envelope is tagged on its `status`
//! field so one JSON shape covers every lifecycle phase.

pub mod error;
pub mod generate;
pub mod status;
