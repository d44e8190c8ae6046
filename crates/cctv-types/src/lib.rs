//! JOLUP CCTV Types - Static camera configuration for the dashboard
//!
//! This crate has zero dependencies on other cctv crates. It defines:
//!
//! - Camera records and their status / kind enumerations
//! - The immutable camera table handed to the composition root
//! - Hardcoded status values and branding shown by the dashboard
//!
//! # Invariants
//!
//! 1. The camera table is fixed at startup and never mutated
//! 2. Camera identifiers are non-empty and unique within a table
//! 3. Only transient UI state (clock, glitch flags, dot positions) changes at runtime

pub mod camera;
pub mod table;
pub mod settings;
pub mod error;

pub use camera::*;
pub use table::*;
pub use settings::*;
pub use error::*;
