//! Vigil - change-tracking containers
//!
//! This crate re-exports both layers of the Vigil system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: vigil_monitor    — Tracked containers, change records, change log
//! Layer 0: vigil_foundation — Core types (Value, Type, Error, collections)
//! ```

pub use vigil_foundation as foundation;
pub use vigil_monitor as monitor;
