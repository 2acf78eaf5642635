//! Core values, persistent collections, and errors for Vigil.
//!
//! This crate provides:
//! - [`Value`] - The dynamically typed value stored in tracked containers
//! - [`Type`] and [`ContainerKind`] - Type descriptors and container classification
//! - [`Error`] - Rich error types with context
//! - Persistent collections ([`LtVec`], [`LtMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod types;
pub mod value;

pub use collections::{LtMap, LtVec};
pub use error::{Error, ErrorContext, ErrorKind};
pub use types::{ContainerKind, Type};
pub use value::Value;

/// Result type for Vigil operations.
pub type Result<T> = std::result::Result<T, Error>;
