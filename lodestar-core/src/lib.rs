//! Shared primitives and traits for the Lodestar alignment crates.
//!
//! `lodestar-core` provides the foundation the aligner crate builds on:
//!
//! - **Error types**: [`LodestarError`] and [`Result`] for structured error handling
//! - **Traits**: [`Scored`] and [`Summarizable`] for result types

pub mod error;
pub mod traits;

pub use error::{LodestarError, Result};
pub use traits::*;
