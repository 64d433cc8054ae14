//! # CardKit Core
//!
//! Shared building blocks for the CardKit crates:
//!
//! - **error**: `thiserror` error types and the crate-wide `Result`
//! - **constants**: card dimensions and tuned interaction constants
//! - **metrics**: [`HandleMetrics`], the geometry shared by hit-testing and
//!   handle rendering

pub mod constants;
pub mod error;
pub mod metrics;

pub use error::{CodecError, DocumentError, Error, Result};
pub use metrics::HandleMetrics;
