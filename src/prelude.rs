//! Convenient imports for common usage patterns.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mermaid2pdf::prelude::*;
//! ```
//!
//! This imports:
//!
//! - [`convert`] - The conversion entry point
//! - [`ConversionReport`] - Successful-run summary
//! - [`ConvertConfig`] / [`ConvertConfigBuilder`] - Run configuration
//! - [`ConvertError`] / [`Result`] - Error handling
//! - [`BrowserSession`] - RAII browser scope
//! - [`Source`] - Input classification

// Core types
pub use crate::browser::BrowserSession;
pub use crate::config::{ConvertConfig, ConvertConfigBuilder};
pub use crate::convert::{ConversionReport, convert};
pub use crate::error::{ConvertError, Result};
pub use crate::source::Source;

// Feature-gated exports
#[cfg(feature = "env-config")]
pub use crate::config::env::{chrome_path_from_env, from_env};
