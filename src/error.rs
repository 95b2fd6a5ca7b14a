//! Error types for the conversion pipeline.
//!
//! This module provides [`ConvertError`], a unified error type for all
//! conversion operations, and a convenient [`Result`] type alias.
//!
//! Every variant is fatal: the caller logs it and the process exits non-zero.
//! The readiness-marker timeout is deliberately *not* represented here — it is
//! an advisory condition logged as a warning while the conversion proceeds.
//!
//! # Example
//!
//! ```rust
//! use mermaid2pdf::{ConvertError, Result};
//!
//! fn preflight() -> Result<()> {
//!     Err(ConvertError::InputNotFound("missing.html".into()))
//! }
//!
//! match preflight() {
//!     Ok(()) => println!("ok"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;

/// Errors that can occur while converting an HTML document to PDF.
///
/// Each variant includes context about what went wrong. All variants map to
/// a non-zero process exit; there is no retry or partial recovery.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The local input file does not exist.
    ///
    /// Raised by the preflight check, before any browser is launched.
    /// URL-shaped sources skip this check entirely.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Reading the local input file failed.
    #[error("Failed to read input file {}: {source}", .path.display())]
    ReadInput {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Chrome/Chromium failed to launch.
    ///
    /// Typically indicates a missing browser binary or invalid launch flags.
    #[error("Failed to launch browser: {0}")]
    BrowserLaunch(String),

    /// Opening the session's single tab failed.
    #[error("Failed to open browser tab: {0}")]
    TabCreation(String),

    /// Navigation failed outright (bad URL, unreachable host, renderer crash).
    #[error("Failed to load content: {0}")]
    Navigation(String),

    /// Content load did not complete within the load timeout.
    ///
    /// Unlike the readiness-marker timeout, this one is fatal.
    #[error("Content load timed out: {0}")]
    LoadTimeout(String),

    /// The browser failed to render the page into a PDF.
    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    /// Writing the captured PDF bytes to the output path failed.
    #[error("Failed to write output file {}: {source}", .path.display())]
    WriteOutput {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Invalid configuration values.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<String> for ConvertError {
    fn from(msg: String) -> Self {
        ConvertError::Configuration(msg)
    }
}

impl From<&str> for ConvertError {
    fn from(msg: &str) -> Self {
        ConvertError::Configuration(msg.to_string())
    }
}

/// Result type alias using [`ConvertError`].
pub type Result<T> = std::result::Result<T, ConvertError>;

// ============================================================================
// Unit Tests
// ============================================================================
