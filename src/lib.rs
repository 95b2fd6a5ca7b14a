//! # mermaid2pdf
//!
//! Headless Chrome HTML-to-PDF conversion with diagram readiness detection.
//!
//! This crate converts a single HTML document — a local file or an HTTP(S)
//! URL — into a paginated A4 PDF. Its one distinguishing feature over a plain
//! print-to-PDF is that it waits for client-side Mermaid rendering to finish,
//! signaled by a `data-mermaid-ready` attribute on the document body, before
//! capturing output.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────┐   ┌─────────┐   ┌──────────────┐   ┌────────┐   ┌─────────┐
//! │  Launch  │──▶│  Load   │──▶│ AwaitingReady │──▶│ Settle │──▶│  Print  │
//! │ (Chrome) │   │ (60s ✖) │   │   (30s ⚠)     │   │ (2s)   │   │ (A4)    │
//! └──────────┘   └─────────┘   └──────────────┘   └────────┘   └─────────┘
//!       │                                                           │
//!       └────────────── guaranteed teardown on every path ──────────┘
//! ```
//!
//! The load timeout is fatal; the readiness timeout only logs a warning and
//! proceeds, tolerating pages that never set the marker (no diagrams).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mermaid2pdf::{convert, ConvertConfig};
//!
//! let config = ConvertConfig::default();
//! let report = convert("report.html", "report.pdf".as_ref(), &config)?;
//! println!("wrote {}K", report.kilobytes());
//! ```
//!
//! Or from the command line:
//!
//! ```text
//! mermaid2pdf <input.html|url> <output.pdf>
//! ```
//!
//! ## Environment Configuration
//!
//! With the `env-config` feature (default), timing constants and the Chrome
//! binary path can be overridden from the environment (loaded from an
//! optional `app.env` file or the process environment):
//!
//! | Variable | Type | Default | Description |
//! |----------|------|---------|-------------|
//! | `CONVERT_LOAD_TIMEOUT_SECONDS` | u64 | 60 | Content load limit (fatal) |
//! | `CONVERT_READY_TIMEOUT_SECONDS` | u64 | 30 | Readiness wait (advisory) |
//! | `CONVERT_SETTLE_DELAY_MS` | u64 | 2000 | Post-readiness settle delay |
//! | `CHROME_PATH` | String | auto | Custom Chrome binary path |
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, ConvertError>`](Result). Every
//! error is fatal for the run — there are no retries — and the browser
//! process is always torn down first via the [`BrowserSession`] RAII guard.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// Modules
// ============================================================================

pub mod browser;
pub mod config;
pub mod convert;
pub mod error;
pub mod prelude;
pub mod source;

// ============================================================================
// Re-exports (Public API)
// ============================================================================

pub use browser::{BrowserSession, create_launch_options};
pub use config::{ConvertConfig, ConvertConfigBuilder};
pub use convert::{ConversionReport, READY_MARKER_ATTRIBUTE, convert};
pub use error::{ConvertError, Result};
pub use source::Source;

// Feature-gated re-exports
#[cfg(feature = "env-config")]
pub use config::env::{chrome_path_from_env, from_env};
