//! The conversion pipeline: launch → load → await-readiness → settle → print.
//!
//! [`convert`] drives one browser session through the whole sequence. All
//! steps run on the calling thread, strictly in order; the only concurrency
//! is inside Chrome itself.
//!
//! Two timeouts with deliberately different policies govern the run:
//!
//! | Timeout | Default | On expiry |
//! |---------|---------|-----------|
//! | content load | 60s | fatal, propagated |
//! | readiness marker | 30s | warning, conversion proceeds |
//!
//! The readiness marker is the `data-mermaid-ready` attribute that the page's
//! diagram bootstrap sets on `document.body` once client-side rendering has
//! finished. Pages without diagrams never set it, which is why its timeout is
//! tolerated rather than fatal.

use std::path::{Path, PathBuf};
use std::time::Instant;

use headless_chrome::Tab;
use headless_chrome::types::PrintToPdfOptions;

use crate::browser::BrowserSession;
use crate::config::ConvertConfig;
use crate::error::{ConvertError, Result};
use crate::source::{Source, truncate_url};

// ============================================================================
// Constants
// ============================================================================

/// Attribute set on `document.body` when client-side diagram rendering is done.
pub const READY_MARKER_ATTRIBUTE: &str = "data-mermaid-ready";

/// Probe expression: true once the readiness marker is present (non-null).
const READY_PROBE_JS: &str = "document.body.getAttribute('data-mermaid-ready') !== null";

/// Expression reading the marker's value, logged for diagnostics.
const READY_VALUE_JS: &str = "document.body.getAttribute('data-mermaid-ready')";

const MM_PER_INCH: f64 = 25.4;

/// A4 paper, expressed in inches as the print API expects.
const A4_WIDTH_INCHES: f64 = 210.0 / MM_PER_INCH;
const A4_HEIGHT_INCHES: f64 = 297.0 / MM_PER_INCH;

/// Uniform 20mm page margin, in inches.
const MARGIN_INCHES: f64 = 20.0 / MM_PER_INCH;

// ============================================================================
// Public API
// ============================================================================

/// Outcome of a successful conversion.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    /// Where the PDF was written.
    pub output_path: PathBuf,
    /// Size of the written file in bytes.
    pub bytes_written: u64,
    /// Whether the readiness marker appeared before its timeout.
    pub diagrams_ready: bool,
}

impl ConversionReport {
    /// File size rounded to kilobytes, as reported in the log.
    pub fn kilobytes(&self) -> u64 {
        (self.bytes_written as f64 / 1024.0).round() as u64
    }
}

/// Convert one HTML document (local file or URL) into a PDF at `output_path`.
///
/// Phases, in order:
///
/// 1. Preflight: a non-URL source must exist on disk. Checked before any
///    browser is launched; a URL-shaped source skips the check.
/// 2. Launch headless Chrome and open the session's single tab.
/// 3. Load content: navigate to the URL, or inject the file's full text via a
///    data URL. Load failure or timeout is fatal.
/// 4. Poll for the readiness marker (advisory timeout, see module docs).
/// 5. Sleep the settle delay to let fonts/layout finish.
/// 6. Print to PDF (A4, 20mm margins, backgrounds on, CSS page size rules
///    ignored) and write the bytes to `output_path`, overwriting if present.
///
/// The browser session is torn down on every exit path, including errors.
/// A failed capture never leaves a half-written PDF: bytes are written only
/// after the capture succeeded in full.
///
/// # Errors
///
/// Any [`ConvertError`]; all are fatal for the run, no retries.
pub fn convert(
    source: &str,
    output_path: &Path,
    config: &ConvertConfig,
) -> Result<ConversionReport> {
    let source = Source::classify(source);

    // Fail fast on a missing local input, before the session is opened.
    source.preflight()?;

    log::info!("🚀 Starting PDF conversion...");
    let session = BrowserSession::open(config)?;

    load_content(&session, &source, config)?;

    log::info!("📄 HTML content loaded, waiting for Mermaid...");
    let diagrams_ready = wait_for_diagram_ready(session.tab(), config);

    // Unconditional settle delay: covers rendering work the marker cannot
    // observe (font loading, animation settling).
    std::thread::sleep(config.settle_delay);

    log::info!("📄 Generating PDF...");
    let pdf_data = session
        .tab()
        .print_to_pdf(build_print_options())
        .map_err(|e| {
            log::error!("❌ Failed to generate PDF: {}", e);
            ConvertError::PdfGeneration(e.to_string())
        })?;

    std::fs::write(output_path, &pdf_data).map_err(|source| ConvertError::WriteOutput {
        path: output_path.to_path_buf(),
        source,
    })?;

    let report = ConversionReport {
        output_path: output_path.to_path_buf(),
        bytes_written: pdf_data.len() as u64,
        diagrams_ready,
    };

    log::info!("✅ PDF generated successfully: {}", output_path.display());
    log::info!("📊 File size: {}K", report.kilobytes());

    Ok(report)
    // `session` drops here, terminating the Chrome process.
}

// ============================================================================
// Internal Helper Functions
// ============================================================================

/// Load the source into the session's tab and wait for navigation to finish.
///
/// Both branches funnel into one navigation: URLs directly, files as data
/// URLs. The tab's default timeout (the configured load timeout) bounds the
/// wait; expiry is fatal.
fn load_content(session: &BrowserSession, source: &Source, config: &ConvertConfig) -> Result<()> {
    match source {
        Source::Url(url) => log::info!("📡 Loading from URL: {}", url),
        Source::File(path) => log::info!("📄 Loading from file: {}", path.display()),
    }

    let target = source.to_navigable_url()?;
    log::trace!("Navigating to: {}", truncate_url(&target, 100));

    let nav_start = Instant::now();
    let tab = session.tab();

    tab.navigate_to(&target).map_err(|e| {
        log::error!("❌ Failed to load content: {}", e);
        ConvertError::Navigation(e.to_string())
    })?;

    tab.wait_until_navigated().map_err(|e| {
        log::error!(
            "❌ Content load did not complete within {:?}: {}",
            config.load_timeout,
            e
        );
        ConvertError::LoadTimeout(e.to_string())
    })?;

    log::debug!("Content loaded in {:?}", nav_start.elapsed());
    Ok(())
}

/// Poll for the readiness marker on `document.body`.
///
/// Returns `true` as soon as the marker appears (its value is logged), or
/// `false` after the timeout — in which case exactly one warning is emitted
/// and the conversion proceeds with best-effort rendering state.
///
/// Evaluation errors during a poll count as "not ready yet"; a transient CDP
/// hiccup should not abort an otherwise healthy run.
fn wait_for_diagram_ready(tab: &Tab, config: &ConvertConfig) -> bool {
    let start = Instant::now();

    log::trace!(
        "Waiting up to {:?} for {} (polling every {:?})",
        config.ready_timeout,
        READY_MARKER_ATTRIBUTE,
        config.ready_poll_interval
    );

    while start.elapsed() < config.ready_timeout {
        let is_ready = tab
            .evaluate(READY_PROBE_JS, false)
            .ok()
            .and_then(|result| result.value)
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        if is_ready {
            let status = tab
                .evaluate(READY_VALUE_JS, false)
                .ok()
                .and_then(|result| result.value)
                .map(|v| match v.as_str() {
                    Some(s) => s.to_string(),
                    None => v.to_string(),
                })
                .unwrap_or_default();

            log::info!("🎨 Mermaid status: {}", status);
            return true;
        }

        std::thread::sleep(config.ready_poll_interval);
    }

    log::warn!(
        "⚠️ Mermaid readiness timeout after {:?}, proceeding anyway...",
        start.elapsed()
    );
    false
}

/// Build the fixed PDF print options.
///
/// A4 paper, uniform 20mm margins, background graphics included, and
/// author-specified CSS `@page` sizes ignored in favor of the fixed format.
fn build_print_options() -> Option<PrintToPdfOptions> {
    Some(PrintToPdfOptions {
        landscape: Some(false),
        display_header_footer: Some(false),
        print_background: Some(true),
        paper_width: Some(A4_WIDTH_INCHES),
        paper_height: Some(A4_HEIGHT_INCHES),
        margin_top: Some(MARGIN_INCHES),
        margin_bottom: Some(MARGIN_INCHES),
        margin_left: Some(MARGIN_INCHES),
        margin_right: Some(MARGIN_INCHES),
        prefer_css_page_size: Some(false),
        ..Default::default()
    })
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_options_fixed_a4_format() {
        let options = build_print_options().unwrap();

        let width = options.paper_width.unwrap();
        let height = options.paper_height.unwrap();
        assert!((width - 8.2677).abs() < 0.001, "A4 width, got {width}");
        assert!((height - 11.6929).abs() < 0.001, "A4 height, got {height}");
        assert_eq!(options.landscape, Some(false));
    }

    #[test]
    fn test_print_options_uniform_20mm_margins() {
        let options = build_print_options().unwrap();
        let expected = 20.0 / 25.4;

        for margin in [
            options.margin_top,
            options.margin_bottom,
            options.margin_left,
            options.margin_right,
        ] {
            assert!((margin.unwrap() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_print_options_backgrounds_on_css_page_size_off() {
        let options = build_print_options().unwrap();
        assert_eq!(options.print_background, Some(true));
        assert_eq!(options.prefer_css_page_size, Some(false));
        assert_eq!(options.display_header_footer, Some(false));
    }

    #[test]
    fn test_report_rounds_to_kilobytes() {
        let report = |bytes| ConversionReport {
            output_path: PathBuf::from("out.pdf"),
            bytes_written: bytes,
            diagrams_ready: true,
        };

        assert_eq!(report(0).kilobytes(), 0);
        assert_eq!(report(1024).kilobytes(), 1);
        assert_eq!(report(1536).kilobytes(), 2); // rounds, not truncates
        assert_eq!(report(10 * 1024 + 100).kilobytes(), 10);
    }

    #[test]
    fn test_ready_probe_targets_marker_attribute() {
        assert!(READY_PROBE_JS.contains(READY_MARKER_ATTRIBUTE));
        assert!(READY_VALUE_JS.contains(READY_MARKER_ATTRIBUTE));
    }

    /// Missing local input fails before any browser work.
    #[test]
    fn test_convert_rejects_missing_input_without_browser() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.pdf");

        let result = convert(
            "/definitely/not/a/real/input.html",
            &output,
            &ConvertConfig::default(),
        );

        assert!(matches!(result, Err(ConvertError::InputNotFound(_))));
        assert!(!output.exists(), "no partial output may be created");
    }
}
