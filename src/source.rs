//! Input source classification and loading.
//!
//! A conversion input is either an HTTP(S) URL or a filesystem path to an
//! existing HTML file. Classification follows the converter's contract: any
//! source string starting with `http` is treated as a URL and navigated to
//! directly; everything else is a local path.
//!
//! Local files are read eagerly and handed to the browser as a
//! `data:text/html` URL, so both branches share one navigation path. This
//! allows loading HTML without a web server; relative resource URLs inside
//! the document will not resolve, which matches the previous
//! content-injection behavior.

use std::path::PathBuf;

use crate::error::{ConvertError, Result};

/// A classified conversion input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// An HTTP(S) URL, navigated to directly.
    Url(String),
    /// A local HTML file, injected via data URL.
    File(PathBuf),
}

impl Source {
    /// Classify a raw source string.
    ///
    /// URL-shaped sources (prefix `http`) skip the file-existence preflight
    /// entirely; anything else is treated as a filesystem path.
    pub fn classify(raw: &str) -> Self {
        if raw.starts_with("http") {
            Source::Url(raw.to_string())
        } else {
            Source::File(PathBuf::from(raw))
        }
    }

    /// Check that a local input exists, before any browser is launched.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::InputNotFound`] for a missing local file.
    /// URL sources always pass.
    pub fn preflight(&self) -> Result<()> {
        match self {
            Source::Url(_) => Ok(()),
            Source::File(path) => {
                if path.exists() {
                    Ok(())
                } else {
                    Err(ConvertError::InputNotFound(path.clone()))
                }
            }
        }
    }

    /// Resolve this source into the URL the browser will navigate to.
    ///
    /// - URL sources are parsed and normalized via the `url` crate, catching
    ///   malformed inputs before a tab is opened.
    /// - File sources are read in full and percent-encoded into a
    ///   `data:text/html` URL.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::Navigation`] for a malformed URL
    /// - [`ConvertError::ReadInput`] if the file cannot be read
    pub fn to_navigable_url(&self) -> Result<String> {
        match self {
            Source::Url(raw) => {
                let parsed = url::Url::parse(raw)
                    .map_err(|e| ConvertError::Navigation(format!("invalid URL '{raw}': {e}")))?;
                Ok(parsed.to_string())
            }
            Source::File(path) => {
                let html = std::fs::read_to_string(path).map_err(|source| {
                    ConvertError::ReadInput {
                        path: path.clone(),
                        source,
                    }
                })?;
                Ok(html_to_data_url(&html))
            }
        }
    }

    /// Whether this source is URL-shaped.
    pub fn is_url(&self) -> bool {
        matches!(self, Source::Url(_))
    }
}

/// Convert HTML content to a `data:` URL.
///
/// Percent-encoding handles special characters so the document survives the
/// trip through the URL parser intact.
pub(crate) fn html_to_data_url(html: &str) -> String {
    format!(
        "data:text/html;charset=utf-8,{}",
        urlencoding::encode(html)
    )
}

/// Truncate a URL for logging purposes.
///
/// Data URLs can contain entire HTML documents; keep log lines readable.
pub(crate) fn truncate_url(url: &str, max_len: usize) -> String {
    if url.len() <= max_len {
        url.to_string()
    } else {
        format!("{}...", &url[..max_len])
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_classify_http_url() {
        assert!(Source::classify("http://example.com/report").is_url());
        assert!(Source::classify("https://example.com/report").is_url());
    }

    #[test]
    fn test_classify_local_path() {
        let source = Source::classify("docs/report.html");
        assert_eq!(source, Source::File(PathBuf::from("docs/report.html")));
    }

    /// URL-shaped sources never hit the filesystem preflight.
    #[test]
    fn test_preflight_skipped_for_urls() {
        let source = Source::classify("https://definitely-not-a-local-file.example/x.html");
        assert!(source.preflight().is_ok());
    }

    #[test]
    fn test_preflight_rejects_missing_file() {
        let source = Source::classify("/nonexistent/path/report.html");
        let result = source.preflight();
        assert!(matches!(result, Err(ConvertError::InputNotFound(_))));
    }

    #[test]
    fn test_preflight_accepts_existing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "<html><body>hi</body></html>").unwrap();

        let source = Source::classify(file.path().to_str().unwrap());
        assert!(source.preflight().is_ok());
    }

    #[test]
    fn test_file_source_becomes_data_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<h1>Report & Charts</h1>").unwrap();

        let source = Source::classify(file.path().to_str().unwrap());
        let url = source.to_navigable_url().unwrap();

        assert!(url.starts_with("data:text/html;charset=utf-8,"));
        // Special characters must be percent-encoded.
        assert!(!url.contains('&'));
        assert!(url.contains("%26"));
    }

    #[test]
    fn test_url_source_is_normalized() {
        let source = Source::classify("https://example.com");
        assert_eq!(source.to_navigable_url().unwrap(), "https://example.com/");
    }

    #[test]
    fn test_malformed_url_is_navigation_error() {
        // Starts with "http" so it classifies as a URL, but does not parse.
        let source = Source::classify("http://exa mple.com");
        let result = source.to_navigable_url();
        assert!(matches!(result, Err(ConvertError::Navigation(_))));
    }

    #[test]
    fn test_truncate_url_short() {
        let url = "https://example.com";
        assert_eq!(truncate_url(url, 50), url);
    }

    #[test]
    fn test_truncate_url_long() {
        let url = "data:text/html;charset=utf-8,%3Chtml%3E%3Cbody%3E...long...";
        let truncated = truncate_url(url, 30);
        assert_eq!(truncated.len(), 33); // 30 + "..."
        assert!(truncated.ends_with("..."));
    }
}
