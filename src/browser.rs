//! Browser process launch and session lifetime.
//!
//! This module builds the Chrome launch options for one conversion run and
//! wraps the launched process in [`BrowserSession`], a scoped resource that
//! owns exactly one browser and exactly one tab.
//!
//! The browser process is terminated when the session drops, on every exit
//! path — success, error, or panic — so a failed conversion never leaves a
//! stray Chrome process behind.
//!
//! # Example
//!
//! ```rust,ignore
//! use mermaid2pdf::{BrowserSession, ConvertConfig};
//!
//! let config = ConvertConfig::default();
//! let session = BrowserSession::open(&config)?;
//! session.tab().navigate_to("https://example.com")?;
//! // Chrome is torn down here when `session` goes out of scope.
//! ```

use std::sync::Arc;

use headless_chrome::protocol::cdp::types::Event;
use headless_chrome::{Browser, LaunchOptions, Tab};

use crate::config::ConvertConfig;
use crate::error::{ConvertError, Result};

/// Create Chrome launch options for a conversion run.
///
/// The flag set targets constrained/container environments that lack OS
/// sandbox support:
///
/// - sandbox disabled (`--no-sandbox` equivalent)
/// - `--disable-gpu` — no GPU in headless containers
/// - `--disable-dev-shm-usage` — use /tmp instead of the usually-tiny /dev/shm
/// - `--disable-background-timer-throttling` / `--disable-renderer-backgrounding`
///   — keep the (backgrounded) renderer running at full speed
/// - `--no-first-run`, `--disable-extensions`, `--disable-crash-reporter`,
///   `--disable-features=TranslateUI` — strip non-rendering features
///
/// The window size doubles as the page viewport.
///
/// # Errors
///
/// Returns [`ConvertError::Configuration`] if the options builder fails
/// (rare, usually a bug).
pub fn create_launch_options(config: &ConvertConfig) -> Result<LaunchOptions<'static>> {
    match &config.chrome_path {
        Some(path) => log::debug!("Creating Chrome options with custom path: {}", path),
        None => log::debug!("Creating Chrome options (auto-detect browser)"),
    }

    let mut builder = LaunchOptions::default_builder();

    // Set path if provided, otherwise let headless_chrome auto-detect
    if let Some(path) = &config.chrome_path {
        builder.path(Some(path.clone().into()));
    }

    builder
        .headless(true)
        .sandbox(false) // Required in containers without OS sandbox support
        .window_size(Some((config.viewport_width, config.viewport_height)))
        .disable_default_args(true)
        .args(vec![
            // ===== Stability in constrained environments =====
            "--disable-dev-shm-usage".as_ref(),
            "--disable-gpu".as_ref(),
            "--disable-crash-reporter".as_ref(),
            // ===== Keep rendering at full speed while headless =====
            "--disable-background-timer-throttling".as_ref(),
            "--disable-renderer-backgrounding".as_ref(),
            // ===== Strip non-rendering features =====
            "--no-first-run".as_ref(),
            "--disable-extensions".as_ref(),
            "--disable-features=TranslateUI".as_ref(),
        ])
        .build()
        .map_err(|e| ConvertError::Configuration(e.to_string()))
}

/// One browser process plus its single rendering tab.
///
/// Invariants: exactly one tab per session, exactly one session per
/// conversion. Dropping the session terminates the Chrome process.
pub struct BrowserSession {
    browser: Browser,
    tab: Arc<Tab>,
}

impl BrowserSession {
    /// Launch Chrome and open the session's tab.
    ///
    /// The tab's default timeout is set to the configured load timeout, and a
    /// pass-through log relay is attached so diagnostics emitted by the loaded
    /// page surface in the host's log stream.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::BrowserLaunch`] if Chrome fails to start
    /// - [`ConvertError::TabCreation`] if the tab cannot be opened
    pub fn open(config: &ConvertConfig) -> Result<Self> {
        let options = create_launch_options(config)?;

        log::debug!("Launching Chrome browser...");
        let browser = Browser::new(options).map_err(|e| {
            log::error!("❌ Chrome launch failed: {}", e);
            ConvertError::BrowserLaunch(e.to_string())
        })?;

        let tab = browser.new_tab().map_err(|e| {
            log::error!("❌ Failed to create tab: {}", e);
            ConvertError::TabCreation(e.to_string())
        })?;

        tab.set_default_timeout(config.load_timeout);
        attach_console_relay(&tab);

        Ok(Self { browser, tab })
    }

    /// The session's single rendering tab.
    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    /// The underlying browser handle.
    pub fn browser(&self) -> &Browser {
        &self.browser
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // The Chrome process itself is killed by the inner Browser drop.
        log::debug!("Closing browser session");
    }
}

/// Attach a pass-through relay for the page's console/log entries.
///
/// Best-effort: the relay is diagnostic plumbing, so a failure to attach it
/// is logged and ignored rather than failing the conversion.
fn attach_console_relay(tab: &Arc<Tab>) {
    if let Err(e) = tab.enable_log() {
        log::warn!("Could not enable page log domain: {}", e);
        return;
    }

    let listener = Arc::new(move |event: &Event| {
        if let Event::LogEntryAdded(entry) = event {
            log::info!("🌐 Page log: {}", entry.params.entry.text);
        }
    });

    if let Err(e) = tab.add_event_listener(listener) {
        log::warn!("Could not attach page log relay: {}", e);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
