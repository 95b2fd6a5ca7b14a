//! Command-line entry point.
//!
//! ```text
//! mermaid2pdf <input.html|url> <output.pdf>
//! ```
//!
//! Exit codes: `0` on success; `1` on wrong argument count, a missing local
//! input file, or any conversion failure. Argument errors are rejected before
//! any browser is launched.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;

use mermaid2pdf::ConvertConfig;

/// Convert an HTML document into a paginated PDF, waiting for client-side
/// Mermaid diagram rendering before capture.
#[derive(Debug, Parser)]
#[command(name = "mermaid2pdf", version)]
struct Cli {
    /// Input HTML file or http(s) URL.
    #[arg(value_name = "input.html|url")]
    input: String,

    /// Output PDF path (overwritten if present).
    #[arg(value_name = "output.pdf")]
    output: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    // try_parse instead of parse: the contract is exit code 1 for argument
    // errors, while clap's own exit path uses 2.
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };

    match mermaid2pdf::convert(&args.input, &args.output, &config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("❌ Error generating PDF: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(feature = "env-config")]
fn load_config() -> mermaid2pdf::Result<ConvertConfig> {
    mermaid2pdf::config::env::from_env()
}

#[cfg(not(feature = "env-config"))]
fn load_config() -> mermaid2pdf::Result<ConvertConfig> {
    Ok(ConvertConfig::default())
}
