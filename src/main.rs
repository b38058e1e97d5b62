//! premark CLI entry point
//!
//! Parses arguments, compiles the input document, and reports failures as
//! user-friendly errors with a non-zero exit code.

use anyhow::Result;
use clap::Parser;
use premark::cli;
use premark::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
