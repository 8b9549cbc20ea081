//! # Foodcart Command-Line Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main.rs ────► tracing, argument parsing                                │
//! │  lib.rs ─────► config, storage, one page load per invocation            │
//! │  commands/ ──► menu, add, remove, cart, badge, checkout, theme, ...     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use foodcart_storefront_lib::{init_tracing, run, Cli};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = ?e.code, "Command failed: {}", e.message);
            eprintln!("{}", e.message);
            ExitCode::FAILURE
        }
    }
}
