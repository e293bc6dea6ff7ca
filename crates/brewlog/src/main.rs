//! # Brewlog CLI
//!
//! The binary is thin: the CLI lives in `src/cli/`, and this file only runs it
//! and turns errors into an exit status.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │  CLI Layer (src/cli/)                                 │
//! │  - clap argument parsing (setup.rs)                   │
//! │  - context wiring, activation, dispatch (commands.rs) │
//! │  - terminal rendering with console (render.rs)        │
//! └───────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌───────────────────────────────────────────────────────┐
//! │  brewlogapp: API facade → commands → stores → backend │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! Everything below the CLI layer is UI agnostic. The CLI owns argument parsing,
//! log setup, rendering and process exit codes.

mod cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
