//! # CLI Behavior
//!
//! This is one possible client for brewlog. It is the only place that knows
//! about terminal I/O, exit codes and output formatting.
//!
//! ## Invocation Lifecycle
//!
//! Every invocation is a fresh activation of the stores:
//!
//! 1. Parse arguments, load config, set up logging
//! 2. Activate both stores (load from the data directory)
//! 3. Run one command against the API facade
//! 4. Wait for background writes to land, then render and exit
//!
//! Running `brewlog` with no command lists batches.
//!
//! ## Addressing Batches
//!
//! Wherever a batch is expected, pass its full id, its position from `list`
//! (`1`, `2`, ...) or a unique id prefix of four characters or more. Stages are
//! addressed by id or by position within their batch.
//!
//! ## Module Structure
//!
//! - `setup`: clap argument definitions
//! - `commands`: context setup and dispatch
//! - `render`: text and JSON output
//! - `styles`: terminal styles

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
