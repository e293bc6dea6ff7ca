//! # brewlogapp
//!
//! A UI-agnostic library for tracking brewing batches and their dated stages.
//!
//! ## Layers
//!
//! - [`model`]: batches, stages and the volume unit, plus their JSON shape
//! - [`store`]: the async key-value backend and the two stores built on it
//!   ([`store::batch_store::BatchStore`], [`store::preference_store::PreferenceStore`])
//! - [`calendar`]: a date projection over the batch collection
//! - [`commands`]: one function per user operation, returning
//!   [`commands::CmdResult`]
//! - [`api`]: the facade view layers talk to
//! - [`config`] and [`init`]: configuration and context wiring
//!
//! ## State Model
//!
//! Each store owns an in-memory snapshot and publishes it on a
//! `tokio::sync::watch` channel. Mutations apply to the snapshot synchronously
//! and persist the whole value in the background, so a view always reads its own
//! writes. Storage failures are logged with `tracing` and never reach the caller.

pub mod api;
pub mod calendar;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod store;
pub mod validation;

#[cfg(test)]
mod test_utils;
