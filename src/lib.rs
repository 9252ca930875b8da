//! Library crate for user-directory.
//!
//! This crate exposes the building blocks of the TUI:
//! - Application state, keymap and update loop (`app`)
//! - Command-line configuration (`config`)
//! - Error and result types (`error`)
//! - File logging setup (`logging`)
//! - Remote user source and the one-shot fetch task (`net`)
//! - In-memory search helpers (`search`)
//! - UI rendering (`ui`)
//!
//! It is used by the `user-directory` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod net;
pub mod search;
pub mod ui;

/// Convenient error and result types shared across the crate.
pub use error::{DynError, Result};
