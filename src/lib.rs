//! Campaign Wizard - branching multi-step wizards for tabletop RPG campaign tools
//!
//! Core library providing the wizard engine, the built-in map builder and
//! creature variant wizards, and a terminal host to run them.

pub mod config;
pub mod core;
pub mod tui;


pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
