//! Terminal UI for running wizards.

pub mod host;
pub mod theme;

pub use host::TerminalHost;
