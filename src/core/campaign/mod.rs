//! Campaign Wizards
//!
//! Concrete wizards built on the engine in [`crate::core::wizard`]:
//! - [`map_wizard`]: automatic map construction parameters
//! - [`variant_wizard`]: deriving a creature variant from a base creature

pub mod map_wizard;
pub mod types;
pub mod variant_wizard;

pub use types::*;
