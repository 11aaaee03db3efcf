//! Multi-Step Wizard Engine
//!
//! Walks a user through an ordered, conditionally branching sequence of
//! data-entry pages.
//!
//! # Overview
//!
//! - [`WizardPage`]: one step's gates (`allow_next`, `allow_back`,
//!   `allow_finish`) and lifecycle hooks (`on_shown`, `on_next`, `on_back`,
//!   `on_finish`)
//! - [`WizardDefinition`]: title, ordered pages, shared context, `next`/`back`
//!   transition overrides and terminal callbacks
//! - [`NavigationController`]: drives one run and produces an [`Outcome`]
//! - [`WizardHost`]: presents the run and feeds it events; [`run`] ties a
//!   definition to a host
//!
//! # Design Principles
//!
//! - **Typed context**: each definition binds its own context type `C`
//! - **Commit on transition**: pages write into the context only from
//!   `on_next`/`on_finish`
//! - **Recomputed back**: no history stack; back targets come from the
//!   override or `index - 1`
//! - **Polled gates**: hosts call [`NavigationController::refresh_gates`] on
//!   every tick
//! - **Ephemeral**: nothing survives a finished or cancelled run

mod controller;
mod definition;
mod error;
mod host;
mod page;

pub use controller::*;
pub use definition::*;
pub use error::*;
pub use host::*;
pub use page::{PageInput, WizardPage};

pub(crate) use page::{row_marker, step_cursor};
