//! Wizard Error Types
//!
//! [`WizardError`] is what the controller returns to its caller; [`PageError`]
//! is what an individual page hook may fail with. Page failures are wrapped
//! with the page title and hook name and propagated, never swallowed.

use super::controller::{Direction, Outcome};

/// Errors that can occur while driving a wizard run
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Wizard '{0}' has no pages")]
    NoPages(String),

    #[error("Transition override for {direction} from page {from} resolved to {target}, outside 0..{len}")]
    TransitionOutOfRange {
        direction: Direction,
        from: usize,
        target: usize,
        len: usize,
    },

    #[error("Page '{page}' failed in {hook}: {source}")]
    Page {
        page: String,
        hook: &'static str,
        #[source]
        source: PageError,
    },

    #[error("Wizard run already ended: {0:?}")]
    AlreadyEnded(Outcome),

    #[error("Host error: {0}")]
    Host(#[from] std::io::Error),
}

/// Errors raised by a page's lifecycle hooks
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Nested wizard failed: {0}")]
    Nested(Box<WizardError>),

    #[error("{0}")]
    Other(String),
}

impl From<WizardError> for PageError {
    fn from(err: WizardError) -> Self {
        PageError::Nested(Box::new(err))
    }
}

/// Result type for page lifecycle hooks
pub type HookResult = Result<bool, PageError>;
