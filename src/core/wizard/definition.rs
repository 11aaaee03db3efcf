//! Wizard Definitions
//!
//! A wizard is a value, not a subtype: a title, an ordered page list, the
//! shared context, two optional transition overrides and two terminal
//! callbacks. Concrete workflows are functions that build one of these.
//!
//! ```rust,ignore
//! let definition = WizardDefinition::new("Map Builder", MapBuildData::default())
//!     .with_page(BuildTypePage::new())
//!     .with_page(LibrariesPage::new(libraries))
//!     .with_next(|index, ctx: &MapBuildData| match index {
//!         1 if ctx.build_type != MapBuildType::Warren => Some(3),
//!         _ => None,
//!     });
//! ```

use std::fmt;

use super::page::WizardPage;

/// Transition override: `(current_index, context) -> target`.
///
/// `None` means "no override", and the controller falls back to the default
/// sequential step. Overrides must be pure functions of their arguments.
pub type TransitionFn<C> = Box<dyn Fn(usize, &C) -> Option<usize>>;

/// Callback invoked when a run finishes.
pub type FinishFn<C> = Box<dyn FnMut(&mut C)>;

/// Callback invoked when a run is cancelled.
pub type CancelFn<C> = Box<dyn FnMut(&C)>;

/// Declarative description of one branching multi-step workflow.
pub struct WizardDefinition<C> {
    pub(crate) title: String,
    pub(crate) pages: Vec<Box<dyn WizardPage<C>>>,
    pub(crate) context: C,
    pub(crate) next: Option<TransitionFn<C>>,
    pub(crate) back: Option<TransitionFn<C>>,
    pub(crate) on_finish: Option<FinishFn<C>>,
    pub(crate) on_cancel: Option<CancelFn<C>>,
}

impl<C> WizardDefinition<C> {
    /// Create a definition with a pre-populated context and no pages.
    pub fn new(title: impl Into<String>, context: C) -> Self {
        Self {
            title: title.into(),
            pages: Vec::new(),
            context,
            next: None,
            back: None,
            on_finish: None,
            on_cancel: None,
        }
    }

    /// Append a page. Page order is the default navigation order.
    pub fn with_page<P>(mut self, page: P) -> Self
    where
        P: WizardPage<C> + 'static,
    {
        self.pages.push(Box::new(page));
        self
    }

    /// Append an already-boxed page.
    pub fn with_boxed_page(mut self, page: Box<dyn WizardPage<C>>) -> Self {
        self.pages.push(page);
        self
    }

    /// Set the forward transition override.
    pub fn with_next<F>(mut self, next: F) -> Self
    where
        F: Fn(usize, &C) -> Option<usize> + 'static,
    {
        self.next = Some(Box::new(next));
        self
    }

    /// Set the backward transition override.
    pub fn with_back<F>(mut self, back: F) -> Self
    where
        F: Fn(usize, &C) -> Option<usize> + 'static,
    {
        self.back = Some(Box::new(back));
        self
    }

    /// Set the callback run after the terminal page accepts Finish.
    pub fn on_finish<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut C) + 'static,
    {
        self.on_finish = Some(Box::new(callback));
        self
    }

    /// Set the callback run when the user cancels.
    pub fn on_cancel<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&C) + 'static,
    {
        self.on_cancel = Some(Box::new(callback));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Titles of all pages in order.
    pub fn page_titles(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.title()).collect()
    }
}

impl<C: fmt::Debug> fmt::Debug for WizardDefinition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WizardDefinition")
            .field("title", &self.title)
            .field("pages", &self.page_titles())
            .field("context", &self.context)
            .field("has_next_override", &self.next.is_some())
            .field("has_back_override", &self.back.is_some())
            .finish()
    }
}
