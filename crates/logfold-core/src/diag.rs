//! Explicit logging capability handed to each pipeline component.
//!
//! Components never reach for the process-wide subscriber on their own. They
//! are constructed with a [`Diagnostics`] handle and emit their `tracing`
//! events inside [`Diagnostics::scope`], which routes them to the wrapped
//! dispatcher. Tests pass [`Diagnostics::silent`] or a capturing subscriber.

use tracing::Dispatch;

#[derive(Clone)]
pub struct Diagnostics {
    dispatch: Dispatch,
}

impl Diagnostics {
    /// Wrap an explicit dispatcher.
    pub fn new(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }

    /// Capture whichever dispatcher is the default on the calling thread
    /// (normally the global subscriber installed by the binary).
    pub fn current() -> Self {
        Self::new(tracing::dispatcher::get_default(Dispatch::clone))
    }

    /// Discard every event.
    pub fn silent() -> Self {
        Self::new(Dispatch::none())
    }

    /// Run `f` with this handle's dispatcher as the default, so `tracing`
    /// macros inside it reach the right subscriber.
    pub fn scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::current()
    }
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics").finish_non_exhaustive()
    }
}

impl From<Dispatch> for Diagnostics {
    fn from(dispatch: Dispatch) -> Self {
        Self::new(dispatch)
    }
}
