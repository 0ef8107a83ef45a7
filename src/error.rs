//! Unified error type.

use std::fmt;

/// A boxed, thread-safe error as returned by middleware and pre-hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type returned by [`Action::call`](crate::Action::call) and
/// [`HookChain::run`](crate::HookChain::run).
///
/// Application-level outcomes (404, 422, etc.) are expressed through the
/// [`Response`](crate::Response) an action assembles, not as `Error`s. This
/// type only surfaces a pre-hook or middleware that failed before the main
/// logic could run. The original failure is kept as the [`source`].
///
/// [`source`]: std::error::Error::source
#[derive(Debug)]
pub struct Error {
    index: usize,
    name: &'static str,
    source: BoxError,
}

impl Error {
    pub(crate) fn hook(index: usize, name: &'static str, source: BoxError) -> Self {
        Self { index, name, source }
    }

    /// Position of the failing hook in registration order, starting at 0.
    pub fn index(&self) -> usize { self.index }

    /// Name of the failing hook or middleware.
    pub fn name(&self) -> &'static str { self.name }

    /// Consumes the error, returning the hook's own failure.
    pub fn into_source(self) -> BoxError { self.source }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pre-hook #{} ({}) failed: {}", self.index, self.name, self.source)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}
