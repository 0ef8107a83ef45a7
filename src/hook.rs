//! Ordered pre-processing hooks.
//!
//! A [`HookChain`] is built once while the action is defined and read-only
//! afterwards. At request time [`HookChain::run`] calls every hook in
//! registration order on the same `&mut Request`, so each hook sees what
//! the previous ones left in the environment.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error};

use crate::error::{BoxError, Error};
use crate::middleware::{self, Middleware};
use crate::request::Request;

// ── Hook shape ────────────────────────────────────────────────────────────────

/// A shared, type-erased pre-hook.
pub(crate) type BoxedHook = Arc<dyn Fn(&mut Request) -> Result<(), BoxError> + Send + Sync + 'static>;

/// What a hook or middleware may return. Only failure matters: the success
/// value is dropped.
pub trait HookOutcome {
    fn into_outcome(self) -> Result<(), BoxError>;
}

impl HookOutcome for () {
    fn into_outcome(self) -> Result<(), BoxError> { Ok(()) }
}

impl<T, E> HookOutcome for Result<T, E>
where
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Result<(), BoxError> {
        self.map(drop).map_err(Into::into)
    }
}

// ── HookChain ─────────────────────────────────────────────────────────────────

/// Hooks run before an action's main logic.
#[derive(Clone, Default)]
pub struct HookChain {
    hooks: Vec<(&'static str, BoxedHook)>,
}

impl HookChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a hook over the whole request context.
    pub fn register_pre_hook<F, R>(&mut self, hook: F)
    where
        F: Fn(&mut Request) -> R + Send + Sync + 'static,
        R: HookOutcome,
    {
        let name = std::any::type_name::<F>();
        self.push(name, Arc::new(move |req: &mut Request| hook(req).into_outcome()));
    }

    /// Appends one hook that hands the request environment to `middleware`.
    pub fn register_middleware(&mut self, middleware: impl Middleware) {
        let name = middleware.name();
        self.push(name, middleware::adapt(middleware));
    }

    fn push(&mut self, name: &'static str, hook: BoxedHook) {
        debug!(index = self.hooks.len(), hook = name, "pre-hook registered");
        self.hooks.push((name, hook));
    }

    /// Runs every hook in order. Stops at the first failure and returns it;
    /// hooks after the failing one do not run.
    ///
    /// Takes `&self`: the chain is frozen once the action is built, so any
    /// number of requests can run it at the same time without locking.
    pub fn run(&self, req: &mut Request) -> Result<(), Error> {
        for (index, (name, hook)) in self.hooks.iter().enumerate() {
            debug!(index, hook = *name, "running pre-hook");
            if let Err(source) = hook(req) {
                error!(index, hook = *name, "pre-hook failed: {source}");
                return Err(Error::hook(index, *name, source));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Hook names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.hooks.iter().map(|(name, _)| *name)
    }
}

impl fmt::Debug for HookChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
