//! Ordered "try this, else that" evaluation shared by the router's answer paths.
//!
//! Each step is a lazy future resolving to `Ok(Some(value))` (answered),
//! `Ok(None)` (nothing useful, try the next one) or `Err(_)` (collaborator failed,
//! logged and skipped). Futures are only polled when their turn comes, so a step
//! after the one that answered is never invoked.

use crate::actors::messages::AppError;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;
use tracing::{debug, warn};

type Step<'a, T> = BoxFuture<'a, Result<Option<T>, AppError>>;

pub struct FallbackChain<'a, T> {
    name: &'static str,
    steps: Vec<(&'static str, Step<'a, T>)>,
}

impl<'a, T> FallbackChain<'a, T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: Vec::new(),
        }
    }

    /// Appends a step. Steps run in the order they were added.
    pub fn step<F>(mut self, label: &'static str, step: F) -> Self
    where
        F: Future<Output = Result<Option<T>, AppError>> + Send + 'a,
    {
        self.steps.push((label, step.boxed()));
        self
    }

    /// Runs the steps in order and returns the first value produced, or `terminal()`
    /// when every step came up empty or failed.
    pub async fn resolve<F>(self, terminal: F) -> T
    where
        F: FnOnce() -> T,
    {
        let chain = self.name;
        for (label, step) in self.steps {
            match step.await {
                Ok(Some(value)) => {
                    debug!(chain, step = label, "fallback step answered");
                    return value;
                }
                Ok(None) => {
                    debug!(chain, step = label, "fallback step had nothing, trying next");
                }
                Err(e) => {
                    warn!(chain, step = label, error = %e, "fallback step failed, trying next");
                }
            }
        }
        debug!(chain, "all fallback steps exhausted, using terminal value");
        terminal()
    }
}
