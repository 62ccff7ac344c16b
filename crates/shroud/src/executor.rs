//! The execution capability boundary.

use std::sync::Arc;

use thiserror::Error;

/// Uncaught fault raised by delivered code. Not wrapped by the loader;
/// it propagates to the caller as-is.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ExecutionError(pub String);

impl ExecutionError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self(message.into())
    }
}

/// The single point where delivered text becomes executable behavior.
///
/// Implementations run `source` with the **full ambient privilege of the
/// host**: there is no sandbox and no fault isolation. The crate ships no
/// evaluator of its own; hosts bring their engine (or any other
/// interpretation of "execute") and accept that boundary explicitly by
/// implementing this trait.
pub trait ScriptExecutor: Send + Sync + 'static {
    /// Invoke `source` with no arguments in the host's global scope.
    ///
    /// # Errors
    ///
    /// Any runtime fault from the executed code, unwrapped.
    fn execute_ambient(&self, source: &str) -> Result<(), ExecutionError>;
}

/// Adapter turning a closure into a [`ScriptExecutor`].
#[derive(Clone)]
pub struct FnExecutor {
    f: Arc<dyn Fn(&str) -> Result<(), ExecutionError> + Send + Sync>,
}

impl FnExecutor {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<(), ExecutionError> + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }
}

impl ScriptExecutor for FnExecutor {
    fn execute_ambient(&self, source: &str) -> Result<(), ExecutionError> {
        (self.f)(source)
    }
}
