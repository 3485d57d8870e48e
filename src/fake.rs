//! Building blocks for in-memory test doubles.
//!
//! A [`Recorder`] stands in for one interface method: it captures the
//! arguments of every call and decides what each call returns. [`Invocations`]
//! keeps a cross-method log keyed by method name. Both are safe to share
//! across threads.
//!
//! # Example
//!
//! ```
//! use fly_resource::fake::Recorder;
//!
//! let recorder: Recorder<String, Vec<u8>> = Recorder::new();
//! recorder.returns(b"default".to_vec());
//! recorder.returns_on_call(1, b"second".to_vec());
//!
//! assert_eq!(recorder.record("a".into()).unwrap(), b"default");
//! assert_eq!(recorder.record("b".into()).unwrap(), b"second");
//! assert_eq!(recorder.call_count(), 2);
//! assert_eq!(recorder.args_for_call(1), Some("b".to_string()));
//! ```

use crate::error::{FlyError, Result};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Replacement implementation for a faked method.
pub type Stub<A, R> = Box<dyn Fn(&A) -> Result<R> + Send + Sync>;

/// A configured return: a value or an error message.
type Outcome<R> = std::result::Result<R, String>;

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn into_result<R>(outcome: Outcome<R>) -> Result<R> {
    outcome.map_err(|message| FlyError::Other(anyhow::anyhow!(message)))
}

/// Records calls to one method and produces its return values.
///
/// Precedence on each call: stub, then the per-call return for that call
/// index, then the default return, then `R::default()`.
pub struct Recorder<A, R> {
    calls: RwLock<Vec<A>>,
    returns: RwLock<Option<Outcome<R>>>,
    returns_on_call: RwLock<HashMap<usize, Outcome<R>>>,
    stub: RwLock<Option<Stub<A, R>>>,
}

impl<A: Clone, R: Clone + Default> Recorder<A, R> {
    /// Create a recorder with no configured returns.
    pub fn new() -> Self {
        Self {
            calls: RwLock::new(Vec::new()),
            returns: RwLock::new(None),
            returns_on_call: RwLock::new(HashMap::new()),
            stub: RwLock::new(None),
        }
    }

    /// Record a call and produce its result.
    pub fn record(&self, args: A) -> Result<R> {
        let index = {
            let mut calls = write(&self.calls);
            calls.push(args.clone());
            calls.len() - 1
        };

        if let Some(stub) = read(&self.stub).as_ref() {
            return stub(&args);
        }
        if let Some(outcome) = read(&self.returns_on_call).get(&index) {
            return into_result(outcome.clone());
        }
        match read(&self.returns).as_ref() {
            Some(outcome) => into_result(outcome.clone()),
            None => Ok(R::default()),
        }
    }

    /// Number of calls so far.
    pub fn call_count(&self) -> usize {
        read(&self.calls).len()
    }

    /// Arguments of call `index` (zero-based).
    pub fn args_for_call(&self, index: usize) -> Option<A> {
        read(&self.calls).get(index).cloned()
    }

    /// Arguments of every call, in order.
    pub fn calls(&self) -> Vec<A> {
        read(&self.calls).clone()
    }

    /// Return `value` from every call without a more specific return.
    ///
    /// Clears any stub.
    pub fn returns(&self, value: R) {
        *write(&self.stub) = None;
        *write(&self.returns) = Some(Ok(value));
    }

    /// Fail every call without a more specific return.
    ///
    /// Clears any stub.
    pub fn returns_error(&self, message: impl Into<String>) {
        *write(&self.stub) = None;
        *write(&self.returns) = Some(Err(message.into()));
    }

    /// Return `value` from call `index` only.
    ///
    /// Clears any stub.
    pub fn returns_on_call(&self, index: usize, value: R) {
        *write(&self.stub) = None;
        write(&self.returns_on_call).insert(index, Ok(value));
    }

    /// Fail call `index` only.
    ///
    /// Clears any stub.
    pub fn returns_error_on_call(&self, index: usize, message: impl Into<String>) {
        *write(&self.stub) = None;
        write(&self.returns_on_call).insert(index, Err(message.into()));
    }

    /// Replace the method with `stub`, which takes precedence over returns.
    pub fn set_stub<F>(&self, stub: F)
    where
        F: Fn(&A) -> Result<R> + Send + Sync + 'static,
    {
        *write(&self.stub) = Some(Box::new(stub));
    }
}

impl<A: Clone, R: Clone + Default> Default for Recorder<A, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Debug, R: Debug> Debug for Recorder<A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recorder")
            .field("calls", &*read(&self.calls))
            .field("returns", &*read(&self.returns))
            .field("stubbed", &read(&self.stub).is_some())
            .finish()
    }
}

/// Log of every call made to a fake, keyed by method name.
#[derive(Debug, Default)]
pub struct Invocations {
    calls: RwLock<HashMap<String, Vec<String>>>,
}

impl Invocations {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call to `method` with debug-formatted `args`.
    pub fn record(&self, method: &str, args: &impl Debug) {
        write(&self.calls)
            .entry(method.to_string())
            .or_default()
            .push(format!("{:?}", args));
    }

    /// Snapshot of all recorded calls.
    pub fn all(&self) -> HashMap<String, Vec<String>> {
        read(&self.calls).clone()
    }

    /// Number of recorded calls to `method`.
    pub fn count(&self, method: &str) -> usize {
        read(&self.calls).get(method).map_or(0, Vec::len)
    }
}
