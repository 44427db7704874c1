//! Per-severity callbacks.
//!
//! At most one callback per level. Setting a level again replaces the
//! previous callback. Callbacks run synchronously on the echoing thread,
//! exactly once per echo, and a panic inside one is caught and logged.
//!
//! Catching does not silence the process panic hook: the default hook still
//! prints its `panicked at` line to stderr before the reporter logs the
//! recovery. Install a quieter hook with `std::panic::set_hook` if needed.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use backtrace::Backtrace;
use thiserror::Error;
use tracing::{debug, error};

use crate::meta::Meta;
use crate::node::{Fault, Level};

/// Hook receiving the merged metadata and the fault that was echoed.
pub type Callback = Arc<dyn Fn(&Meta, &Fault) + Send + Sync>;

/// A callback unwound instead of returning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{level} callback panicked: {reason}")]
pub struct CallbackPanic {
    pub level: Level,
    pub reason: String,
}

/// The three callback slots.
#[derive(Clone, Default)]
pub struct Callbacks {
    warn: Option<Callback>,
    error: Option<Callback>,
    panic: Option<Callback>,
}

impl Callbacks {
    pub fn set(&mut self, level: Level, callback: Callback) {
        *self.slot_mut(level) = Some(callback);
    }

    pub fn clear(&mut self, level: Level) {
        *self.slot_mut(level) = None;
    }

    pub fn get(&self, level: Level) -> Option<&Callback> {
        match level {
            Level::Warn => self.warn.as_ref(),
            Level::Error => self.error.as_ref(),
            Level::Panic => self.panic.as_ref(),
        }
    }

    fn slot_mut(&mut self, level: Level) -> &mut Option<Callback> {
        match level {
            Level::Warn => &mut self.warn,
            Level::Error => &mut self.error,
            Level::Panic => &mut self.panic,
        }
    }

    /// Run the callback registered for `level`, if any.
    ///
    /// A panicking callback is logged with a backtrace and otherwise
    /// ignored.
    pub(crate) fn dispatch(&self, level: Level, meta: &Meta, fault: &Fault) {
        let Some(callback) = self.get(level) else {
            return;
        };
        debug!("dispatching {} callback", level);
        if let Err(failure) = invoke_isolated(level, callback, meta, fault) {
            error!("errata recovered: {}\n{:?}", failure, Backtrace::new());
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("warn", &self.warn.is_some())
            .field("error", &self.error.is_some())
            .field("panic", &self.panic.is_some())
            .finish()
    }
}

/// Call `callback`, converting an unwind into a [`CallbackPanic`].
pub(crate) fn invoke_isolated(
    level: Level,
    callback: &Callback,
    meta: &Meta,
    fault: &Fault,
) -> Result<(), CallbackPanic> {
    catch_unwind(AssertUnwindSafe(|| callback(meta, fault))).map_err(|payload| {
        let reason = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "callback error".to_string()
        };
        CallbackPanic { level, reason }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, Callback) {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = hits.clone();
        let cb: Callback = Arc::new(move |_: &Meta, _: &Fault| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (hits, cb)
    }

    #[test]
    fn dispatch_selects_level() {
        let (warn_hits, warn_cb) = counter();
        let (error_hits, error_cb) = counter();
        let mut callbacks = Callbacks::default();
        callbacks.set(Level::Warn, warn_cb);
        callbacks.set(Level::Error, error_cb);

        let fault = Fault::new("x");
        callbacks.dispatch(Level::Warn, &Meta::new(), &fault);
        assert_eq!(warn_hits.load(Ordering::SeqCst), 1);
        assert_eq!(error_hits.load(Ordering::SeqCst), 0);

        callbacks.dispatch(Level::Panic, &Meta::new(), &fault);
        assert_eq!(warn_hits.load(Ordering::SeqCst), 1);
        assert_eq!(error_hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn last_setter_wins() {
        let (first, first_cb) = counter();
        let (second, second_cb) = counter();
        let mut callbacks = Callbacks::default();
        callbacks.set(Level::Error, first_cb);
        callbacks.set(Level::Error, second_cb);

        callbacks.dispatch(Level::Error, &Meta::new(), &Fault::new("x"));
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clear_removes_callback() {
        let (hits, cb) = counter();
        let mut callbacks = Callbacks::default();
        callbacks.set(Level::Warn, cb);
        callbacks.clear(Level::Warn);
        callbacks.dispatch(Level::Warn, &Meta::new(), &Fault::new("x"));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn panicking_callback_is_contained() {
        let cb: Callback = Arc::new(|_: &Meta, _: &Fault| panic!("callback exploded"));
        let result = invoke_isolated(Level::Error, &cb, &Meta::new(), &Fault::new("x"));
        let failure = result.unwrap_err();
        assert_eq!(failure.level, Level::Error);
        assert_eq!(failure.reason, "callback exploded");
    }

    #[test]
    fn formatted_panic_reason_is_kept() {
        let cb: Callback = Arc::new(|_: &Meta, _: &Fault| {
            let v: Vec<u8> = Vec::new();
            panic!("index {} out of range", v.len() + 10)
        });
        let failure = invoke_isolated(Level::Panic, &cb, &Meta::new(), &Fault::new("x")).unwrap_err();
        assert_eq!(failure.reason, "index 10 out of range");
    }

    #[test]
    fn dispatch_survives_panicking_callback() {
        let mut callbacks = Callbacks::default();
        callbacks.set(Level::Error, Arc::new(|_: &Meta, _: &Fault| panic!("boom")));
        callbacks.dispatch(Level::Error, &Meta::new(), &Fault::new("x"));
    }

    #[test]
    fn debug_shows_slots() {
        let mut callbacks = Callbacks::default();
        callbacks.set(Level::Panic, Arc::new(|_: &Meta, _: &Fault| {}));
        let s = format!("{callbacks:?}");
        assert!(s.contains("panic: true"));
        assert!(s.contains("warn: false"));
    }
}
