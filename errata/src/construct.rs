//! Constructors for annotated errors.
//!
//! All three levels capture the caller's origin and default to
//! [`Kind::System`](crate::Kind::System). Nothing is logged here; output
//! only happens when the chain is echoed.
//!
//! ```rust
//! use errata::{Level, error, warn};
//!
//! let inner = error("disk full", &[]).kvs(&["volume", "/data"]);
//! let outer = error(inner, &["save failed"]);
//! assert_eq!(outer.message(), "save failed");
//!
//! let soft = warn(std::io::Error::other("cache miss"), &[]);
//! assert_eq!(soft.level(), Level::Warn);
//! ```

use crate::node::{Annotated, BoxError, Fault, Level, Origin};

#[track_caller]
fn build(level: Level, cause: Option<Fault>, messages: &[&str]) -> Annotated {
    let cause = match cause {
        Some(fault) => fault,
        None => Fault::nil(level),
    };
    Annotated::new(level, cause, messages, Origin::caller())
}

/// Wrap `cause` at [`Level::Error`].
#[track_caller]
pub fn error<E: Into<BoxError>>(cause: E, messages: &[&str]) -> Annotated {
    build(Level::Error, Some(Fault::new(cause)), messages)
}

/// Wrap `cause` at [`Level::Warn`].
#[track_caller]
pub fn warn<E: Into<BoxError>>(cause: E, messages: &[&str]) -> Annotated {
    build(Level::Warn, Some(Fault::new(cause)), messages)
}

/// Wrap `cause` at [`Level::Panic`].
///
/// Echoing a chain that contains a panic node renders the live call stack
/// instead of the cause chain.
#[track_caller]
pub fn panic<E: Into<BoxError>>(cause: E, messages: &[&str]) -> Annotated {
    build(Level::Panic, Some(Fault::new(cause)), messages)
}

/// Like [`error`], substituting `"Error is nil (Error)"` for `None`.
#[track_caller]
pub fn error_opt<E: Into<BoxError>>(cause: Option<E>, messages: &[&str]) -> Annotated {
    build(Level::Error, cause.map(Fault::new), messages)
}

/// Like [`warn`], substituting `"Error is nil (Warn)"` for `None`.
#[track_caller]
pub fn warn_opt<E: Into<BoxError>>(cause: Option<E>, messages: &[&str]) -> Annotated {
    build(Level::Warn, cause.map(Fault::new), messages)
}

/// Like [`panic`], substituting `"Error is nil (Panic)"` for `None`.
#[track_caller]
pub fn panic_opt<E: Into<BoxError>>(cause: Option<E>, messages: &[&str]) -> Annotated {
    build(Level::Panic, cause.map(Fault::new), messages)
}

/// Build an annotated error that also records the enclosing module path.
///
/// # Forms
///
/// ```ignore
/// annotate!(Error, io_err)
/// annotate!(Warn, "cache miss", "using stale entry")
/// annotate!(Panic, err, format!("worker {id} died"))
/// ```
#[macro_export]
macro_rules! annotate {
    ($level:ident, $cause:expr $(, $msg:expr)* $(,)?) => {
        $crate::Annotated::new(
            $crate::Level::$level,
            $crate::Fault::new($cause),
            &[$(::core::convert::AsRef::<str>::as_ref(&$msg)),*],
            $crate::Origin::here(file!(), line!(), column!(), Some(module_path!())),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Kind;
    use std::io;

    #[test]
    fn each_constructor_sets_its_level() {
        assert_eq!(error("x", &[]).level(), Level::Error);
        assert_eq!(warn("x", &[]).level(), Level::Warn);
        assert_eq!(panic("x", &[]).level(), Level::Panic);
    }

    #[test]
    fn origin_captured_for_every_level() {
        let line = line!() + 1;
        let nodes = [error("x", &[]), warn("x", &[]), panic("x", &[])];
        for n in &nodes {
            assert!(n.origin().file.ends_with("construct.rs"));
            assert_eq!(n.origin().line, line);
        }
    }

    #[test]
    fn default_kind_is_system() {
        assert_eq!(error("x", &[]).kind(), Kind::System);
    }

    #[test]
    fn none_cause_is_defused() {
        let n = error_opt(None::<io::Error>, &[]);
        assert_eq!(n.message(), "Error is nil (Error)");
        assert!(n.cause().is_terminal());

        let n = warn_opt(None::<io::Error>, &["nothing there"]);
        assert_eq!(n.message(), "nothing there");
        assert_eq!(n.cause().to_string(), "Error is nil (Warn)");

        let n = panic_opt(None::<io::Error>, &[]);
        assert_eq!(n.cause().to_string(), "Error is nil (Panic)");
    }

    #[test]
    fn some_cause_is_wrapped() {
        let n = error_opt(Some(io::Error::other("disk full")), &[]);
        assert_eq!(n.message(), "disk full");
    }

    #[test]
    fn annotate_macro_records_module() {
        let n = crate::annotate!(Warn, "cache miss", "stale", String::from("again"));
        assert_eq!(n.level(), Level::Warn);
        assert_eq!(n.message(), "stale. again");
        assert_eq!(n.origin().function, Some(module_path!()));
    }

    #[test]
    fn annotate_macro_without_messages() {
        let n = crate::annotate!(Error, io::Error::other("gone"));
        assert_eq!(n.message(), "gone");
    }
}
