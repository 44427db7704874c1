//! Process-wide reporter.
//!
//! Convenience for programs that configure reporting once at startup and
//! echo from anywhere. Every echo snapshots the shared [`Reporter`] before
//! rendering, so a callback may reconfigure it without deadlocking.
//!
//! ```rust
//! use errata::{error, global};
//!
//! global::set_version("v1.2.3");
//! global::set_callback_error(|meta, _fault| {
//!     let _ = meta.get("user");
//! });
//!
//! let out = global::echo_silent(error("disk full", &["save failed"]));
//! assert!(out.starts_with("ERROR ver: v1.2.3"));
//! ```

use std::sync::LazyLock;

use parking_lot::RwLock;

use crate::config::ReporterConfig;
use crate::meta::Meta;
use crate::node::{BoxError, Fault};
use crate::report::Reporter;

static GLOBAL: LazyLock<RwLock<Reporter>> = LazyLock::new(|| RwLock::new(Reporter::default()));

/// Replace the global configuration. Callbacks are kept.
pub fn configure(config: ReporterConfig) {
    GLOBAL.write().set_config(config);
}

/// Replace the global reporter wholesale.
pub fn install(reporter: Reporter) {
    *GLOBAL.write() = reporter;
}

/// Snapshot of the global reporter.
pub fn reporter() -> Reporter {
    GLOBAL.read().clone()
}

pub fn set_version(version: impl Into<String>) {
    GLOBAL.write().set_version(version);
}

pub fn set_max_depth(max_depth: usize) {
    GLOBAL.write().set_max_depth(max_depth);
}

pub fn set_callback_warn(callback: impl Fn(&Meta, &Fault) + Send + Sync + 'static) {
    GLOBAL.write().set_callback_warn(callback);
}

pub fn set_callback_error(callback: impl Fn(&Meta, &Fault) + Send + Sync + 'static) {
    GLOBAL.write().set_callback_error(callback);
}

pub fn set_callback_panic(callback: impl Fn(&Meta, &Fault) + Send + Sync + 'static) {
    GLOBAL.write().set_callback_panic(callback);
}

/// Echo through the global reporter.
pub fn echo<E: Into<BoxError>>(fault: E) -> String {
    reporter().echo(fault)
}

pub fn echo_silent<E: Into<BoxError>>(fault: E) -> String {
    reporter().echo_silent(fault)
}

pub fn echo_opt<E: Into<BoxError>>(fault: Option<E>) -> String {
    reporter().echo_opt(fault)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct::error;
    use crate::node::Level;
    use parking_lot::Mutex;
    use std::sync::Arc;

    // The global reporter is shared by every test in this binary, so all
    // assertions against it live in one test.
    #[test]
    fn global_round_trip() {
        install(Reporter::default());
        set_version("v4.5.6");
        set_max_depth(0);
        assert_eq!(reporter().config().max_depth, 1);
        set_max_depth(20);

        let hits = Arc::new(Mutex::new(Vec::new()));
        let sink = hits.clone();
        set_callback_error(move |meta, _| {
            sink.lock().push(meta.get("user").map(str::to_string));
            // Reconfiguring from inside a callback must not deadlock.
            set_version("v7.8.9");
        });

        let out = echo_silent(error("disk full", &["save failed"]).kvs(&["user", "7"]));
        assert!(out.starts_with("ERROR ver: v4.5.6\n"));
        assert_eq!(*hits.lock(), vec![Some("7".to_string())]);
        assert_eq!(reporter().config().version, "v7.8.9");

        configure(ReporterConfig {
            version: "v0.1.0".to_string(),
            color: false,
            ..Default::default()
        });
        assert!(reporter().callbacks().get(Level::Error).is_some());
        echo_silent("again");
        assert_eq!(hits.lock().len(), 2);

        assert_eq!(echo_opt(None::<std::io::Error>), crate::consts::NIL_REPORT);
        assert_eq!(hits.lock().len(), 2);
        install(Reporter::default());
    }
}
