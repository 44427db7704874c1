//! Echo: render a fault chain, log it, dispatch callbacks.
//!
//! ## Pipeline
//!
//! ```text
//! echo(fault)
//!   │
//!   ├─ chain::walk ──► Walk::Chain ──► render::render_chain ─┐
//!   │                └► Walk::Panic ──► stack::render_panic ─┤
//!   │                                                        ▼
//!   │                                              Report { plain, colored, meta }
//!   ├─ log plain report (unless silent)
//!   ├─ dispatch callback for report.level
//!   └─ return report.plain
//! ```
//!
//! The log line carries the plain report; the subscriber styles it by level.
//! [`Report::colored`] is for callers writing straight to a terminal.
//!
//! Everything runs on the calling thread. A [`Reporter`] is plain data
//! (config + callback slots) and is cheap to clone.

pub mod chain;
pub mod dispatch;
pub mod render;
pub mod stack;

use std::sync::Arc;

use tracing::{error, warn};

use crate::config::ReporterConfig;
use crate::consts::NIL_REPORT;
use crate::meta::Meta;
use crate::node::{BoxError, Fault, Level};

use chain::Walk;
pub use dispatch::{Callback, CallbackPanic, Callbacks};
pub use render::Report;

/// Renders and dispatches fault chains.
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    config: ReporterConfig,
    callbacks: Callbacks,
}

impl Reporter {
    pub fn new(config: ReporterConfig) -> Self {
        Self {
            config,
            callbacks: Callbacks::default(),
        }
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    pub fn callbacks(&self) -> &Callbacks {
        &self.callbacks
    }

    /// Replace the configuration, keeping registered callbacks.
    pub fn set_config(&mut self, config: ReporterConfig) {
        self.config = config;
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.config.version = version.into();
    }

    /// Depth limit for chains and captured stacks. Zero is raised to one.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.config.max_depth = max_depth.max(1);
    }

    pub fn set_callback(
        &mut self,
        level: Level,
        callback: impl Fn(&Meta, &Fault) + Send + Sync + 'static,
    ) {
        self.callbacks.set(level, Arc::new(callback));
    }

    pub fn set_callback_warn(&mut self, callback: impl Fn(&Meta, &Fault) + Send + Sync + 'static) {
        self.set_callback(Level::Warn, callback);
    }

    pub fn set_callback_error(&mut self, callback: impl Fn(&Meta, &Fault) + Send + Sync + 'static) {
        self.set_callback(Level::Error, callback);
    }

    pub fn set_callback_panic(&mut self, callback: impl Fn(&Meta, &Fault) + Send + Sync + 'static) {
        self.set_callback(Level::Panic, callback);
    }

    pub fn with_callback_warn(mut self, callback: impl Fn(&Meta, &Fault) + Send + Sync + 'static) -> Self {
        self.set_callback_warn(callback);
        self
    }

    pub fn with_callback_error(mut self, callback: impl Fn(&Meta, &Fault) + Send + Sync + 'static) -> Self {
        self.set_callback_error(callback);
        self
    }

    pub fn with_callback_panic(mut self, callback: impl Fn(&Meta, &Fault) + Send + Sync + 'static) -> Self {
        self.set_callback_panic(callback);
        self
    }

    /// Build the report for `fault` without logging or dispatching.
    pub fn render(&self, fault: &Fault) -> Report {
        self.render_walk(fault).0
    }

    /// Render `fault`, log it, dispatch its callback, return the plain report.
    pub fn echo<E: Into<BoxError>>(&self, fault: E) -> String {
        self.echo_with(fault, false)
    }

    /// Like [`echo`](Self::echo) but without the log line.
    pub fn echo_silent<E: Into<BoxError>>(&self, fault: E) -> String {
        self.echo_with(fault, true)
    }

    /// Echo an optional fault. `None` yields the nil report and dispatches
    /// nothing.
    pub fn echo_opt<E: Into<BoxError>>(&self, fault: Option<E>) -> String {
        match fault {
            Some(fault) => self.echo(fault),
            None => NIL_REPORT.to_string(),
        }
    }

    pub fn echo_with<E: Into<BoxError>>(&self, fault: E, silent: bool) -> String {
        let fault = Fault::new(fault);
        let (report, subject) = self.render_walk(&fault);

        if !silent {
            match report.level {
                Level::Warn => warn!("{}", report.plain),
                Level::Error | Level::Panic => error!("{}", report.plain),
            }
        }

        self.callbacks.dispatch(report.level, &report.meta, subject);
        report.plain
    }

    /// Report plus the fault handed to the callback: the panic link on the
    /// panic path, the whole chain otherwise.
    fn render_walk<'a>(&self, fault: &'a Fault) -> (Report, &'a Fault) {
        let ReporterConfig {
            version,
            max_depth,
            color,
        } = &self.config;

        match chain::walk(fault, *max_depth) {
            Walk::Chain(walk) => (render::render_chain(walk, version, *color), fault),
            Walk::Panic { link, node, meta } => (
                stack::render_panic(node, meta, version, *max_depth, *color),
                link,
            ),
        }
    }
}
