//! # errata
//!
//! Annotated error chains with severity, origin and metadata, rendered and
//! dispatched in one call.
//!
//! Errors are wrapped where they happen with [`error`], [`warn`] or
//! [`panic`]. Each wrap records the call site, an optional friendly message
//! and key/value metadata. Nothing is printed at that point. At the top of
//! the program the chain is handed to [`Reporter::echo`] (or
//! [`global::echo`]), which walks it, writes one multi-line report to the
//! log, fires the callback registered for the chain's severity and returns
//! the report as plain text.
//!
//! # Module Structure
//!
//! - [`node`] - [`Annotated`] links, the [`Fault`] chain, [`Level`], [`Kind`], [`Origin`]
//! - [`meta`] - Key/value metadata
//! - [`report`] - Chain walking, rendering, callbacks, the [`Reporter`]
//! - [`global`] - Process-wide reporter
//! - [`catalog`] - Ready-made root causes
//! - [`config`] - Reporter configuration and TOML loading
//! - [`consts`] - Versions, limits and fixed messages
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use errata::prelude::*;
//!
//! fn load() -> Result<(), Annotated> {
//!     let io = std::io::Error::other("disk full");
//!     Err(error(io, &["save failed"]).kvs(&["volume", "/data"]))
//! }
//!
//! let reporter = Reporter::new(ReporterConfig::default());
//! if let Err(e) = load() {
//!     let report = reporter.echo_silent(e);
//!     assert!(report.starts_with("ERROR ver: v0.0.0\n  2 > disk full"));
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod consts;
mod construct;
pub mod global;
pub mod meta;
pub mod node;
pub mod prelude;
pub mod report;

pub use config::{ConfigError, ConfigLoader, LogLevel, ReporterConfig};
pub use consts::BASE_VERSION;
pub use construct::{error, error_opt, panic, panic_opt, warn, warn_opt};
pub use meta::Meta;
pub use node::{Annotated, BoxError, Fault, Kind, Level, NilCause, Origin, level_of};
pub use report::{Callback, CallbackPanic, Callbacks, Report, Reporter};
