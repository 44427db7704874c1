//! Prelude module for common re-exports.
//!
//! ```rust
//! use errata::prelude::*;
//! ```

// ─── Construction ───────────────────────────────────────────────────
pub use crate::construct::{error, error_opt, panic, panic_opt, warn, warn_opt};
pub use crate::node::{Annotated, Fault, Kind, Level};

// ─── Reporting ──────────────────────────────────────────────────────
pub use crate::meta::Meta;
pub use crate::report::{Report, Reporter};

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, ReporterConfig};

// ─── Root Causes ────────────────────────────────────────────────────
pub use crate::catalog::Sentinel;
