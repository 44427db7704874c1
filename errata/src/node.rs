//! The annotated error value and the fault chain it forms.
//!
//! ## Chain Model
//!
//! ```text
//! Fault::Node ──cause──► Fault::Node ──cause──► Fault::Terminal
//!  (outermost)             (inner)               (root cause)
//! ```
//!
//! Every [`Annotated`] owns exactly one cause. The chain is a closed two-way
//! variant: either another annotated link or a terminal error that is not one
//! of ours. Walking it never needs runtime type probing beyond the single
//! downcast performed when a cause is first wrapped.

use std::error::Error;
use std::fmt;
use std::panic::Location;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::GENERIC_MESSAGE;
use crate::meta::Meta;

/// Boxed error accepted as a cause.
pub type BoxError = Box<dyn Error + Send + Sync>;

// ─── Severity & Classification ──────────────────────────────────────

/// Severity of an annotated error.
///
/// Selects the report style and which callback fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Informational, usually needs no action.
    Warn = 1,
    /// Requires attention.
    Error = 2,
    /// Unrecoverable where raised. Reported as a call stack, not a chain.
    Panic = 3,
}

impl Level {
    /// Report tag (`WARN`, `ERROR`, `PANIC`).
    pub const fn tag(&self) -> &'static str {
        match self {
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Panic => "PANIC",
        }
    }

    /// Constructor name, as used in placeholder messages.
    pub const fn name(&self) -> &'static str {
        match self {
            Level::Warn => "Warn",
            Level::Error => "Error",
            Level::Panic => "Panic",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Where a fault came from. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Environment or internal failure, not caused by input.
    #[default]
    System,
    /// Caller-supplied data failed validation.
    Input,
}

// ─── Origin ─────────────────────────────────────────────────────────

/// Call site that built an annotated error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Origin {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
    /// Enclosing module path, known only when built through [`annotate!`].
    ///
    /// [`annotate!`]: crate::annotate
    pub function: Option<&'static str>,
}

impl Origin {
    /// Origin of the caller of the enclosing `#[track_caller]` function.
    #[track_caller]
    pub fn caller() -> Self {
        let loc = Location::caller();
        Self {
            file: loc.file(),
            line: loc.line(),
            column: loc.column(),
            function: None,
        }
    }

    /// Origin from explicit parts (used by the `annotate!` macro).
    pub const fn here(
        file: &'static str,
        line: u32,
        column: u32,
        function: Option<&'static str>,
    ) -> Self {
        Self {
            file,
            line,
            column,
            function,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

// ─── Placeholder ────────────────────────────────────────────────────

/// Stand-in cause used when a constructor is handed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Error is nil ({})", .0.name())]
pub struct NilCause(pub Level);

// ─── Fault ──────────────────────────────────────────────────────────

/// One link of a cause chain.
pub enum Fault {
    /// An annotated link; its cause is the next link.
    Node(Box<Annotated>),
    /// A foreign error that ends the chain.
    Terminal(BoxError),
}

impl Fault {
    /// Wrap any error-like value.
    ///
    /// `Annotated` and `Fault` values are recognised and kept as chain
    /// links; everything else becomes a terminal fault.
    pub fn new<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::from_boxed(err.into())
    }

    pub fn from_boxed(err: BoxError) -> Self {
        match err.downcast::<Annotated>() {
            Ok(node) => Fault::Node(node),
            Err(err) => match err.downcast::<Fault>() {
                Ok(fault) => *fault,
                Err(err) => Fault::Terminal(err),
            },
        }
    }

    /// Placeholder fault for an absent cause.
    pub fn nil(level: Level) -> Self {
        Fault::Terminal(Box::new(NilCause(level)))
    }

    /// Severity if this link is annotated.
    pub fn level(&self) -> Option<Level> {
        self.as_node().map(Annotated::level)
    }

    pub fn as_node(&self) -> Option<&Annotated> {
        match self {
            Fault::Node(node) => Some(node),
            Fault::Terminal(_) => None,
        }
    }

    /// Next link of the chain, `None` at the root cause.
    pub fn next(&self) -> Option<&Fault> {
        self.as_node().map(Annotated::cause)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Fault::Terminal(_))
    }

    pub fn as_error(&self) -> &(dyn Error + 'static) {
        match self {
            Fault::Node(node) => node.as_ref(),
            Fault::Terminal(err) => err.as_ref(),
        }
    }

    /// Iterate over this link and every link below it.
    pub fn chain(&self) -> impl Iterator<Item = &Fault> {
        std::iter::successors(Some(self), |f| f.next())
    }
}

impl From<Annotated> for Fault {
    fn from(node: Annotated) -> Self {
        Fault::Node(Box::new(node))
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::Node(node) => fmt::Display::fmt(node, f),
            Fault::Terminal(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::Node(node) => f.debug_tuple("Fault::Node").field(node).finish(),
            Fault::Terminal(err) => f.debug_tuple("Fault::Terminal").field(err).finish(),
        }
    }
}

impl Error for Fault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.as_error().source()
    }
}

// ─── Annotated ──────────────────────────────────────────────────────

/// An error wrapped with severity, kind, origin, friendly message and
/// metadata.
///
/// Built by [`error`](crate::error), [`warn`](crate::warn),
/// [`panic`](crate::panic) or the [`annotate!`](crate::annotate) macro and
/// consumed once by an echo.
#[derive(Debug)]
pub struct Annotated {
    level: Level,
    kind: Kind,
    origin: Origin,
    message: String,
    cause: Fault,
    meta: Meta,
}

impl Annotated {
    /// Build a node around `cause`.
    ///
    /// Message resolution: non-empty `messages` (joined with `". "`), else
    /// the message of an annotated cause, else the cause's own text, else
    /// the generic fallback.
    pub fn new(level: Level, cause: Fault, messages: &[&str], origin: Origin) -> Self {
        let message = resolve_message(&cause, messages);
        Self {
            level,
            kind: Kind::System,
            origin,
            message,
            cause,
            meta: Meta::new(),
        }
    }

    /// Attach alternating key/value metadata.
    ///
    /// Odd-length input records `kvNotEven` instead; see
    /// [`Meta::extend_pairs`].
    pub fn kvs(mut self, kvs: &[&str]) -> Self {
        self.meta.extend_pairs(kvs);
        self
    }

    /// Attach a single metadata pair.
    pub fn kv(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.meta.insert(key, value.to_string());
        self
    }

    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }

    /// Classify as caused by bad input.
    pub fn input(self) -> Self {
        self.with_kind(Kind::Input)
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> &Fault {
        &self.cause
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Give up the wrapper and return the cause.
    pub fn into_cause(self) -> Fault {
        self.cause
    }
}

impl fmt::Display for Annotated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for Annotated {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.cause.as_error())
    }
}

fn resolve_message(cause: &Fault, messages: &[&str]) -> String {
    if !messages.is_empty() {
        return messages.join(". ");
    }
    let text = match cause {
        Fault::Node(node) => node.message.clone(),
        Fault::Terminal(err) => err.to_string(),
    };
    if text.is_empty() {
        GENERIC_MESSAGE.to_string()
    } else {
        text
    }
}

/// Severity of `err` if it is one of ours, `None` otherwise.
pub fn level_of(err: &(dyn Error + 'static)) -> Option<Level> {
    if let Some(node) = err.downcast_ref::<Annotated>() {
        return Some(node.level);
    }
    err.downcast_ref::<Fault>().and_then(Fault::level)
}
