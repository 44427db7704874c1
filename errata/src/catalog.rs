//! Ready-made terminal faults.
//!
//! Sentinels are plain errors meant to sit at the root of a chain. Wrap
//! them instead of returning them bare, otherwise the origin is lost:
//!
//! ```rust
//! use errata::catalog::Sentinel;
//! use errata::{Kind, error};
//!
//! let node = error(Sentinel::BadCredentials, &["login rejected"]).with_kind(Sentinel::BadCredentials.kind());
//! assert_eq!(node.kind(), Kind::Input);
//! assert_eq!(node.cause().to_string(), "bad credentials");
//! ```

use thiserror::Error;

use crate::node::Kind;

/// Common root causes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Sentinel {
    /// Data could not be retrieved.
    #[error("could not fetch data")]
    Dataloader,

    /// Data is blank where it must not be.
    #[error("blank data")]
    DataBlank,

    /// A batch lookup was given no keys.
    #[error("no keys provided")]
    NoKeys,

    /// Archived data cannot be changed.
    #[error("data already archived")]
    DataArchived,

    /// A batch lookup returned a different number of rows than keys.
    #[error("get many return wrong length")]
    WrongLength,

    #[error("invalid input data")]
    InvalidInput,

    /// Token claims could not be read.
    #[error("could not read credentials from JWT")]
    BadClaims,

    #[error("token has been blacklisted")]
    Blacklisted,

    #[error("could not cast interface to type")]
    TypeCast,

    #[error("could not parse input")]
    Parse,

    /// Wrong username or password.
    #[error("bad credentials")]
    BadCredentials,

    #[error("not implemented")]
    NotImplemented,

    #[error("unauthorised")]
    Unauthorised,

    #[error("uuid is nil")]
    NilUuid,

    /// Required context values are missing.
    #[error("bad context")]
    BadContext,

    /// Login failed: no user with that email.
    #[error("user not found")]
    AuthNoEmail,

    /// Login failed: password mismatch.
    #[error("wrong password")]
    AuthWrongPassword,

    #[error("access forbidden")]
    Forbidden,
}

impl Sentinel {
    pub const ALL: [Sentinel; 18] = [
        Sentinel::Dataloader,
        Sentinel::DataBlank,
        Sentinel::NoKeys,
        Sentinel::DataArchived,
        Sentinel::WrongLength,
        Sentinel::InvalidInput,
        Sentinel::BadClaims,
        Sentinel::Blacklisted,
        Sentinel::TypeCast,
        Sentinel::Parse,
        Sentinel::BadCredentials,
        Sentinel::NotImplemented,
        Sentinel::Unauthorised,
        Sentinel::NilUuid,
        Sentinel::BadContext,
        Sentinel::AuthNoEmail,
        Sentinel::AuthWrongPassword,
        Sentinel::Forbidden,
    ];

    /// Whether the fault was caused by caller-supplied data.
    pub const fn kind(&self) -> Kind {
        match self {
            Sentinel::NoKeys
            | Sentinel::InvalidInput
            | Sentinel::BadClaims
            | Sentinel::Parse
            | Sentinel::BadCredentials
            | Sentinel::NilUuid
            | Sentinel::AuthNoEmail
            | Sentinel::AuthWrongPassword => Kind::Input,
            _ => Kind::System,
        }
    }
}
