//! Crate-wide constants.
//!
//! Single source of truth for default limits, fixed report strings and
//! reserved metadata keys.

/// Version of the errata reporting format.
pub const BASE_VERSION: &str = "v2.0.6";

/// Application version reported until the embedding app sets its own.
pub const DEFAULT_APP_VERSION: &str = "v0.0.0";

/// Maximum number of links (or stack frames) an echo will traverse.
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// Fallback friendly message when neither the caller nor the cause has one.
pub const GENERIC_MESSAGE: &str = "program error occured, please contact admin if error continues";

/// Report returned when `echo` is handed nothing.
pub const NIL_REPORT: &str = "Error is nil (Echo)";

/// Metadata key recorded when `kvs` receives an odd number of arguments.
pub const KV_NOT_EVEN_KEY: &str = "kvNotEven";

/// Value stored under [`KV_NOT_EVEN_KEY`].
pub const KV_NOT_EVEN_VALUE: &str = "Number of KVs not even";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_are_consistent() {
        assert!(DEFAULT_MAX_DEPTH > 0);
        assert!(BASE_VERSION.starts_with('v'));
        assert!(DEFAULT_APP_VERSION.starts_with('v'));
        assert!(!GENERIC_MESSAGE.is_empty());
    }
}
