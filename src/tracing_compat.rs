//! Tracing compatibility layer for engine diagnostics.
//!
//! The engine logs registration rejections, control transitions, and
//! skipped dispatches. With the `tracing-integration` feature enabled these
//! go through the `tracing` crate; without it the macros compile to
//! nothing, keeping the hot path free of logging cost by construction.
//!
//! ```toml
//! parascope = { version = "0.1", features = ["tracing-integration"] }
//! ```

#[cfg(feature = "tracing-integration")]
pub use tracing::{debug, error, info, trace, warn};

#[cfg(not(feature = "tracing-integration"))]
mod noop {
    //! No-op macro bodies used when tracing is disabled.

    /// No-op trace-level logging macro.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op debug-level logging macro.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op info-level logging macro.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// No-op warn-level logging macro.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// No-op error-level logging macro.
    #[macro_export]
    macro_rules! error {
        ($($arg:tt)*) => {};
    }
}

#[cfg(not(feature = "tracing-integration"))]
pub use crate::{debug, error, info, trace, warn};
