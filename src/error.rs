//! Error types.
//!
//! Only genuinely fatal conditions surface as errors: a malformed bootstrap
//! setting, activating with an unpaired begin/end registration, or an
//! unknown control command. Everything soft — missing ancestors, absent
//! tasks, out-of-range event numbers — is a sentinel or a `bool`, because
//! the registration and firing surfaces must stay safe for speculative
//! callers.

use crate::event::Event;
use thiserror::Error;

/// Fatal bootstrap-configuration errors.
///
/// The host is expected to abort through its own fatal-error facility when
/// one of these surfaces; execution does not continue past initialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The tool-enable environment variable held an unrecognized value.
    #[error("PARASCOPE_TOOL should be set to enabled or disabled, got {value:?}")]
    InvalidToolSetting {
        /// The offending value as read from the environment.
        value: String,
    },
}

/// Fatal monitoring-configuration errors raised by the control interface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MonitorError {
    /// Exactly one half of a designated begin/end pair is registered.
    ///
    /// A tool observing entries without exits (or exits without entries)
    /// for a bounded region would corrupt its matched-pair accounting, so
    /// activation refuses to proceed.
    #[error("both callbacks in a begin/end pair must be implemented: {registered:?} is registered but {missing:?} is not")]
    UnpairedCallback {
        /// The half of the pair that is registered.
        registered: Event,
        /// The half of the pair that is missing.
        missing: Event,
    },

    /// A raw control word outside the closed command set.
    #[error("unknown control command: {command}")]
    UnknownCommand {
        /// The unrecognized command word.
        command: u64,
    },
}

impl MonitorError {
    /// Returns true for the unpaired-registration configuration error.
    #[must_use]
    pub const fn is_unpaired(&self) -> bool {
        matches!(self, Self::UnpairedCallback { .. })
    }
}
