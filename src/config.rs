//! Environment-driven bootstrap configuration.
//!
//! The host reads one setting at startup to decide whether monitoring
//! begins in the active or inactive control state. Only the first four
//! characters of the value are significant and matching is ASCII
//! case-insensitive, so `enabled`, `ENABLE`, and `Enab` all select
//! [`ToolStatus::Enabled`]. An unrecognized value is a fatal configuration
//! error — a typo must not silently disable a tool the operator asked for.

use crate::error::ConfigError;

/// Environment variable controlling the initial monitoring state.
pub const ENV_TOOL: &str = "PARASCOPE_TOOL";

/// Whether instrumentation starts active or inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolStatus {
    /// Start with monitoring on. The default when the variable is unset.
    #[default]
    Enabled,
    /// Start with monitoring off; a `StartRestart` command activates it.
    Disabled,
}

impl ToolStatus {
    /// Reads the status from [`ENV_TOOL`].
    ///
    /// Unset means [`ToolStatus::Enabled`]; anything set but unrecognized
    /// is fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(ENV_TOOL) {
            Ok(value) => Self::parse(&value),
            Err(_) => Ok(Self::Enabled),
        }
    }

    /// Parses a status value by its four-character prefix.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let prefix: String = value
            .chars()
            .take(4)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match prefix.as_str() {
            "enab" => Ok(Self::Enabled),
            "disa" => Ok(Self::Disabled),
            _ => Err(ConfigError::InvalidToolSetting {
                value: value.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_values() {
        assert_eq!(ToolStatus::parse("enabled"), Ok(ToolStatus::Enabled));
        assert_eq!(ToolStatus::parse("disabled"), Ok(ToolStatus::Disabled));
    }

    #[test]
    fn matching_is_prefix_based_and_case_insensitive() {
        assert_eq!(ToolStatus::parse("ENABLED"), Ok(ToolStatus::Enabled));
        assert_eq!(ToolStatus::parse("Enable"), Ok(ToolStatus::Enabled));
        assert_eq!(ToolStatus::parse("enabxyz"), Ok(ToolStatus::Enabled));
        assert_eq!(ToolStatus::parse("DISAbling"), Ok(ToolStatus::Disabled));
    }

    #[test]
    fn short_or_unknown_values_are_fatal() {
        assert!(ToolStatus::parse("en").is_err());
        assert!(ToolStatus::parse("").is_err());
        assert!(ToolStatus::parse("yes").is_err());
        assert!(ToolStatus::parse("0").is_err());
        let err = ToolStatus::parse("maybe").expect_err("unrecognized");
        assert_eq!(
            err,
            ConfigError::InvalidToolSetting {
                value: "maybe".into()
            }
        );
    }
}
