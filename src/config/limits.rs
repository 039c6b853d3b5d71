//! Per-connection limits configuration.

use serde::Deserialize;

/// Per-connection limits.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum inbound line length in bytes, newline included (default: 4096).
    /// A longer line is treated as a transport error and ends the session.
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_line_length: default_max_line_length(),
        }
    }
}

fn default_max_line_length() -> usize {
    4096
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_correct() {
        let config = LimitsConfig::default();
        assert_eq!(config.max_line_length, 4096);
    }

    #[test]
    fn empty_table_uses_defaults() {
        let config: LimitsConfig = toml::from_str("").unwrap();
        assert_eq!(config.max_line_length, 4096);
    }

    #[test]
    fn explicit_value_overrides_default() {
        let config: LimitsConfig = toml::from_str("max_line_length = 512").unwrap();
        assert_eq!(config.max_line_length, 512);
    }
}
