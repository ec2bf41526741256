//! Trace gating configuration read from environment variables.

use std::env;
use std::fmt;
use std::num::ParseIntError;

/// Environment variable naming the enabled trace groups.
pub const GROUP_VAR: &str = "TRACEGROUP";
/// Environment variable holding the level threshold.
pub const LEVEL_VAR: &str = "TRACELEVEL";
/// Environment variable switching the level comparison to exact match.
pub const ONLY_VAR: &str = "TRACEONLY";

/// Sentinel that enables every group when it appears in the group spec.
const ALL_GROUPS: &str = "ALL";

/// Gating parameters shared by every trace site.
///
/// Reads from environment variables with sensible defaults:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `TRACEGROUP` | (empty) | Comma-separated group names, or `ALL`; empty disables tracing |
/// | `TRACELEVEL` | `0` | Level threshold for trace sites |
/// | `TRACEONLY` | (off) | `true` (any case) compares levels for exact equality |
///
/// Set these from the shell before running the program:
///
/// ```sh
/// export TRACEGROUP=Foo,Bar
/// export TRACELEVEL=10
/// export TRACEONLY=TRUE
/// ```
///
/// The process-wide configuration is read once, on first use, and never
/// changes afterwards.
#[derive(Clone, Debug)]
pub struct TraceConfig {
    /// Raw group specification. Empty means tracing is fully disabled.
    pub groups: String,
    /// Level threshold compared against each trace site's level.
    pub level: i32,
    /// When set, a site's level must equal the threshold rather than be at
    /// most the threshold.
    pub exact: bool,
}

impl TraceConfig {
    /// Create a new config from environment variables.
    ///
    /// Missing variables fall back to their defaults; a `TRACELEVEL` that is
    /// present but not an integer is an error, since guessing a threshold
    /// would corrupt every later gating decision.
    pub fn from_env() -> Result<Self, TraceConfigError> {
        let groups = env::var(GROUP_VAR).unwrap_or_default();
        let level = match env::var(LEVEL_VAR) {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|source| TraceConfigError::InvalidLevel { raw, source })?,
            Err(_) => 0,
        };
        let exact = env::var(ONLY_VAR)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let config = Self {
            groups,
            level,
            exact,
        };
        tracing::debug!(
            groups = %config.groups,
            level = config.level,
            exact = config.exact,
            "trace configuration loaded"
        );
        Ok(config)
    }

    /// A configuration with no groups enabled: nothing is ever emitted.
    pub fn disabled() -> Self {
        Self {
            groups: String::new(),
            level: 0,
            exact: false,
        }
    }

    /// Whether tracing is enabled at all (the group spec is non-empty).
    pub fn enabled(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Whether `group` matches the configured group specification.
    ///
    /// Matching is substring containment against the raw spec, not membership
    /// in a parsed set; `ALL` anywhere in the spec enables every group.
    pub fn group_enabled(&self, group: &str) -> bool {
        self.groups.contains(ALL_GROUPS) || self.groups.contains(group)
    }

    /// Whether `level` compares favorably to the configured threshold.
    pub fn level_enabled(&self, level: i32) -> bool {
        if self.exact {
            level == self.level
        } else {
            level <= self.level
        }
    }

    /// Full gating predicate for a trace site, minus the caller's condition.
    pub fn allows(&self, group: &str, level: i32) -> bool {
        self.enabled() && self.group_enabled(group) && self.level_enabled(level)
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Error returned when the environment holds an unusable configuration.
#[derive(Debug)]
pub enum TraceConfigError {
    /// `TRACELEVEL` is set but does not parse as an integer.
    InvalidLevel {
        /// The raw value found in the environment.
        raw: String,
        /// The underlying parse failure.
        source: ParseIntError,
    },
}

impl fmt::Display for TraceConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLevel { raw, source } => {
                write!(f, "{LEVEL_VAR} must be an integer, got {raw:?}: {source}")
            }
        }
    }
}

impl std::error::Error for TraceConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidLevel { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment variables are process state; tests touching them must not
    // interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for var in [GROUP_VAR, LEVEL_VAR, ONLY_VAR] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_values() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = TraceConfig::from_env().unwrap();
        assert_eq!(config.groups, "");
        assert_eq!(config.level, 0);
        assert!(!config.exact);
        assert!(!config.enabled());
    }

    #[test]
    fn test_from_env_reads_all_variables() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        std::env::set_var(GROUP_VAR, "Foo,Bar");
        std::env::set_var(LEVEL_VAR, "20");
        std::env::set_var(ONLY_VAR, "TRUE");

        let config = TraceConfig::from_env().unwrap();
        assert_eq!(config.groups, "Foo,Bar");
        assert_eq!(config.level, 20);
        assert!(config.exact);

        clear_env();
    }

    #[test]
    fn test_non_integer_level_is_an_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        std::env::set_var(LEVEL_VAR, "twenty");

        let err = TraceConfig::from_env().unwrap_err();
        match err {
            TraceConfigError::InvalidLevel { ref raw, .. } => assert_eq!(raw, "twenty"),
        }
        assert!(err.to_string().contains(LEVEL_VAR));

        clear_env();
    }

    #[test]
    fn test_traceonly_is_case_insensitive() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        for value in ["true", "TRUE", "True"] {
            std::env::set_var(ONLY_VAR, value);
            assert!(TraceConfig::from_env().unwrap().exact, "value {value:?}");
        }
        std::env::set_var(ONLY_VAR, "yes");
        assert!(!TraceConfig::from_env().unwrap().exact);

        clear_env();
    }

    #[test]
    fn test_group_matching_is_substring_containment() {
        let config = TraceConfig {
            groups: "Foo,Bar".to_string(),
            level: 0,
            exact: false,
        };
        assert!(config.group_enabled("Foo"));
        assert!(config.group_enabled("Bar"));
        assert!(!config.group_enabled("Baz"));
        // Containment, not set membership: any substring of the spec matches.
        assert!(config.group_enabled("oo,B"));
    }

    #[test]
    fn test_all_sentinel_enables_every_group() {
        let config = TraceConfig {
            groups: "ALL".to_string(),
            level: 0,
            exact: false,
        };
        assert!(config.group_enabled("Foo"));
        assert!(config.group_enabled("anything at all"));
    }

    #[test]
    fn test_level_comparison_modes() {
        let mut config = TraceConfig {
            groups: "Foo".to_string(),
            level: 10,
            exact: false,
        };
        assert!(config.level_enabled(5));
        assert!(config.level_enabled(10));
        assert!(!config.level_enabled(11));

        config.exact = true;
        assert!(!config.level_enabled(5));
        assert!(config.level_enabled(10));
        assert!(!config.level_enabled(11));
    }

    #[test]
    fn test_allows_requires_non_empty_groups() {
        let config = TraceConfig::disabled();
        assert!(!config.allows("Foo", 0));
        assert!(!config.allows("", 0));
    }
}
