use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    ConfigInvalid,
    SnapshotReadFailed,
    SnapshotParseError,
    NodeNotFound,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1002",
            Self::ConfigInvalid => "E1003",
            Self::SnapshotReadFailed => "E2001",
            Self::SnapshotParseError => "E2002",
            Self::NodeNotFound => "E3001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::ConfigInvalid => "Config value out of range",
            Self::SnapshotReadFailed => "Graph snapshot could not be read",
            Self::SnapshotParseError => "Graph snapshot is not valid JSON",
            Self::NodeNotFound => "Node not found in snapshot",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in linkscope.toml and retry."),
            Self::ConfigInvalid => {
                Some("Thresholds must be finite; ratios must lie between 0 and 1.")
            }
            Self::SnapshotReadFailed => Some("Check the snapshot path and read permissions."),
            Self::SnapshotParseError => {
                Some("Expected an object with `nodes` and `edges` arrays.")
            }
            Self::NodeNotFound => Some("Node ids are case-sensitive; check the `nodes` array."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised while loading or validating an [`AnalysisConfig`].
///
/// [`AnalysisConfig`]: crate::config::AnalysisConfig
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    /// Map this error onto its stable [`ErrorCode`].
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } | Self::Parse { .. } => ErrorCode::ConfigParseError,
            Self::Invalid { .. } => ErrorCode::ConfigInvalid,
        }
    }
}

/// Errors raised while decoding a [`GraphSnapshot`].
///
/// [`GraphSnapshot`]: crate::model::GraphSnapshot
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SnapshotError {
    /// Map this error onto its stable [`ErrorCode`].
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::SnapshotReadFailed,
            Self::Parse(_) => ErrorCode::SnapshotParseError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::ConfigParseError,
            ErrorCode::ConfigInvalid,
            ErrorCode::SnapshotReadFailed,
            ErrorCode::SnapshotParseError,
            ErrorCode::NodeNotFound,
            ErrorCode::InternalUnexpected,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::NodeNotFound.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn snapshot_parse_error_maps_to_code() {
        let err = serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json");
        let err = SnapshotError::from(err);
        assert_eq!(err.code(), ErrorCode::SnapshotParseError);
        assert!(err.to_string().starts_with("failed to parse snapshot"));
    }

    #[test]
    fn invalid_config_error_names_field() {
        let err = ConfigError::Invalid {
            field: "paths.max_depth",
            reason: "must be at least 1".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::ConfigInvalid);
        assert!(err.to_string().contains("paths.max_depth"));
    }
}
