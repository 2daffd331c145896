use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// File name looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "linkscope.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub patterns: PatternConfig,
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default)]
    pub anomaly: AnomalyConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Length of each `top_by_*` list.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Minimum undirected neighbour count for a node to be a star centre.
    #[serde(default = "default_min_star_size")]
    pub min_star_size: usize,
    #[serde(default = "default_triangle_significance")]
    pub triangle_significance: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            min_star_size: default_min_star_size(),
            triangle_significance: default_triangle_significance(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Longest path (in hops) explored by all-paths enumeration.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Stop after this many paths. `None` enumerates every path within
    /// `max_depth`.
    #[serde(default)]
    pub max_paths: Option<usize>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_paths: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyConfig {
    /// Degree-1 nodes are only reported once the graph has more nodes than this.
    #[serde(default = "default_large_graph_nodes")]
    pub large_graph_nodes: usize,
    #[serde(default = "default_super_connected_min_degree")]
    pub super_connected_min_degree: usize,
    #[serde(default = "default_bridge_min_betweenness")]
    pub bridge_min_betweenness: f64,
    /// Share of unconnected neighbour pairs above which a node is a structural hole.
    #[serde(default = "default_structural_hole_ratio")]
    pub structural_hole_ratio: f64,
    #[serde(default = "default_suspected_min_weight")]
    pub suspected_min_weight: f64,
    #[serde(default = "default_confirmed_max_weight")]
    pub confirmed_max_weight: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            large_graph_nodes: default_large_graph_nodes(),
            super_connected_min_degree: default_super_connected_min_degree(),
            bridge_min_betweenness: default_bridge_min_betweenness(),
            structural_hole_ratio: default_structural_hole_ratio(),
            suspected_min_weight: default_suspected_min_weight(),
            confirmed_max_weight: default_confirmed_max_weight(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a TOML document and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML (reported against
    /// `origin`) and [`ConfigError::Invalid`] on out-of-range values.
    pub fn from_toml_str(raw: &str, origin: &Path) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, otherwise
    /// the errors of [`AnalysisConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Reject thresholds the detectors cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.patterns.min_star_size == 0 {
            return Err(invalid("patterns.min_star_size", "must be at least 1"));
        }
        unit_interval("patterns.triangle_significance", self.patterns.triangle_significance)?;
        if self.paths.max_paths == Some(0) {
            return Err(invalid("paths.max_paths", "must be at least 1 when set"));
        }
        finite_non_negative(
            "anomaly.bridge_min_betweenness",
            self.anomaly.bridge_min_betweenness,
        )?;
        unit_interval("anomaly.structural_hole_ratio", self.anomaly.structural_hole_ratio)?;
        unit_interval("anomaly.suspected_min_weight", self.anomaly.suspected_min_weight)?;
        unit_interval("anomaly.confirmed_max_weight", self.anomaly.confirmed_max_weight)?;
        Ok(())
    }
}

/// Locate the config file to use, if any.
///
/// Precedence: `explicit` path, then [`PROJECT_CONFIG_FILE`] in `cwd`, then
/// `<user config dir>/linkscope/config.toml`.
#[must_use]
pub fn discover_config_path(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let project = cwd.join(PROJECT_CONFIG_FILE);
    if project.is_file() {
        return Some(project);
    }

    let user = dirs::config_dir()?.join("linkscope/config.toml");
    user.is_file().then_some(user)
}

/// Resolve the effective configuration.
///
/// Falls back to [`AnalysisConfig::default`] when no file is found. An
/// explicit path that does not exist is an error rather than a silent
/// fallback.
///
/// # Errors
///
/// Propagates the errors of [`AnalysisConfig::load`].
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<AnalysisConfig, ConfigError> {
    match discover_config_path(explicit, cwd) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading analysis config");
            AnalysisConfig::load(&path)
        }
        None => Ok(AnalysisConfig::default()),
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn unit_interval(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, &format!("{value} is not within 0..=1")))
    }
}

fn finite_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("{value} is not a finite non-negative number")))
    }
}

const fn default_top_k() -> usize {
    10
}

const fn default_min_star_size() -> usize {
    3
}

const fn default_triangle_significance() -> f64 {
    0.7
}

const fn default_max_depth() -> usize {
    5
}

const fn default_large_graph_nodes() -> usize {
    10
}

const fn default_super_connected_min_degree() -> usize {
    5
}

const fn default_bridge_min_betweenness() -> f64 {
    0.1
}

const fn default_structural_hole_ratio() -> f64 {
    0.7
}

const fn default_suspected_min_weight() -> f64 {
    0.8
}

const fn default_confirmed_max_weight() -> f64 {
    0.2
}
