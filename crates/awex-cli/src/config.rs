//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
///
/// Everything the daemon address and export behavior depend on lives
/// here rather than being hard-coded: base URL, liveness timeout, the
/// narrow-policy lookback and result cap, the broad-policy keyword set,
/// and an optional output-path override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// aw-server API root.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Lookback for the narrow policy, in hours.
    pub lookback_hours: i64,

    /// Per-bucket result cap for narrow fetches.
    pub limit: u32,

    /// Substrings selecting buckets under the broad policy.
    pub keywords: Vec<String>,

    /// Output path override. `None` falls back to the policy default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: awex_client::DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            lookback_hours: 12,
            limit: 1000,
            keywords: awex_core::DEFAULT_KEYWORDS
                .iter()
                .map(|keyword| (*keyword).to_string())
                .collect(),
            output: None,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Precedence, lowest to highest: built-in defaults, the TOML file
    /// in the platform config directory, the explicitly given file, and
    /// `AWEX_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("AWEX_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for awex.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("awex"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_the_documented_behavior() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:5600/api/0");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.lookback_hours, 12);
        assert_eq!(config.limit, 1000);
        assert_eq!(config.keywords, ["window", "afk", "browser"]);
        assert_eq!(config.output, None);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "base_url = \"http://127.0.0.1:5666/api/0\"").unwrap();
        writeln!(file, "lookback_hours = 24").unwrap();
        writeln!(file, "keywords = [\"window\"]").unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:5666/api/0");
        assert_eq!(config.lookback_hours, 24);
        assert_eq!(config.keywords, ["window"]);
        // Untouched fields keep their defaults.
        assert_eq!(config.limit, 1000);
    }

    #[test]
    fn missing_explicit_file_falls_back_to_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config::load_from(Some(&temp.path().join("nope.toml"))).unwrap();
        assert_eq!(config.timeout_secs, 10);
    }
}
