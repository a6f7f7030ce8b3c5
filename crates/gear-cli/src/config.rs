//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the rules file (bike names, components, mounting rules).
    pub rules_path: PathBuf,

    /// Path to the exported activities file.
    pub activities_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            rules_path: data_dir.join("rules.json"),
            activities_path: data_dir.join("activities.json"),
        }
    }
}

impl Config {
    /// Loads configuration from default locations, optionally merging a specific file.
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

        // GEAR_RULES_PATH, GEAR_ACTIVITIES_PATH
        figment = figment.merge(Env::prefixed("GEAR_"));

        figment.extract()
    }

    /// Applies paths given on the command line over the loaded ones.
    #[must_use]
    pub fn with_overrides(mut self, rules: Option<&Path>, activities: Option<&Path>) -> Self {
        if let Some(path) = rules {
            self.rules_path = path.to_path_buf();
        }
        if let Some(path) = activities {
            self.activities_path = path.to_path_buf();
        }
        self
    }
}

/// Returns the platform-specific config directory for gear.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("gear"))
}

/// Returns the platform-specific data directory for gear.
///
/// On Linux: `~/.local/share/gear`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("gear"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_gear() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "gear");
    }

    #[test]
    fn test_default_config_uses_data_dir() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.rules_path, data_dir.join("rules.json"));
        assert_eq!(config.activities_path, data_dir.join("activities.json"));
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("gear.toml");
        std::fs::write(&path, "rules_path = \"/srv/gear/rules.json\"\n").unwrap();

        let config = Config::load_from(Some(&path)).unwrap();

        assert_eq!(config.rules_path, PathBuf::from("/srv/gear/rules.json"));
        assert_eq!(config.activities_path, Config::default().activities_path);
    }

    #[test]
    fn test_cli_overrides_win() {
        let config = Config::default().with_overrides(Some(Path::new("r.json")), None);

        assert_eq!(config.rules_path, PathBuf::from("r.json"));
        assert_eq!(config.activities_path, Config::default().activities_path);
    }
}
