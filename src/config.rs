use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path, time::Duration};
use url::Url;

pub const CONFIG_FILE: &str = "docref.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Documentation roots by source id; each must serve `objects.inv`
    #[serde(default = "default_sources")]
    pub sources: BTreeMap<String, Url>,
    /// Source answering `discordpy` lookups
    #[serde(default = "default_primary_source")]
    pub primary_source: String,
    /// Source answering `python` lookups
    #[serde(default = "default_secondary_source")]
    pub secondary_source: String,
    /// Inventory project whose keys get their namespaces stripped
    #[serde(default = "default_tracked_project")]
    pub tracked_project: String,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_sources() -> BTreeMap<String, Url> {
    [
        ("latest", "https://discordpy.readthedocs.io/en/latest"),
        ("python", "https://docs.python.org/3"),
    ]
    .into_iter()
    .filter_map(|(id, url)| Some((id.to_string(), Url::parse(url).ok()?)))
    .collect()
}

fn default_primary_source() -> String {
    "latest".to_string()
}

fn default_secondary_source() -> String {
    "python".to_string()
}

fn default_tracked_project() -> String {
    "discord.py".to_string()
}

fn default_max_results() -> usize {
    8
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            primary_source: default_primary_source(),
            secondary_source: default_secondary_source(),
            tracked_project: default_tracked_project(),
            max_results: default_max_results(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load `docref.toml` from the working directory, falling back to defaults
    pub fn load() -> Self {
        let config_path = Path::new(CONFIG_FILE);

        if config_path.exists() {
            match Self::from_path(config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("{}; using default configuration", e);
                }
            }
        }

        Config::default()
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        if config.max_results == 0 {
            return Err(ConfigError::Invalid {
                path: path.display().to_string(),
                message: "max_results must be at least 1",
            });
        }

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.sources.len(), 2);
        assert_eq!(
            config.sources["latest"].as_str(),
            "https://discordpy.readthedocs.io/en/latest"
        );
        assert_eq!(config.sources["python"].as_str(), "https://docs.python.org/3");
        assert_eq!(config.max_results, 8);
        assert_eq!(config.tracked_project, "discord.py");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_results = 3").unwrap();
        writeln!(file, "[sources]").unwrap();
        writeln!(file, "stable = \"https://discordpy.readthedocs.io/en/stable\"").unwrap();

        let config = Config::from_path(file.path()).unwrap();
        assert_eq!(config.max_results, 3);
        assert_eq!(config.sources.len(), 1);
        assert!(config.sources.contains_key("stable"));
        assert_eq!(config.primary_source, "latest");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_results = \"many\"").unwrap();
        assert!(matches!(
            Config::from_path(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_zero_max_results_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_results = 0").unwrap();
        let err = Config::from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().contains("max_results must be at least 1"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_results = 1").unwrap();
        assert_eq!(Config::from_path(file.path()).unwrap().max_results, 1);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(matches!(
            Config::from_path(Path::new("/definitely/not/here/docref.toml")),
            Err(ConfigError::Read { .. })
        ));
    }
}
