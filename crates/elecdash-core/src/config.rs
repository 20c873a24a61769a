use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use url::Url;

use super::error::ConfigError;
use super::location::DEFAULT_QUERY_PARAM;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub navigation: NavigationConfig,
    pub loader: LoaderConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct NavigationConfig {
    pub base_url: String,
    pub query_param: String,
    pub history_capacity: usize,
    pub activity_capacity: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://app.local/employer".to_string(),
            query_param: DEFAULT_QUERY_PARAM.to_string(),
            history_capacity: 64,
            activity_capacity: 200,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directory of YAML module manifests; bundled content when absent.
    pub modules_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    pub fn from_toml(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.base_url()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw, path)
    }

    /// A missing file is the default config; a broken one is an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("ELECDASH_BASE_URL") {
            self.navigation.base_url = v;
        }
        if let Ok(v) = std::env::var("ELECDASH_MODULES_DIR") {
            self.loader.modules_dir = Some(PathBuf::from(v));
        }
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.navigation.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            value: self.navigation.base_url.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_is_default() {
        let config = Config::from_toml("", Path::new("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.navigation.query_param, "section");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let raw = r#"
[navigation]
history_capacity = 5

[loader]
modules_dir = "/srv/modules"
"#;
        let config = Config::from_toml(raw, Path::new("config.toml")).unwrap();
        assert_eq!(config.navigation.history_capacity, 5);
        assert_eq!(config.navigation.activity_capacity, 200);
        assert_eq!(
            config.loader.modules_dir.as_deref(),
            Some(Path::new("/srv/modules"))
        );
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let raw = "[navigation]\nbase_url = \"not a url\"\n";
        let err = Config::from_toml(raw, Path::new("c.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn malformed_toml_reports_path() {
        let err = Config::from_toml("[navigation", Path::new("broken.toml")).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn load_or_default_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());

        std::fs::write(&path, "[logging]\nfilter = \"debug\"\n").unwrap();
        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.logging.filter, "debug");
    }
}
