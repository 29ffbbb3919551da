use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
type Result<T> = anyhow::Result<T>;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "FILESHARE_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "fileshare.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct ShareConfig {
    /// Directory exposed over HTTP.
    pub root_dir: PathBuf,
    /// Cached index location. Delete the file to force a rebuild.
    #[serde(default = "default_index_file")]
    pub index_file: PathBuf,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl ShareConfig {
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to deserialize share config")
    }
}

fn default_index_file() -> PathBuf {
    PathBuf::from("file_index.json")
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::ShareConfig;

    #[test]
    fn test_parse_config() {
        let raw = r#"
root_dir = "/srv/share"
index_file = "/var/cache/fileshare/index.json"
bind_addr = "127.0.0.1:9000"
"#;

        let config = ShareConfig::from_str(raw).expect("config should parse");
        assert_eq!(config.root_dir, Path::new("/srv/share"));
        assert_eq!(
            config.index_file,
            Path::new("/var/cache/fileshare/index.json")
        );
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
    }

    #[test]
    fn test_defaults() {
        let config = ShareConfig::from_str(r#"root_dir = "share""#).expect("config should parse");

        assert_eq!(config.index_file, Path::new("file_index.json"));
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
    }

    #[test]
    fn test_root_dir_is_required() {
        assert!(ShareConfig::from_str(r#"bind_addr = "127.0.0.1:1""#).is_err());
    }
}
