use frontend::shared::list_view::LOAD_MORE_STEP;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub list: ListConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListConfig {
    #[serde(default = "default_page_step")]
    pub page_step: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_step: default_page_step(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_page_step() -> usize {
    LOAD_MORE_STEP
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://127.0.0.1:8000"
timeout_secs = 10

[list]
page_step = 10
"#;

/// Load configuration from config.toml
///
/// Search order:
/// 1. Path given on the command line
/// 2. Next to the executable
/// 3. Falls back to embedded default config
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        tracing::info!("Loading config from: {}", path.display());
        return read_config(path);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");
            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                return read_config(&config_path);
            }
            tracing::debug!("config.toml not found at: {}", config_path.display());
        }
    }

    tracing::info!("Using default embedded configuration");
    Ok(toml::from_str(DEFAULT_CONFIG)?)
}

fn read_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.list.page_step, 10);
    }

    #[test]
    fn test_explicit_path_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"https://ops.example.com\"").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.api.base_url, "https://ops.example.com");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.list.page_step, 10);
    }

    #[test]
    fn test_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
