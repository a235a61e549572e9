//! Configuration: command line, environment, TOML file, compiled defaults (in that order)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

const APP_DIR: &str = "catalog-console";
const DEFAULT_API_URL: &str = "http://localhost/api";
const DEFAULT_LOG_DIR: &str = ".logs";

#[derive(Parser, Debug, Default)]
#[command(name = "catalog-console", about = "Terminal console for a music catalog asset store")]
pub struct Cli {
    /// Base URL of the asset store API
    #[arg(long, env = "CATALOG_API_URL")]
    pub api_url: Option<String>,

    /// File holding the saved session token
    #[arg(long, env = "CATALOG_CREDENTIALS_FILE")]
    pub credentials_file: Option<PathBuf>,

    /// Directory for log files
    #[arg(long, env = "CATALOG_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, env = "CATALOG_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Keys accepted in the TOML file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    api_url: Option<String>,
    credentials_file: Option<PathBuf>,
    log_dir: Option<PathBuf>,
    request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub credentials_file: PathBuf,
    pub log_dir: PathBuf,
    /// No timeout unless one is configured
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn load(cli: Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => read_file_config(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => read_file_config(&path)?,
                _ => FileConfig::default(),
            },
        };
        Ok(Self::merge(cli, file))
    }

    fn merge(cli: Cli, file: FileConfig) -> Self {
        let api_url = cli
            .api_url
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let credentials_file = cli
            .credentials_file
            .or(file.credentials_file)
            .unwrap_or_else(default_credentials_path);
        let log_dir = cli
            .log_dir
            .or(file.log_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

        Self {
            api_url,
            credentials_file,
            log_dir,
            request_timeout: file.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing config file {}", path.display()))
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

fn default_credentials_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR).join("credentials"))
        .unwrap_or_else(|| PathBuf::from(".credentials"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::merge(Cli::default(), FileConfig::default());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.log_dir, PathBuf::from(DEFAULT_LOG_DIR));
        assert_eq!(config.request_timeout, None);
        assert!(config.credentials_file.ends_with("credentials"));
    }

    #[test]
    fn command_line_beats_file() {
        let cli = Cli {
            api_url: Some("http://cli/api".to_string()),
            ..Default::default()
        };
        let file = FileConfig {
            api_url: Some("http://file/api".to_string()),
            log_dir: Some(PathBuf::from("/var/log/catalog")),
            request_timeout_secs: Some(15),
            ..Default::default()
        };

        let config = Config::merge(cli, file);
        assert_eq!(config.api_url, "http://cli/api");
        assert_eq!(config.log_dir, PathBuf::from("/var/log/catalog"));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn explicit_config_file_is_read() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "api_url = \"http://store:8080/api\"\nrequest_timeout_secs = 5\n",
        )
        .expect("write");

        let config = Config::load(Cli {
            config: Some(path),
            ..Default::default()
        })
        .expect("load");
        assert_eq!(config.api_url, "http://store:8080/api");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let result = Config::load(Cli {
            config: Some(PathBuf::from("/nonexistent/catalog.toml")),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "api_uri = \"typo\"\n").expect("write");

        let result = Config::load(Cli {
            config: Some(path),
            ..Default::default()
        });
        assert!(result.is_err());
    }
}
