use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use dispatch_logging::dispatch_info;
use dispatcher_engine::DispatchSettings;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5678/webhook/contacts";
const DEFAULT_CONFIG_FILE: &str = "dispatcher.ron";
const DEFAULT_LOG_FILE: &str = "dispatcher.log";

/// Assemble contacts and send them to a webhook as one JSON batch.
#[derive(Debug, Default, Parser)]
#[command(name = "dispatcher", version)]
pub struct Cli {
    /// Webhook URL the batch is POSTed to.
    #[arg(long)]
    pub endpoint: Option<String>,
    /// RON configuration file. Defaults to ./dispatcher.ron when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Delimited file to import on startup.
    #[arg(long)]
    pub import: Option<PathBuf>,
    /// Where log output is written.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_secs: None,
            request_timeout_secs: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// File values first, then command-line overrides. An explicit `--config`
    /// must exist; the default file is optional.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        Self::resolve_from(cli, Path::new(DEFAULT_CONFIG_FILE))
    }

    fn resolve_from(cli: &Cli, default_path: &Path) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None if default_path.is_file() => Self::load(default_path)?,
            None => {
                dispatch_info!("No config at {:?}; using defaults", default_path);
                Self::default()
            }
        };
        config.apply_cli(cli);
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(endpoint) = &cli.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(log_file) = &cli.log_file {
            self.log_file = log_file.clone();
        }
    }

    pub fn dispatch_settings(&self) -> DispatchSettings {
        let settings = DispatchSettings {
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        };
        dispatch_info!("Dispatch settings: {:?}", settings);
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_values_are_read_and_missing_keys_default() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            r#"(endpoint: "https://hooks.example.com/contacts", request_timeout_secs: Some(30))"#
        )
        .expect("write");

        let config = AppConfig::load(file.path()).expect("load");

        assert_eq!(config.endpoint, "https://hooks.example.com/contacts");
        assert_eq!(config.request_timeout_secs, Some(30));
        assert_eq!(config.connect_timeout_secs, None);
        assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(
            config.dispatch_settings().request_timeout,
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn cli_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, r#"(endpoint: "https://from-file.example.com")"#).expect("write");
        let cli = Cli {
            endpoint: Some("https://from-cli.example.com".to_string()),
            config: Some(file.path().to_path_buf()),
            log_file: Some(PathBuf::from("other.log")),
            ..Cli::default()
        };

        let config = AppConfig::resolve(&cli).expect("resolve");

        assert_eq!(config.endpoint, "https://from-cli.example.com");
        assert_eq!(config.log_file, PathBuf::from("other.log"));
    }

    #[test]
    fn missing_default_file_yields_defaults_with_overrides() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let cli = Cli {
            endpoint: Some("https://from-cli.example.com".to_string()),
            ..Cli::default()
        };

        let config = AppConfig::resolve_from(&cli, &dir.path().join(DEFAULT_CONFIG_FILE))
            .expect("resolve");

        assert_eq!(
            config,
            AppConfig {
                endpoint: "https://from-cli.example.com".to_string(),
                ..AppConfig::default()
            }
        );
    }

    #[test]
    fn present_default_file_is_read() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, r#"(endpoint: "https://from-file.example.com", connect_timeout_secs: Some(5))"#)
            .expect("write");

        let config = AppConfig::resolve_from(&Cli::default(), &path).expect("resolve");

        assert_eq!(config.endpoint, "https://from-file.example.com");
        assert_eq!(config.connect_timeout_secs, Some(5));
        assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let cli = Cli {
            config: Some(dir.path().join("absent.ron")),
            ..Cli::default()
        };
        assert!(matches!(
            AppConfig::resolve(&cli),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn malformed_config_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "(endpoint: 42)").expect("write");
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn defaults_leave_timeouts_off() {
        let settings = AppConfig::default().dispatch_settings();
        assert_eq!(settings.connect_timeout, None);
        assert_eq!(settings.request_timeout, None);
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from([
            "dispatcher",
            "--endpoint",
            "https://hooks.example.com",
            "--import",
            "list.csv",
            "-v",
        ]);
        assert_eq!(cli.endpoint.as_deref(), Some("https://hooks.example.com"));
        assert_eq!(cli.import, Some(PathBuf::from("list.csv")));
        assert!(cli.verbose);
    }
}
