use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = "projdesk.toml";
pub const BASE_URL_ENV: &str = "PROJDESK_BACKEND_BASE_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    FSError(#[from] std::io::Error),
    #[error(transparent)]
    SerdeError(#[from] toml::de::Error),
}

#[derive(Deserialize, Clone, Debug)]
pub struct HttpConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("projdesk/{}", env!("CARGO_PKG_VERSION"))
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_state_dir() -> PathBuf {
    PathBuf::from(".projdesk")
}

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
    #[serde(default)]
    pub dev_fallback_email: Option<String>,
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            state_dir: default_state_dir(),
            dev_fallback_email: None,
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Reads `path`, or `projdesk.toml` when none is given. Only the default
    /// file may be absent.
    pub fn parse(path: Option<String>) -> Result<Self, ConfigError> {
        let explicit = path.is_some();
        let path = path.unwrap_or(DEFAULT_CONFIG_PATH.to_string());
        let path = Path::new(path.as_str());

        if !explicit && !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let config_text = fs::read_to_string(path)?;
        let config: Config = toml::from_str(config_text.as_str())?;

        Ok(config)
    }

    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url.filter(|url| !url.trim().is_empty()) {
            self.base_url = base_url;
        }
        self
    }

    /// Applies `PROJDESK_BACKEND_BASE_URL` when set.
    pub fn with_env(self) -> Self {
        self.with_base_url_override(std::env::var(BASE_URL_ENV).ok())
    }

    pub fn dev_fallback_email(&self) -> Option<&str> {
        self.dev_fallback_email
            .as_deref()
            .filter(|email| !email.is_empty())
    }

    pub fn is_valid(&self) -> bool {
        !self.base_url.trim().is_empty() && Url::parse(&self.base_url).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projdesk.toml");
        fs::write(
            &path,
            r#"
base_url = "https://desk.example.edu/api"
state_dir = "/tmp/desk"
dev_fallback_email = "kavita.patil@rvce.edu.in"

[http]
user_agent = "desk-test"
"#,
        )
        .unwrap();

        let config = Config::parse(Some(path.to_string_lossy().to_string())).unwrap();

        assert_eq!("https://desk.example.edu/api", config.base_url);
        assert_eq!(PathBuf::from("/tmp/desk"), config.state_dir);
        assert_eq!(Some("kavita.patil@rvce.edu.in"), config.dev_fallback_email());
        assert_eq!("desk-test", config.http.user_agent);
        assert_eq!(true, config.is_valid());
    }

    #[test]
    fn test_parse_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projdesk.toml");
        fs::write(&path, "base_url = \"http://localhost:9000\"\n").unwrap();

        let config = Config::parse(Some(path.to_string_lossy().to_string())).unwrap();

        assert_eq!("http://localhost:9000", config.base_url);
        assert_eq!(PathBuf::from(".projdesk"), config.state_dir);
        assert_eq!(None, config.dev_fallback_email());
        assert_eq!(true, config.http.user_agent.starts_with("projdesk/"));
    }

    #[test]
    fn test_parse_missing_explicit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let result = Config::parse(Some(path.to_string_lossy().to_string()));

        assert!(matches!(result, Err(ConfigError::FSError(_))));
    }

    #[test]
    fn test_parse_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projdesk.toml");
        fs::write(&path, "base_url = [").unwrap();

        let result = Config::parse(Some(path.to_string_lossy().to_string()));

        assert!(matches!(result, Err(ConfigError::SerdeError(_))));
    }

    #[test]
    fn test_base_url_override() {
        let config = Config::default()
            .with_base_url_override(Some("https://other.example".to_string()));
        assert_eq!("https://other.example", config.base_url);

        let config = Config::default().with_base_url_override(Some("  ".to_string()));
        assert_eq!(default_base_url(), config.base_url);
    }

    #[test]
    fn test_is_valid() {
        let mut config = Config::default();
        assert_eq!(true, config.is_valid());

        config.base_url = "".to_string();
        assert_eq!(false, config.is_valid());

        config.base_url = "not a url".to_string();
        assert_eq!(false, config.is_valid());
    }

    #[test]
    fn test_empty_fallback_is_none() {
        let config = Config {
            dev_fallback_email: Some("".to_string()),
            ..Default::default()
        };

        assert_eq!(None, config.dev_fallback_email());
    }
}
