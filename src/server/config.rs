use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::notifications::models::SmtpSettings;

#[derive(Deserialize, Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Where a request without a code is sent.
    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default)]
    pub auto_migrate: bool,

    // Notification is disabled when no SMTP host is configured.
    pub smtp_host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_sender: Option<String>,
}

// Partial config for layering
#[derive(Deserialize, Default, Debug)]
struct PartialServerConfig {
    database_url: Option<String>,
    listen_addr: Option<String>,
    fallback_url: Option<String>,
    log_dir: Option<String>,
    auto_migrate: Option<bool>,
    smtp_host: Option<String>,
    smtp_port: Option<u16>,
    smtp_username: Option<String>,
    smtp_password: Option<String>,
    smtp_sender: Option<String>,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_fallback_url() -> String {
    "https://www.example.com".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

impl ServerConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self, String> {
        dotenv::dotenv().ok();

        // 1. Load from file (optional)
        let file_config: PartialServerConfig = if let Some(path_str) = config_path {
            let path = Path::new(path_str);
            if path.exists() {
                let contents = fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read config file at {path:?}: {e}"))?;
                toml::from_str(&contents)
                    .map_err(|e| format!("Failed to parse TOML from config file at {path:?}: {e}"))?
            } else {
                PartialServerConfig::default()
            }
        } else {
            PartialServerConfig::default()
        };

        // 2. Load from environment variables
        let env_config: PartialServerConfig = envy::from_env::<PartialServerConfig>()
            .map_err(|e| format!("Failed to load config from environment: {e}"))?;

        // 3. Merge: environment overrides file
        Self::merge(env_config, file_config)
    }

    fn merge(env_config: PartialServerConfig, file_config: PartialServerConfig) -> Result<Self, String> {
        Ok(ServerConfig {
            database_url: env_config.database_url.or(file_config.database_url)
                .ok_or("DATABASE_URL is required")?,
            listen_addr: env_config.listen_addr.or(file_config.listen_addr)
                .unwrap_or_else(default_listen_addr),
            fallback_url: env_config.fallback_url.or(file_config.fallback_url)
                .unwrap_or_else(default_fallback_url),
            log_dir: env_config.log_dir.or(file_config.log_dir)
                .unwrap_or_else(default_log_dir),
            auto_migrate: env_config.auto_migrate.or(file_config.auto_migrate)
                .unwrap_or(false),
            smtp_host: env_config.smtp_host.or(file_config.smtp_host),
            smtp_port: env_config.smtp_port.or(file_config.smtp_port)
                .unwrap_or_else(default_smtp_port),
            smtp_username: env_config.smtp_username.or(file_config.smtp_username),
            smtp_password: env_config.smtp_password.or(file_config.smtp_password),
            smtp_sender: env_config.smtp_sender.or(file_config.smtp_sender),
        })
    }

    /// SMTP settings when both a host and a sender address are configured.
    pub fn smtp_settings(&self) -> Option<SmtpSettings> {
        let host = self.smtp_host.as_ref().filter(|h| !h.is_empty())?;
        let sender = self.smtp_sender.as_ref().filter(|s| !s.is_empty())?;
        Some(SmtpSettings {
            host: host.clone(),
            port: self.smtp_port,
            username: self.smtp_username.clone(),
            password: self.smtp_password.clone(),
            sender: sender.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_config(toml_src: &str) -> PartialServerConfig {
        toml::from_str(toml_src).unwrap()
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = file_config(
            r#"
            database_url = "postgres://file/db"
            listen_addr = "127.0.0.1:9000"
            smtp_host = "smtp.file.example"
            "#,
        );
        let env = PartialServerConfig {
            database_url: Some("postgres://env/db".to_string()),
            ..Default::default()
        };

        let config = ServerConfig::merge(env, file).unwrap();

        assert_eq!(config.database_url, "postgres://env/db");
        assert_eq!(config.listen_addr, "127.0.0.1:9000");
        assert_eq!(config.smtp_host.as_deref(), Some("smtp.file.example"));
    }

    #[test]
    fn test_defaults_apply() {
        let env = PartialServerConfig {
            database_url: Some("sqlite::memory:".to_string()),
            ..Default::default()
        };

        let config = ServerConfig::merge(env, PartialServerConfig::default()).unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.smtp_port, 587);
        assert_eq!(config.log_dir, "logs");
        assert!(!config.auto_migrate);
        assert!(config.smtp_settings().is_none());
    }

    #[test]
    fn test_database_url_is_required() {
        let result = ServerConfig::merge(PartialServerConfig::default(), PartialServerConfig::default());
        assert_eq!(result.unwrap_err(), "DATABASE_URL is required");
    }

    #[test]
    fn test_smtp_settings_need_host_and_sender() {
        let env = PartialServerConfig {
            database_url: Some("sqlite::memory:".to_string()),
            smtp_host: Some("smtp.example.com".to_string()),
            ..Default::default()
        };
        let mut config = ServerConfig::merge(env, PartialServerConfig::default()).unwrap();
        assert!(config.smtp_settings().is_none());

        config.smtp_sender = Some("noreply@example.com".to_string());
        let smtp = config.smtp_settings().unwrap();
        assert_eq!(smtp.host, "smtp.example.com");
        assert_eq!(smtp.port, 587);
        assert_eq!(smtp.sender, "noreply@example.com");
    }
}
