/// Command-line configuration
use ace_generation::GenerationConfig;
use ace_server_client::ServerConfig;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file looked up in the working directory
const DEFAULT_CONFIG_NAME: &str = "ace-studio";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StudioConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default)]
    pub url: String,

    /// Bearer token of the signed-in user
    #[serde(default)]
    pub token: Option<String>,
}

impl StudioConfig {
    /// Load configuration from file and environment.
    ///
    /// An explicit `path` must exist; otherwise `ace-studio.toml` in the
    /// working directory is used when present. `ACE_SERVER_URL` and
    /// `ACE_SERVER_TOKEN` override the file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        settings = match path {
            Some(path) => settings.add_source(config::File::from(path).required(true)),
            None => settings
                .add_source(config::File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        // Override with environment variables (prefixed with ACE_)
        settings = settings.add_source(
            config::Environment::with_prefix("ACE")
                .separator("_")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.url.trim().is_empty() {
            bail!("Server URL is required (set ACE_SERVER_URL)");
        }

        self.generation
            .validate()
            .context("Invalid generation settings")?;

        Ok(())
    }

    /// The session token, or an error telling the user how to provide one
    pub fn token(&self) -> Result<String> {
        match self.server.token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token.to_string()),
            _ => bail!("Not signed in (set ACE_SERVER_TOKEN)"),
        }
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new(self.server.url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studio.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_file_with_generation_overrides() {
        let (_dir, path) = write_config(
            r#"
            [server]
            url = "http://localhost:3001"
            token = "secret"

            [generation]
            poll_interval_ms = 500
            compact_layout = true
            "#,
        );

        let config = StudioConfig::load(Some(&path)).unwrap();
        assert_eq!(config.server.url, "http://localhost:3001");
        assert_eq!(config.token().unwrap(), "secret");
        assert_eq!(config.generation.poll_interval_ms, 500);
        assert!(config.generation.compact_layout);
        // Untouched fields keep their defaults
        assert_eq!(config.generation.job_timeout_ms, 600_000);
        assert_eq!(config.generation.max_bulk_count, 10);
        config.validate().unwrap();
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(StudioConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn missing_url_fails_validation() {
        let config = StudioConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ACE_SERVER_URL"));
    }

    #[test]
    fn bad_generation_settings_fail_validation() {
        let (_dir, path) = write_config(
            r#"
            [server]
            url = "http://localhost:3001"

            [generation]
            poll_interval_ms = 0
            "#,
        );

        let config = StudioConfig::load(Some(&path)).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn blank_token_is_not_a_session() {
        let config = StudioConfig {
            server: ServerSettings {
                url: "http://localhost:3001".into(),
                token: Some("   ".into()),
            },
            ..StudioConfig::default()
        };
        assert!(config.token().is_err());
        assert_eq!(config.server_config().url, "http://localhost:3001");
    }
}
