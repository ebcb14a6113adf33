pub mod cli;
pub mod toml_config;

pub use cli::{CliConfig, Command, LogFormat};
pub use toml_config::TomlConfig;

use crate::adapters::openai::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::adapters::smtp::{DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_mailbox, validate_non_empty_string, validate_positive_number, validate_range,
    validate_secret, validate_url, Validate,
};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_GENERATION_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_SMTP_TIMEOUT_SECONDS: u64 = 10;

/// Resolved settings: command line / environment over TOML file over defaults.
#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub sender: String,
    pub sender_password: String,
    pub generation_endpoint: String,
    pub model: String,
    pub temperature: f64,
    pub generation_timeout_seconds: u64,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_timeout_seconds: u64,
}

impl AppConfig {
    /// Reads the `--config` file, if any, and merges it under the command-line values.
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                tracing::debug!("Loading settings from {}", path.display());
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                file
            }
            None => TomlConfig::default(),
        };
        Ok(Self::resolve(cli, &file))
    }

    pub fn resolve(cli: &CliConfig, file: &TomlConfig) -> Self {
        let generation = file.generation();
        let smtp = file.smtp();
        let credentials = file.credentials();

        Self {
            api_key: cli
                .api_key
                .clone()
                .or(credentials.api_key)
                .unwrap_or_default(),
            sender: cli
                .sender
                .clone()
                .or(credentials.sender)
                .unwrap_or_default(),
            sender_password: cli
                .sender_password
                .clone()
                .or(credentials.sender_password)
                .unwrap_or_default(),
            generation_endpoint: cli
                .endpoint
                .clone()
                .or(generation.endpoint)
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            model: cli
                .model
                .clone()
                .or(generation.model)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: cli
                .temperature
                .or(generation.temperature)
                .unwrap_or(DEFAULT_TEMPERATURE),
            generation_timeout_seconds: generation
                .timeout_seconds
                .unwrap_or(DEFAULT_GENERATION_TIMEOUT_SECONDS),
            smtp_host: cli
                .smtp_host
                .clone()
                .or(smtp.host)
                .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            smtp_port: cli.smtp_port.or(smtp.port).unwrap_or(DEFAULT_SMTP_PORT),
            smtp_timeout_seconds: smtp
                .timeout_seconds
                .unwrap_or(DEFAULT_SMTP_TIMEOUT_SECONDS),
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("sender", &self.sender)
            .field("sender_password", &"<redacted>")
            .field("generation_endpoint", &self.generation_endpoint)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("generation_timeout_seconds", &self.generation_timeout_seconds)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_timeout_seconds", &self.smtp_timeout_seconds)
            .finish()
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_secret("OPENAI_API_KEY", &self.api_key)?;
        validate_secret("EMAIL_SENDER", &self.sender)?;
        validate_secret("EMAIL_PASSWORD", &self.sender_password)?;
        validate_mailbox("EMAIL_SENDER", &self.sender)?;

        validate_url("generation.endpoint", &self.generation_endpoint)?;
        validate_non_empty_string("generation.model", &self.model)?;
        validate_range("generation.temperature", self.temperature, 0.0, 2.0)?;
        validate_positive_number(
            "generation.timeout_seconds",
            self.generation_timeout_seconds,
            1,
        )?;

        validate_non_empty_string("smtp.host", &self.smtp_host)?;
        validate_positive_number("smtp.port", self.smtp_port.into(), 1)?;
        validate_positive_number("smtp.timeout_seconds", self.smtp_timeout_seconds, 1)?;

        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn generation_endpoint(&self) -> &str {
        &self.generation_endpoint
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn temperature(&self) -> f64 {
        self.temperature
    }

    fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_seconds)
    }

    fn sender(&self) -> &str {
        &self.sender
    }

    fn sender_password(&self) -> &str {
        &self.sender_password
    }

    fn smtp_host(&self) -> &str {
        &self.smtp_host
    }

    fn smtp_port(&self) -> u16 {
        self.smtp_port
    }

    fn smtp_timeout(&self) -> Duration {
        Duration::from_secs(self.smtp_timeout_seconds)
    }
}
