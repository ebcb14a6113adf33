use crate::utils::error::{ComposerError, Result};
use crate::utils::validation::{validate_positive_number, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Optional settings file. Every key may be omitted; missing values fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub generation: Option<GenerationConfig>,
    pub smtp: Option<SmtpConfig>,
    pub credentials: Option<CredentialsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    pub api_key: Option<String>,
    pub sender: Option<String>,
    pub sender_password: Option<String>,
}

impl TomlConfig {
    /// Loads settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ComposerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses settings from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ComposerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn generation(&self) -> GenerationConfig {
        self.generation.clone().unwrap_or_default()
    }

    pub fn smtp(&self) -> SmtpConfig {
        self.smtp.clone().unwrap_or_default()
    }

    pub fn credentials(&self) -> CredentialsConfig {
        self.credentials.clone().unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    /// Checks only the values present in the file.
    fn validate(&self) -> Result<()> {
        let generation = self.generation();
        if let Some(endpoint) = &generation.endpoint {
            validate_url("generation.endpoint", endpoint)?;
        }
        if let Some(temperature) = generation.temperature {
            validate_range("generation.temperature", temperature, 0.0, 2.0)?;
        }
        if let Some(timeout) = generation.timeout_seconds {
            validate_positive_number("generation.timeout_seconds", timeout, 1)?;
        }

        let smtp = self.smtp();
        if let Some(port) = smtp.port {
            validate_positive_number("smtp.port", port.into(), 1)?;
        }
        if let Some(timeout) = smtp.timeout_seconds {
            validate_positive_number("smtp.timeout_seconds", timeout, 1)?;
        }

        Ok(())
    }
}
