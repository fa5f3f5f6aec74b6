use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

const DEFAULT_GEMINI_MODELS: &[&str] = &["gemini-pro", "gemini-1.5-pro-latest", "gemini-1.5-flash-latest"];
const DEFAULT_NVIDIA_MODEL: &str = "mistralai/mistral-small-3.1-24b-instruct-2503";
const DEFAULT_GEMINI_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_NVIDIA_BASE: &str = "https://integrate.api.nvidia.com";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

static BEARER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"Bearer\s+([^\s"']+)"#).expect("bearer pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "development" | "dev" | "default" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => bail!("APP_ENV must be 'development' or 'production', got '{other}'"),
        }
    }

    /// Log level used when neither RUST_LOG nor an explicit level is given.
    pub fn default_log_level(self) -> &'static str {
        match self {
            Environment::Development => "debug",
            Environment::Production => "info",
        }
    }
}

/// Settings for the generative-language providers.
/// A provider whose key is `None` is simply not offered.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub google_api_key: Option<String>,
    pub nvidia_api_key: Option<String>,
    pub gemini_models: Vec<String>,
    pub nvidia_model: String,
    pub gemini_base_url: String,
    pub nvidia_base_url: String,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            nvidia_api_key: None,
            gemini_models: DEFAULT_GEMINI_MODELS.iter().map(|m| m.to_string()).collect(),
            nvidia_model: DEFAULT_NVIDIA_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE.to_string(),
            nvidia_base_url: DEFAULT_NVIDIA_BASE.to_string(),
            timeout_secs: 120,
        }
    }
}

/// Application configuration loaded from environment variables.
/// Only malformed values are fatal; everything has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub port: u16,
    pub rust_log: String,
    pub llm: LlmConfig,
    pub max_upload_bytes: usize,
    pub frontend_dir: PathBuf,
    pub question_bank_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            port: 8080,
            rust_log: Environment::Development.default_log_level().to_string(),
            llm: LlmConfig::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            frontend_dir: PathBuf::from("frontend"),
            question_bank_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let environment = Environment::parse(&optional_env("APP_ENV").unwrap_or_default())?;

        let google_api_key = match optional_env("GOOGLE_API_KEY") {
            Some(key) => Some(key),
            None => optional_env("GOOGLE_API_KEY_FILE")
                .map(|path| read_plain_key_file(Path::new(&path)))
                .transpose()?,
        };
        let nvidia_api_key = match optional_env("NVIDIA_API_KEY") {
            Some(key) => Some(key),
            None => optional_env("NVIDIA_API_KEY_FILE")
                .map(|path| read_bearer_key_file(Path::new(&path)))
                .transpose()?,
        };

        let defaults = LlmConfig::default();
        let llm = LlmConfig {
            google_api_key,
            nvidia_api_key,
            gemini_models: optional_env("GEMINI_MODELS")
                .map(|list| parse_model_list(&list))
                .filter(|models| !models.is_empty())
                .unwrap_or(defaults.gemini_models),
            nvidia_model: optional_env("NVIDIA_MODEL").unwrap_or(defaults.nvidia_model),
            gemini_base_url: optional_env("GEMINI_API_BASE").unwrap_or(defaults.gemini_base_url),
            nvidia_base_url: optional_env("NVIDIA_API_BASE").unwrap_or(defaults.nvidia_base_url),
            timeout_secs: parse_env("LLM_TIMEOUT_SECS", defaults.timeout_secs)?,
        };

        Ok(Config {
            environment,
            port: parse_env("PORT", 8080)?,
            rust_log: optional_env("RUST_LOG")
                .unwrap_or_else(|| environment.default_log_level().to_string()),
            llm,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            frontend_dir: optional_env("FRONTEND_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("frontend")),
            question_bank_path: optional_env("QUESTION_BANK_PATH").map(PathBuf::from),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .ok()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect()
}

/// Reads a key file whose whole (trimmed) content is the key.
pub fn read_plain_key_file(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read API key file {}", path.display()))?;
    let key = content.trim();
    if key.is_empty() {
        bail!("API key file {} is empty", path.display());
    }
    Ok(key.to_string())
}

/// Reads a key file containing an `Authorization: Bearer <token>` snippet
/// (for example a copied request sample) and returns the token.
pub fn read_bearer_key_file(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read API key file {}", path.display()))?;
    extract_bearer_token(&content)
        .with_context(|| format!("Could not extract a bearer token from {}", path.display()))
}

fn extract_bearer_token(content: &str) -> Option<String> {
    BEARER_TOKEN
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("").unwrap(), Environment::Development);
        assert_eq!(Environment::parse("Production").unwrap(), Environment::Production);
        assert!(Environment::parse("staging").is_err());
    }

    #[test]
    fn test_extract_bearer_token_from_python_snippet() {
        let snippet = r#"headers = {
    "Authorization": "Bearer nvapi-abc123XYZ",
    "Accept": "application/json"
}"#;
        assert_eq!(extract_bearer_token(snippet).as_deref(), Some("nvapi-abc123XYZ"));
    }

    #[test]
    fn test_extract_bearer_token_missing() {
        assert!(extract_bearer_token("api_key = 'nothing here'").is_none());
    }

    #[test]
    fn test_read_plain_key_file_trims() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  AIza-test-key  ").unwrap();
        assert_eq!(read_plain_key_file(file.path()).unwrap(), "AIza-test-key");
    }

    #[test]
    fn test_read_plain_key_file_empty_is_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(read_plain_key_file(file.path()).is_err());
    }

    #[test]
    fn test_read_bearer_key_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "invoke_url = '...'\nheaders = {{\"Authorization\": \"Bearer nvapi-999\"}}").unwrap();
        assert_eq!(read_bearer_key_file(file.path()).unwrap(), "nvapi-999");
    }

    #[test]
    fn test_parse_model_list_skips_blanks() {
        assert_eq!(
            parse_model_list("gemini-pro, ,gemini-1.5-flash-latest"),
            vec!["gemini-pro".to_string(), "gemini-1.5-flash-latest".to_string()]
        );
    }
}
