use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::error::ConfigError;

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_BROWSERLESS_URL: &str = "http://localhost:3000";
const DEFAULT_COOKIES_PATH: &str = "xhs_cookies.json";
const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAi,
    Gemini,
}

impl LlmProvider {
    /// Case-insensitive. Anything other than `gemini` selects OpenAI.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("gemini") {
            LlmProvider::Gemini
        } else {
            LlmProvider::OpenAi
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "openai",
            LlmProvider::Gemini => "gemini",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
}

/// Application configuration loaded from environment variables.
/// Validated once at startup; a missing key for the selected provider is an
/// error before any network activity.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,

    // Browser (Browserless /content for JS rendering)
    pub browserless_url: String,
    pub browserless_token: Option<String>,

    // Files
    pub cookies_path: PathBuf,
    pub output_dir: PathBuf,
}

impl Config {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = get("LLM_PROVIDER")
            .map(|v| LlmProvider::parse(&v))
            .unwrap_or(LlmProvider::OpenAi);

        let (api_key, model) = match provider {
            LlmProvider::OpenAi => (
                get("OPENAI_API_KEY").ok_or(ConfigError::MissingOpenAiKey)?,
                get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            ),
            LlmProvider::Gemini => (
                get("GEMINI_API_KEY")
                    .or_else(|| get("GOOGLE_API_KEY"))
                    .ok_or(ConfigError::MissingGeminiKey)?,
                get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            ),
        };

        let temperature = match get("LLM_TEMPERATURE") {
            Some(raw) => parse_temperature(&raw)?,
            None => DEFAULT_TEMPERATURE,
        };

        Ok(Self {
            llm: LlmConfig {
                provider,
                api_key,
                model,
                temperature,
            },
            browserless_url: get("BROWSERLESS_URL")
                .unwrap_or_else(|| DEFAULT_BROWSERLESS_URL.to_string()),
            browserless_token: get("BROWSERLESS_TOKEN"),
            cookies_path: PathBuf::from(
                get("XHS_COOKIES_PATH").unwrap_or_else(|| DEFAULT_COOKIES_PATH.to_string()),
            ),
            output_dir: PathBuf::from(
                get("OUTPUT_DIR").unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
            ),
        })
    }

    pub fn log_redacted(&self) {
        fn preview_opt(val: &Option<String>) -> String {
            match val {
                Some(v) if !v.is_empty() => preview(v),
                _ => "<not set>".to_string(),
            }
        }

        tracing::info!("Config loaded:");
        tracing::info!("  LLM_PROVIDER: {}", self.llm.provider);
        tracing::info!("  API key: {}", preview(&self.llm.api_key));
        tracing::info!("  model: {} (temperature {})", self.llm.model, self.llm.temperature);
        tracing::info!("  BROWSERLESS_URL: {}", self.browserless_url);
        tracing::info!("  BROWSERLESS_TOKEN: {}", preview_opt(&self.browserless_token));
        tracing::info!("  XHS_COOKIES_PATH: {}", self.cookies_path.display());
        tracing::info!("  OUTPUT_DIR: {}", self.output_dir.display());
    }
}

/// First five chars of a secret plus its length in chars.
fn preview(val: &str) -> String {
    let n = val.char_indices().nth(5).map(|(i, _)| i).unwrap_or(val.len());
    format!("{}...({} chars)", &val[..n], val.chars().count())
}

fn parse_temperature(raw: &str) -> Result<f32, ConfigError> {
    let value: f32 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
        var: "LLM_TEMPERATURE",
        value: raw.to_string(),
        reason: "not a number".to_string(),
    })?;
    if !(0.0..=2.0).contains(&value) {
        return Err(ConfigError::Invalid {
            var: "LLM_TEMPERATURE",
            value: raw.to_string(),
            reason: "must be between 0 and 2".to_string(),
        });
    }
    Ok(value)
}
