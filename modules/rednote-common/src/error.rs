//! Typed errors for configuration and collection.
//!
//! Display strings are user-facing: they are printed by the CLI and, for
//! collection errors, handed to the next pipeline stage as its input.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY not found in .env file. Please set OPENAI_API_KEY in your .env file.")]
    MissingOpenAiKey,

    #[error(
        "GEMINI_API_KEY or GOOGLE_API_KEY not found in .env file. \
         Please set GEMINI_API_KEY or switch to OpenAI."
    )]
    MissingGeminiKey,

    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Errors that abort a whole collection run.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error(
        "Error: {file_name} not found at {path}. \
         Please create this file with your Xiaohongshu login cookies. \
         See {file_name}.example for format."
    )]
    CookiesMissing { file_name: String, path: String },

    #[error("Error loading cookies: {0}")]
    CookiesInvalid(String),

    #[error("Failed to crawl search page: {0}")]
    SearchRender(String),

    #[error("Error during scraping process: {0}")]
    Other(String),
}

impl From<std::io::Error> for CollectError {
    fn from(err: std::io::Error) -> Self {
        CollectError::Other(err.to_string())
    }
}
