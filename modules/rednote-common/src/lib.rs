pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, LlmConfig, LlmProvider};
pub use error::{CollectError, ConfigError};
pub use types::*;
