use std::env;
use std::error::Error;
use std::fmt;

pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

pub struct AppConfig {
    pub port: u16,
    pub openai_api_key: String,
    pub openai_api_url: String,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingApiKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => {
                write!(f, "OPENAI_API_KEY environment variable not set")
            }
        }
    }
}

impl Error for ConfigError {}

impl AppConfig {
    /// Reads configuration from the process environment. The API key is
    /// required; everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let openai_api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3000);

        let openai_api_url =
            env::var("OPENAI_API_URL").unwrap_or_else(|_| DEFAULT_OPENAI_API_URL.to_string());

        Ok(Self {
            port,
            openai_api_key,
            openai_api_url,
        })
    }
}
