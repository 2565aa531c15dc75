use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub openrouter_api_key: String,
    pub openrouter_api_key_backup: Option<String>,
    pub openrouter_base_url: String,
    pub llm_model: String,
    pub max_chunk_size: usize,
    pub retry_base_delay_ms: u64,
    pub public_rps: u32,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            openrouter_api_key: get_env("OPENROUTER_API_KEY")?,
            openrouter_api_key_backup: env::var("OPENROUTER_API_KEY_BACKUP").ok(),
            openrouter_base_url: env::var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|_| "https://openrouter.ai/api/v1".to_string()),
            llm_model: env::var("LLM_MODEL")
                .unwrap_or_else(|_| "xiaomi/mimo-v2-flash:free".to_string()),
            max_chunk_size: get_env_parse_or("MAX_CHUNK_SIZE", 3000)?,
            retry_base_delay_ms: get_env_parse_or("RETRY_BASE_DELAY_MS", 1000)?,
            public_rps: get_env_parse_or("PUBLIC_RPS", 60)?,
        })
    }

    /// Ordered credential list tried by the model client.
    pub fn api_keys(&self) -> Vec<String> {
        let mut keys = vec![self.openrouter_api_key.clone()];
        if let Some(backup) = &self.openrouter_api_key_backup {
            keys.push(backup.clone());
        }
        keys
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
