use config::{Config as Cfg, Environment, File};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Load a typed configuration section.
///
/// Sources, lowest priority first: `.env` (via dotenvy), an optional
/// `configuration.{toml,yaml,json}` file, then `PREFIX__SECTION__KEY`
/// environment variables.
pub fn load<T: DeserializeOwned>(prefix: &str) -> Result<T, ConfigError> {
    dotenvy::dotenv().ok();

    let config = Cfg::builder()
        .add_source(File::with_name("configuration").required(false))
        .add_source(Environment::with_prefix(prefix).separator("__"))
        .build()?;

    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default = "default_port")]
        port: u16,
    }

    fn default_port() -> u16 {
        8080
    }

    #[test]
    fn test_load_falls_back_to_serde_defaults() {
        let sample: Sample = load("SERVICE_CORE_CONFIG_TEST").expect("load config");
        assert_eq!(sample.port, 8080);
    }
}
