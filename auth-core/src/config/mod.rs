use secrecy::SecretString;
use serde::Deserialize;
use service_core::config::{self as core_config, ConfigError};
use service_core::observability::{self, TryInitError};

/// Environment prefix, e.g. `AUTH__JWT__SECRET`.
pub const ENV_PREFIX: &str = "AUTH";

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: SecretString,
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

fn default_service_name() -> String {
    "auth-core".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_issuer() -> String {
    "auth-core".to_string()
}

impl AuthConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: AuthConfig = core_config::load(ENV_PREFIX)?;

        if config.jwt.issuer.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "jwt.issuer",
                reason: "must not be empty".to_string(),
            });
        }

        Ok(config)
    }
}

impl AuthConfig {
    /// Install the JSON tracing subscriber at the configured level.
    pub fn init_tracing(&self) -> Result<(), TryInitError> {
        observability::init_tracing(&self.service_name, &self.log_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::config::{Config, File, FileFormat};
    use secrecy::ExposeSecret;

    fn parse(toml: &str) -> AuthConfig {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("parse config")
    }

    #[test]
    fn test_defaults_apply_when_only_secret_is_set() {
        let config = parse("[jwt]\nsecret = \"s3cret\"\n");

        assert_eq!(config.service_name, "auth-core");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.jwt.issuer, "auth-core");
        assert_eq!(config.jwt.secret.expose_secret(), "s3cret");
    }

    #[test]
    fn test_secret_is_redacted_in_debug_output() {
        let config = parse("[jwt]\nsecret = \"s3cret\"\nissuer = \"posts\"\n");
        assert!(!format!("{:?}", config).contains("s3cret"));
    }
}
