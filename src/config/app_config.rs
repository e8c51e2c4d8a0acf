use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Secret used to sign and verify HS256 tokens
    pub jwt_secret: String,
    /// Issuer claim stamped into and required of every token
    pub jwt_issuer: String,
    /// Token lifetime in seconds
    pub token_expiration_secs: u64,
    /// Permissions minted into every token at login
    pub permissions: Vec<String>,
    pub password: PasswordConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    pub scheme: PasswordScheme,
    /// Salt appended to the password before the first SHA-512 round
    /// (sha512 scheme only)
    pub salt: String,
    /// Pepper appended to the first digest before the second round
    /// (sha512 scheme only)
    pub pepper: String,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    #[default]
    Argon2,
    Sha512,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path of the serialized pipeline artifact
    pub artifact_path: String,
    /// Path of the business-parameter sidecar
    pub params_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/churn_gateway".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me-in-production".to_string(),
            jwt_issuer: "churn-gateway".to_string(),
            token_expiration_secs: 300,
            permissions: vec!["model:predict".to_string()],
            password: PasswordConfig::default(),
        }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            scheme: PasswordScheme::default(),
            salt: String::new(),
            pepper: String::new(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            artifact_path: "data/model.json".to_string(),
            params_path: "data/artifact.json".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.auth.token_expiration_secs, 300);
        assert_eq!(config.auth.permissions, vec!["model:predict".to_string()]);
        assert_eq!(config.auth.password.scheme, PasswordScheme::Argon2);
        assert_eq!(config.model.artifact_path, "data/model.json");
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"server": {"port": 9000}, "auth": {"jwt_issuer": "acme"}}"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.jwt_issuer, "acme");
        assert_eq!(config.auth.token_expiration_secs, 300);
    }

    #[test]
    fn test_password_scheme_parsing() {
        let config: PasswordConfig =
            serde_json::from_str(r#"{"scheme": "sha512", "salt": "s", "pepper": "p"}"#).unwrap();

        assert_eq!(config.scheme, PasswordScheme::Sha512);
        assert_eq!(config.salt, "s");
    }
}
