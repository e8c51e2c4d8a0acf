//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, DatabaseConfig, LogFormat, LoggingConfig, ModelConfig, PasswordConfig,
    PasswordScheme, ServerConfig,
};
