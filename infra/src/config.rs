//! Configuration loading
//!
//! Layers, lowest priority first:
//! 1. Built-in defaults for the environment
//! 2. An optional `config/<environment>` file (TOML, JSON or YAML)
//! 3. `GG__<SECTION>__<KEY>` environment variables
//!
//! A `.env` file, if present, is loaded into the environment beforehand.

use ::config::{Config, File};
use gg_shared::config::{AppConfig, Environment, LoggingConfig};

use crate::InfrastructureError;

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "GG";

/// Load configuration for the environment named by `ENVIRONMENT`
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok();
    let environment = Environment::from_env();
    load_config_from(environment, environment.config_file())
}

/// Load configuration using `file_stem` as the optional file layer
pub fn load_config_from(
    environment: Environment,
    file_stem: &str,
) -> Result<AppConfig, InfrastructureError> {
    let defaults = match environment {
        Environment::Production => AppConfig::production(),
        Environment::Development => AppConfig::development(),
        Environment::Staging => AppConfig {
            environment,
            logging: LoggingConfig::for_environment(environment),
            ..AppConfig::default()
        },
    };

    let config = Config::builder()
        .add_source(Config::try_from(&defaults)?)
        .add_source(File::with_name(file_stem).required(false))
        .add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    tracing::debug!(
        environment = %app_config.environment,
        file = file_stem,
        "Configuration loaded"
    );
    Ok(app_config)
}
