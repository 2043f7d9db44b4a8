use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load engine configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Engine configuration is invalid: {0}")]
    ValidationError(String),
}
