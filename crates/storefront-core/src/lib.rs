pub mod app_config;
pub mod brand;
pub mod config;
pub mod product;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use brand::{load_brand, BrandConfig, BrandOverrides, BrandTemplate, ThemeColors};
pub use config::{load_app_config, load_app_config_from_env};
pub use product::{Category, Product};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read brand file {path}: {source}")]
    BrandFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse brand file: {0}")]
    BrandFileParse(#[from] serde_yaml::Error),

    #[error("brand validation failed: {0}")]
    Validation(String),
}
