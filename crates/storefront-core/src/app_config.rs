use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Root of the catalog REST API; listing paths are joined onto it.
    pub api_base_url: String,
    pub log_level: String,
    pub brand_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Page size used by the listing fetches when the caller does not pass one.
    pub page_size: u32,
}
