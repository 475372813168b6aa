use serde::{Deserialize, Serialize};

/// Configuration from greeter.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GreeterConfig {
    #[serde(default)]
    pub greeting: GreetingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreetingConfig {
    /// Active language. When unset, `default_language` applies.
    #[serde(default)]
    pub language: Option<String>,
    /// Default: see src/templates/greeter.toml
    #[serde(default = "default_language")]
    pub default_language: String,
    /// Default: see src/templates/greeter.toml
    #[serde(default = "default_max_recent")]
    pub max_recent: usize,
    /// Default: see src/templates/greeter.toml
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    /// Default: see src/templates/greeter.toml
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        GreetingConfig {
            language: None,
            default_language: default_language(),
            max_recent: default_max_recent(),
            max_attempts: default_max_attempts(),
            interval_secs: default_interval_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog file, relative to the directory holding greeter.toml.
    /// If absent, the built-in catalog is used.
    #[serde(default)]
    pub path: Option<String>,
}

/// Default: see src/templates/greeter.toml
fn default_language() -> String {
    "en".to_string()
}

/// Default: see src/templates/greeter.toml
fn default_max_recent() -> usize {
    8
}

/// Default: see src/templates/greeter.toml
fn default_max_attempts() -> usize {
    10
}

/// Default: see src/templates/greeter.toml
fn default_interval_secs() -> u64 {
    6
}
