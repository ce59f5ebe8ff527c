use serde::{Deserialize, Serialize};

/// Configuration from config.toml in the data directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

/// Settings for the refinement endpoint. The API key itself is never
/// stored here; it comes from the `BB2_API_KEY` environment variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            url: default_api_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Default: see src/cli/handlers/init.rs config template
fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

/// Default: see src/cli/handlers/init.rs config template
fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

/// Default: see src/cli/handlers/init.rs config template
fn default_temperature() -> f32 {
    0.7
}

/// Default: see src/cli/handlers/init.rs config template
fn default_max_tokens() -> u32 {
    512
}
