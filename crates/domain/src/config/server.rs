use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_web_port")]
    pub web_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// Value required in the `Authorization` header. Unset disables the check.
    pub api_key: Option<String>,

    /// Credential required by blocklist updates. Unset rejects every update.
    pub supermod_password: Option<String>,
}

fn default_web_port() -> u16 {
    8000
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            web_port: default_web_port(),
            bind_address: default_bind_address(),
            cors_allowed_origins: default_cors_origins(),
            api_key: None,
            supermod_password: None,
        }
    }
}
