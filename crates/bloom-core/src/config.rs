use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::export::ExportFormat;
use crate::model::Session;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct BloomConfig {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub export: ExportConfig,
}

impl BloomConfig {
    /// The session carried into the client, if a token is configured.
    pub fn session(&self) -> Option<Session> {
        self.auth
            .token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| Session::new(token, self.auth.user.clone()))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    pub token: Option<String>,
    pub user: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,
    pub dir: Option<PathBuf>,
}
