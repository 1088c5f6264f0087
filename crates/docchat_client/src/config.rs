/// Environment variable that overrides the backend address.
pub const BACKEND_URL_ENV: &str = "DOCCHAT_BACKEND_URL";

/// Address used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Where the backend lives. Deliberately minimal: no timeouts and no auth
/// are configured for this client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Read the backend address from the environment, falling back to the
    /// local default when unset or blank.
    pub fn from_env() -> Self {
        match std::env::var(BACKEND_URL_ENV) {
            Ok(value) if !value.trim().is_empty() => Self::new(value.trim()),
            _ => Self::default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn chat_stream_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    pub fn chat_text_url(&self) -> String {
        format!("{}/chat_text", self.base_url)
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.base_url)
    }
}
