//! Server configuration.

use std::time::Duration;

use crate::infrastructure::translator::HttpTranslatorConfig;

/// Runtime configuration for the relay server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to bind to (0 picks an ephemeral port)
    pub port: u16,
    /// Base URL of the translation service
    pub translator_url: String,
    /// Upper bound for a single translation call
    pub translation_timeout: Duration,
}

impl ServerConfig {
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 8080;
    pub const DEFAULT_TRANSLATION_TIMEOUT_MS: u64 = 10_000;

    pub fn translator_config(&self) -> HttpTranslatorConfig {
        HttpTranslatorConfig::new(self.translator_url.clone(), self.translation_timeout)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_string(),
            port: Self::DEFAULT_PORT,
            translator_url: HttpTranslatorConfig::DEFAULT_BASE_URL.to_string(),
            translation_timeout: Duration::from_millis(Self::DEFAULT_TRANSLATION_TIMEOUT_MS),
        }
    }
}
