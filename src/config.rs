use std::env;

use anyhow::{Context, Result};

use crate::constants;

/// Runtime configuration for the generative backend. Built once at startup
/// and shared through axum state, so a missing API key fails the process at
/// boot instead of surfacing per request.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub api_base: String,
    pub chat_model: String,
    pub image_model: String,
    /// When false the image-generation step is skipped entirely and concepts
    /// keep the placeholder path.
    pub enable_images: bool,
}

impl AppConfig {
    /// Read configuration from the process environment. `OPENAI_API_KEY` is
    /// required; everything else has a default.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .context(
                "OPENAI_API_KEY is not set; the design assistant cannot reach the generative API without it",
            )?;

        let enable_images = env::var("FANFORGE_ENABLE_IMAGES")
            .map(|value| value != "0" && !value.eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        Ok(Self {
            api_key,
            api_base: normalize_base(env_or("OPENAI_API_BASE", constants::DEFAULT_API_BASE)),
            chat_model: env_or("FANFORGE_CHAT_MODEL", constants::DEFAULT_CHAT_MODEL),
            image_model: env_or("FANFORGE_IMAGE_MODEL", constants::DEFAULT_IMAGE_MODEL),
            enable_images,
        })
    }

    /// Configuration without environment reads, for tests and embedding.
    /// Image generation starts disabled; flip `enable_images` to opt in.
    pub fn new(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: normalize_base(api_base.into()),
            chat_model: constants::DEFAULT_CHAT_MODEL.to_string(),
            image_model: constants::DEFAULT_IMAGE_MODEL.to_string(),
            enable_images: false,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn normalize_base(base: String) -> String {
    base.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_applies_defaults_and_trims_base() {
        let config = AppConfig::new("key", "http://127.0.0.1:1234/");
        assert_eq!(config.api_base, "http://127.0.0.1:1234");
        assert_eq!(config.chat_model, constants::DEFAULT_CHAT_MODEL);
        assert_eq!(config.image_model, constants::DEFAULT_IMAGE_MODEL);
        assert!(!config.enable_images);
    }
}
