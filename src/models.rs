//! Data models and structures
//!
//! Defines the core data structures for form input, ad ideas, visual
//! keywords, and service configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target advertising platform selected on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    Facebook,
    Instagram,
    WhatsApp,
    Other,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Facebook => write!(f, "Facebook"),
            Platform::Instagram => write!(f, "Instagram"),
            Platform::WhatsApp => write!(f, "WhatsApp"),
            Platform::Other => write!(f, "Other"),
        }
    }
}

/// User-facing image sourcing preference. Only `ai` is exercised by the
/// acquisition path today; `stock` and `mixed` are carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePreference {
    Ai,
    Stock,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    Ai,
    Stock,
}

/// One submitted generation request. Immutable once built by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub product: String,
    pub customers: String,
    pub unique_feature: String,
    pub platform: Platform,
    /// Optional product photo as a base64 data URI, anchoring idea 0's image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
    pub preferred_image_type: ImagePreference,
}

/// Normalized subject/action/mood/setting descriptors driving image
/// generation. All fields are non-empty, lowercase, and trimmed after
/// normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualKeywords {
    pub subject: String,
    pub action: String,
    pub mood: String,
    pub setting: String,
}

/// An ad idea before image acquisition: parser and fallback output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftIdea {
    pub hook: String,
    pub caption: String,
    pub visual_suggestion: String,
    pub keywords: VisualKeywords,
}

/// A complete ad idea as returned to the caller. An absent `image_url` is a
/// valid, displayable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdIdea {
    pub hook: String,
    pub caption: String,
    pub visual_suggestion: String,
    pub keywords: VisualKeywords,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub image_type: ImageType,
}

impl AdIdea {
    /// Merge a draft with its (possibly absent) acquired image. The core
    /// always takes the AI-generation path, so `image_type` is always `Ai`.
    pub fn from_draft(draft: DraftIdea, image_url: Option<String>) -> Self {
        Self {
            hook: draft.hook,
            caption: draft.caption,
            visual_suggestion: draft.visual_suggestion,
            keywords: draft.keywords,
            image_url,
            image_type: ImageType::Ai,
        }
    }
}

/// Exactly three ad ideas, in the order they map to the "Ad 1/2/3" display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub ideas: [AdIdea; 3],
    pub generated_at: DateTime<Utc>,
}

/// Provider selection for the text-generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProvider {
    OpenAi,
    Gemini,
}

impl AiProvider {
    fn parse(value: &str) -> crate::Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "openai" => Ok(AiProvider::OpenAi),
            "gemini" => Ok(AiProvider::Gemini),
            other => Err(crate::Error::Generic(format!(
                "Unknown CHAT_PROVIDER '{}' (expected 'openai' or 'gemini')",
                other
            ))),
        }
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub chat_provider: AiProvider,
    pub chat_model: String,
    pub image_model: String,
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let chat_provider = match std::env::var("CHAT_PROVIDER") {
            Ok(value) => AiProvider::parse(&value)?,
            Err(_) => AiProvider::Gemini,
        };

        let config = Self {
            chat_provider,
            chat_model: std::env::var("CHAT_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            image_model: std::env::var("IMAGE_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash-image".to_string()),
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
        };

        // Image generation is always Gemini-backed, so the key is required
        // regardless of the chat provider.
        if config.gemini_api_key.is_none() {
            return Err(crate::Error::Generic("GEMINI_API_KEY not set".to_string()));
        }
        if config.chat_provider == AiProvider::OpenAi && config.openai_api_key.is_none() {
            return Err(crate::Error::Generic(
                "OPENAI_API_KEY not set but CHAT_PROVIDER is 'openai'".to_string(),
            ));
        }

        Ok(config)
    }
}
