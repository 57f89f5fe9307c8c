//! AI service integration for text and image generation
//!
//! Defines the service traits the orchestrator depends on and re-exports the
//! Gemini/OpenAI provider clients plus the mock clients used in tests.

pub mod gemini;
pub mod mock;
pub mod openai;
pub mod reference;

pub use gemini::{GeminiChatClient, GeminiImageClient};
pub use mock::{MockChatClient, MockImageClient};
pub use openai::OpenAiChatClient;
pub use reference::ReferenceImage;

use crate::Result;
use async_trait::async_trait;

/// Text-generation collaborator. Used once per request for the 3-idea batch
/// and once per idea for image-prompt refinement.
#[async_trait]
pub trait ChatService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Image-generation collaborator. Returns raw image bytes; the acquirer is
/// responsible for encoding them for the caller.
#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    async fn generate_image(
        &self,
        prompt: &str,
        reference: Option<&ReferenceImage>,
    ) -> Result<Vec<u8>>;
}
