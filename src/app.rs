//! Orchestration of one ad-generation request.
//!
//! Drives build prompt → call text service → parse → acquire one image per
//! idea (concurrently) → merge, switching to the deterministic fallback
//! templates whenever the text service fails or returns unusable output.

use crate::acquirer::ImageAcquirer;
use crate::ai::{
    ChatService, GeminiChatClient, GeminiImageClient, ImageGenerationService, OpenAiChatClient,
};
use crate::fallback;
use crate::models::{
    AdIdea, AiProvider, Config, DraftIdea, FormInput, GenerationResult, ImagePreference,
};
use crate::{parser, prompts, Error, Result};
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Coordinates the text and image services for ad-idea generation.
pub struct AdGenerator {
    chat: Box<dyn ChatService>,
    image_gen: Box<dyn ImageGenerationService>,
}

/// Injectable service bundle used to construct [`AdGenerator`] in
/// tests/harnesses.
pub struct GeneratorServices {
    pub chat: Box<dyn ChatService>,
    pub image_gen: Box<dyn ImageGenerationService>,
}

impl AdGenerator {
    /// Build a generator from concrete service dependencies.
    ///
    /// This is primarily useful for integration tests and local harnesses
    /// that need to inject mocks.
    pub fn with_services(services: GeneratorServices) -> Self {
        Self {
            chat: services.chat,
            image_gen: services.image_gen,
        }
    }

    /// Construct a generator from environment configuration
    /// (`Config::from_env`).
    pub fn new() -> Result<Self> {
        let config = Config::from_env()?;

        // Reuse one HTTP connection pool across provider clients.
        let http_client = reqwest::Client::new();

        let gemini_api_key = config
            .gemini_api_key
            .clone()
            .expect("GEMINI_API_KEY validated in Config::from_env");

        let chat: Box<dyn ChatService> = match config.chat_provider {
            AiProvider::OpenAi => {
                info!("Chat provider: OpenAI (model: {})", config.chat_model);
                Box::new(OpenAiChatClient::new_with_client(
                    config
                        .openai_api_key
                        .clone()
                        .expect("OPENAI_API_KEY validated in Config::from_env"),
                    config.chat_model.clone(),
                    http_client.clone(),
                ))
            }
            AiProvider::Gemini => {
                info!("Chat provider: Gemini (model: {})", config.chat_model);
                Box::new(GeminiChatClient::new_with_client(
                    gemini_api_key.clone(),
                    config.chat_model.clone(),
                    http_client.clone(),
                ))
            }
        };

        info!("Image provider: Gemini (model: {})", config.image_model);
        let image_gen = Box::new(GeminiImageClient::new_with_client(
            gemini_api_key,
            config.image_model.clone(),
            http_client,
        ));

        Ok(Self::with_services(GeneratorServices { chat, image_gen }))
    }

    /// Generate exactly 3 ad ideas for a form submission.
    ///
    /// Never fails for business reasons: a text-service failure routes to
    /// the fallback templates and image failures degrade to absent images.
    /// Only invariant violations surface as errors.
    pub async fn generate_ad_ideas(&self, form: &FormInput) -> Result<GenerationResult> {
        let request_id = Uuid::new_v4();
        info!(
            "[{}] Generating ad ideas for '{}' on {}",
            request_id, form.product, form.platform
        );

        if form.preferred_image_type != ImagePreference::Ai {
            // Stock-photo retrieval is accepted from the form but not
            // implemented; all images come from the AI path.
            debug!(
                "[{}] Image preference {:?} requested, using AI generation",
                request_id, form.preferred_image_type
            );
        }

        let drafts = match self.request_drafts(form).await {
            Ok(drafts) => {
                info!("[{}] Parsed 3 ideas from text service", request_id);
                drafts
            }
            Err(e) => {
                warn!(
                    "[{}] Text service unusable ({}), switching to fallback templates",
                    request_id, e
                );
                fallback::generate_drafts(form)
            }
        };

        let acquirer = ImageAcquirer::new(self.chat.as_ref(), self.image_gen.as_ref());
        let [first, second, third] = drafts;

        // Reference photo anchors only the first idea. Results are matched
        // back by position, not arrival time.
        let (image_0, image_1, image_2) = tokio::join!(
            acquirer.acquire(&first, form.product_image.as_deref()),
            acquirer.acquire(&second, None),
            acquirer.acquire(&third, None),
        );

        let populated = [&image_0, &image_1, &image_2]
            .iter()
            .filter(|url| url.is_some())
            .count();
        info!("[{}] Acquired {}/3 images", request_id, populated);

        Ok(GenerationResult {
            ideas: [
                AdIdea::from_draft(first, image_0),
                AdIdea::from_draft(second, image_1),
                AdIdea::from_draft(third, image_2),
            ],
            generated_at: Utc::now(),
        })
    }

    async fn request_drafts(&self, form: &FormInput) -> Result<[DraftIdea; 3]> {
        let prompt = prompts::build_batch_prompt(form);
        let raw = self.chat.complete(&prompt).await?;
        debug!("Text service returned {} chars", raw.len());

        let drafts = parser::parse_ideas(&raw, &form.product)?;
        drafts
            .try_into()
            .map_err(|_| Error::Invariant("Parser returned a non-3-element batch".to_string()))
    }
}
