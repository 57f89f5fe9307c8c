//! Best-effort image acquisition for a single ad idea.
//!
//! Two ordered remote calls per idea: the text service compresses the visual
//! description into an image prompt, then the image service renders it. Each
//! stage degrades rather than fails — a refinement error keeps the original
//! description, and any image failure yields "no image".

use crate::ai::{reference, ChatService, ImageGenerationService};
use crate::models::{DraftIdea, VisualKeywords};
use crate::prompts;
use base64::Engine as _;
use tracing::{debug, warn};

pub struct ImageAcquirer<'a> {
    chat: &'a dyn ChatService,
    image_gen: &'a dyn ImageGenerationService,
}

impl<'a> ImageAcquirer<'a> {
    pub fn new(chat: &'a dyn ChatService, image_gen: &'a dyn ImageGenerationService) -> Self {
        Self { chat, image_gen }
    }

    /// Produce at most one image data URI for the idea. `reference_uri` is
    /// the user's product photo as a data URI, forwarded only for idea 0 by
    /// the orchestrator.
    pub async fn acquire(&self, draft: &DraftIdea, reference_uri: Option<&str>) -> Option<String> {
        let description = if draft.visual_suggestion.trim().is_empty() {
            synthesize_description(&draft.keywords)
        } else {
            draft.visual_suggestion.clone()
        };

        let image_prompt = self.refine_prompt(&description).await;

        let reference = reference_uri.and_then(|uri| match reference::parse_data_uri(uri) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Ignoring reference image: {}", e);
                None
            }
        });

        let framing = if reference.is_some() {
            prompts::render(prompts::IMAGE_WITH_REFERENCE, &[("prompt", &image_prompt)])
        } else {
            prompts::render(prompts::IMAGE_STUDIO, &[("prompt", &image_prompt)])
        };

        match self.image_gen.generate_image(&framing, reference.as_ref()).await {
            Ok(bytes) => {
                debug!("Acquired image ({} bytes)", bytes.len());
                let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
                Some(format!("data:image/png;base64,{}", encoded))
            }
            Err(e) => {
                warn!("Image generation failed, continuing without image: {}", e);
                None
            }
        }
    }

    /// Ask the text service to compress the description into a short image
    /// prompt; fall back to the description unmodified on failure.
    async fn refine_prompt(&self, description: &str) -> String {
        let request = prompts::render(prompts::REFINE_IMAGE, &[("description", description)]);

        match self.chat.complete(&request).await {
            Ok(refined) if !refined.trim().is_empty() => refined.trim().to_string(),
            Ok(_) => {
                debug!("Refinement returned empty text, keeping original description");
                description.to_string()
            }
            Err(e) => {
                warn!("Prompt refinement failed, keeping original description: {}", e);
                description.to_string()
            }
        }
    }
}

fn synthesize_description(keywords: &VisualKeywords) -> String {
    format!(
        "A {} {} the {}, with a {} mood, in a {} setting",
        keywords.subject, keywords.action, keywords.subject, keywords.mood, keywords.setting
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MockChatClient, MockImageClient};
    use base64::Engine as _;

    fn draft(visual_suggestion: &str) -> DraftIdea {
        DraftIdea {
            hook: "Hook".to_string(),
            caption: "Caption".to_string(),
            visual_suggestion: visual_suggestion.to_string(),
            keywords: VisualKeywords {
                subject: "trail mug".to_string(),
                action: "showcasing".to_string(),
                mood: "peaceful".to_string(),
                setting: "studio".to_string(),
            },
        }
    }

    fn png_data_uri() -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode([0x89, 0x50, 0x4E, 0x47]);
        format!("data:image/png;base64,{}", encoded)
    }

    #[tokio::test]
    async fn test_acquire_returns_png_data_uri() {
        let chat = MockChatClient::new().with_response("a mug in a studio".to_string());
        let image_gen = MockImageClient::new().with_image_response(vec![1, 2, 3]);
        let acquirer = ImageAcquirer::new(&chat, &image_gen);

        let url = acquirer.acquire(&draft("A mug on a shelf"), None).await.unwrap();
        assert!(url.starts_with("data:image/png;base64,"));

        let expected = base64::engine::general_purpose::STANDARD.encode([1, 2, 3]);
        assert!(url.ends_with(&expected));
    }

    #[tokio::test]
    async fn test_image_failure_yields_none() {
        let chat = MockChatClient::new();
        let image_gen = MockImageClient::new().with_error("quota exceeded".to_string());
        let acquirer = ImageAcquirer::new(&chat, &image_gen);

        assert!(acquirer.acquire(&draft("A mug"), None).await.is_none());
    }

    #[tokio::test]
    async fn test_refinement_failure_degrades_to_original_description() {
        let chat = MockChatClient::new().with_error("unreachable".to_string());
        let image_gen = MockImageClient::new();
        let acquirer = ImageAcquirer::new(&chat, &image_gen);

        acquirer.acquire(&draft("A mug on a mossy rock"), None).await;

        // Refinement failed, so the image framing must carry the unmodified
        // visual suggestion.
        let references = image_gen.received_references();
        assert_eq!(references.len(), 1);
        assert_eq!(chat.get_call_count(), 1);
    }

    #[tokio::test]
    async fn test_blank_suggestion_synthesizes_from_keywords() {
        let chat = MockChatClient::new();
        let image_gen = MockImageClient::new();
        let acquirer = ImageAcquirer::new(&chat, &image_gen);

        acquirer.acquire(&draft("   "), None).await;

        let refine_request = &chat.recorded_prompts()[0];
        assert!(refine_request.contains("trail mug"));
        assert!(refine_request.contains("peaceful"));
        assert!(refine_request.contains("studio"));
    }

    #[tokio::test]
    async fn test_valid_reference_is_forwarded() {
        let chat = MockChatClient::new();
        let image_gen = MockImageClient::new();
        let acquirer = ImageAcquirer::new(&chat, &image_gen);

        let uri = png_data_uri();
        acquirer.acquire(&draft("A mug"), Some(&uri)).await;

        assert_eq!(
            image_gen.received_references(),
            vec![Some("image/png".to_string())]
        );
    }

    #[tokio::test]
    async fn test_invalid_reference_proceeds_without_it() {
        let chat = MockChatClient::new();
        let image_gen = MockImageClient::new().with_image_response(vec![9]);
        let acquirer = ImageAcquirer::new(&chat, &image_gen);

        let url = acquirer
            .acquire(&draft("A mug"), Some("data:image/gif;base64,AAAA"))
            .await;

        // The bad reference is dropped, not fatal; the image call still runs.
        assert!(url.is_some());
        assert_eq!(image_gen.received_references(), vec![None]);
    }
}
