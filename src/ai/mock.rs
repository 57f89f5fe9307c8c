//! Queue-based mock service clients for tests.
//!
//! Responses are consumed in order and cycle when exhausted. Both mocks are
//! `Clone` so a test can keep a probe handle while the orchestrator owns the
//! boxed service.

use super::{ChatService, ImageGenerationService, ReferenceImage};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockChatClient {
    responses: Arc<Mutex<Vec<std::result::Result<String, String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(Ok(response));
        self
    }

    pub fn with_error(self, message: String) -> Self {
        self.responses.lock().unwrap().push(Err(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Prompts received so far, in call order.
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatService for MockChatClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.prompts.lock().unwrap().push(prompt.to_string());

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default mock response
            return Ok("a clean product scene".to_string());
        }

        let index = (*count - 1) % responses.len();
        match &responses[index] {
            Ok(response) => Ok(response.clone()),
            Err(message) => Err(Error::AiProvider(message.clone())),
        }
    }
}

#[derive(Clone)]
pub struct MockImageClient {
    responses: Arc<Mutex<Vec<std::result::Result<Vec<u8>, String>>>>,
    references: Arc<Mutex<Vec<Option<String>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            references: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_image_response(self, response: Vec<u8>) -> Self {
        self.responses.lock().unwrap().push(Ok(response));
        self
    }

    pub fn with_error(self, message: String) -> Self {
        self.responses.lock().unwrap().push(Err(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// MIME type of the reference received by each call, in call order;
    /// `None` for calls made without a reference image.
    pub fn received_references(&self) -> Vec<Option<String>> {
        self.references.lock().unwrap().clone()
    }
}

impl Default for MockImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageClient {
    async fn generate_image(
        &self,
        _prompt: &str,
        reference: Option<&ReferenceImage>,
    ) -> Result<Vec<u8>> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.references
            .lock()
            .unwrap()
            .push(reference.map(|r| r.mime_type.clone()));

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Return a tiny valid PNG as default
            return Ok(vec![
                0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
                0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
                0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1 pixel
                0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49,
                0x44, 0x41, // IDAT chunk
                0x54, 0x08, 0x99, 0x63, 0xF8, 0xCF, 0xC0, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0xE2,
                0x25, 0x00, 0xBC, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, // IEND chunk
                0x44, 0xAE, 0x42, 0x60, 0x82,
            ]);
        }

        let index = (*count - 1) % responses.len();
        match &responses[index] {
            Ok(response) => Ok(response.clone()),
            Err(message) => Err(Error::AiProvider(message.clone())),
        }
    }
}
