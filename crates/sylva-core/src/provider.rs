//! Seams to the external speech-to-text and chat-completion services.
//!
//! The traits return plain futures so any executor (or none, via `block_on`) can drive them.

use std::future::Future;

pub const DEFAULT_AUDIO_MIME_TYPE: &str = "audio/wav";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub trait ChatCompletion {
    /// Sends a single-turn prompt to `model` and returns the text of the reply.
    fn complete(
        &self,
        model: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;
}

pub trait Transcriber {
    /// Turns raw audio bytes of the given MIME type into text.
    ///
    /// `instruction` is the text prompt sent alongside the audio to multimodal models.
    fn transcribe(
        &self,
        audio: &[u8],
        mime_type: &str,
        instruction: &str,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;
}

impl<T: ChatCompletion + ?Sized> ChatCompletion for &T {
    fn complete(
        &self,
        model: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send {
        (**self).complete(model, prompt)
    }
}
