//! Text (or audio) to topic tree.
//!
//! Two chat-completion round trips: a first-draft extraction, then a validation pass that may
//! correct the draft. A failed validation is not an error; the draft is kept.

use crate::config::{DEFAULT_EXTRACTION_MODEL, DEFAULT_VALIDATION_MODEL, SylvaConfig};
use crate::diagnostics::{Diagnostic, disambiguate_ids};
use crate::model::TopicNode;
use crate::parse::{ParsedTree, parse_topic_tree};
use crate::prompt::{
    DEFAULT_EXTRACTION_PROMPT, DEFAULT_VALIDATION_PROMPT, TRANSCRIPTION_INSTRUCTION,
    render_template,
};
use crate::provider::{ChatCompletion, DEFAULT_AUDIO_MIME_TYPE, Transcriber};
use crate::{Error, Result, Stage};

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub extraction_model: String,
    pub validation_model: String,
    pub validate: bool,
    /// Template with an `${inputText}` placeholder.
    pub extraction_prompt: String,
    /// Template with `${originalText}` and `${topicTree}` placeholders.
    pub validation_prompt: String,
    /// Sent to the transcriber together with the audio.
    pub transcription_instruction: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            extraction_model: DEFAULT_EXTRACTION_MODEL.to_string(),
            validation_model: DEFAULT_VALIDATION_MODEL.to_string(),
            validate: true,
            extraction_prompt: DEFAULT_EXTRACTION_PROMPT.to_string(),
            validation_prompt: DEFAULT_VALIDATION_PROMPT.to_string(),
            transcription_instruction: TRANSCRIPTION_INSTRUCTION.to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn from_config(cfg: &SylvaConfig) -> Self {
        let defaults = Self::default();
        let non_blank = |key: &str| {
            cfg.get_str(key)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
        };
        Self {
            extraction_model: non_blank("extraction.model").unwrap_or(defaults.extraction_model),
            validation_model: non_blank("validation.model").unwrap_or(defaults.validation_model),
            validate: cfg.get_bool("validation.enabled").unwrap_or(defaults.validate),
            extraction_prompt: non_blank("prompts.extraction")
                .unwrap_or(defaults.extraction_prompt),
            validation_prompt: non_blank("prompts.validation")
                .unwrap_or(defaults.validation_prompt),
            transcription_instruction: non_blank("prompts.transcription")
                .unwrap_or(defaults.transcription_instruction),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub tree: TopicNode,
    /// `true` when the validation pass produced the final tree.
    pub validated: bool,
    /// Repairs made while parsing the final tree.
    pub diagnostics: Vec<Diagnostic>,
    /// Nodes whose duplicate id was rewritten to keep diagram identities unique.
    pub renamed_ids: usize,
}

#[derive(Debug, Clone)]
pub struct Pipeline<C> {
    provider: C,
    config: PipelineConfig,
}

impl<C: ChatCompletion> Pipeline<C> {
    pub fn new(provider: C, config: PipelineConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn provider(&self) -> &C {
        &self.provider
    }

    /// Extracts (and, if enabled, validates) a topic tree from `text`.
    pub async fn extract(&self, text: &str) -> Result<Extraction> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyInput);
        }

        let prompt = render_template(&self.config.extraction_prompt, &[("inputText", text)]);
        let reply = self
            .provider
            .complete(&self.config.extraction_model, &prompt)
            .await
            .map_err(|e| Error::Provider {
                stage: Stage::Extraction,
                message: e.message,
            })?;
        let draft = parse_topic_tree(&reply)?;
        tracing::debug!(
            nodes = draft.tree.node_count(),
            model = %self.config.extraction_model,
            "extracted draft topic tree"
        );

        let (mut parsed, validated) = if self.config.validate {
            let outcome = self.validate(text, &draft.tree).await;
            match outcome {
                Ok(parsed) => (parsed, true),
                Err(err) => {
                    tracing::warn!(error = %err, "validation failed; keeping the draft tree");
                    (draft, false)
                }
            }
        } else {
            (draft, false)
        };

        let renamed_ids = disambiguate_ids(&mut parsed.tree);
        if renamed_ids > 0 {
            tracing::warn!(renamed_ids, "duplicate topic ids were renamed");
        }

        Ok(Extraction {
            tree: parsed.tree,
            validated,
            diagnostics: parsed.diagnostics,
            renamed_ids,
        })
    }

    async fn validate(&self, original_text: &str, draft: &TopicNode) -> Result<ParsedTree> {
        let draft_json = serde_json::to_string_pretty(draft)?;
        let prompt = render_template(
            &self.config.validation_prompt,
            &[("originalText", original_text), ("topicTree", draft_json.as_str())],
        );
        let reply = self
            .provider
            .complete(&self.config.validation_model, &prompt)
            .await
            .map_err(|e| Error::Provider {
                stage: Stage::Validation,
                message: e.message,
            })?;
        parse_topic_tree(&reply)
    }

    /// Transcribes `audio` and extracts a topic tree from the transcript.
    ///
    /// An empty `mime_type` is treated as WAV. Returns the transcript alongside the extraction so
    /// hosts can show it to the user.
    pub async fn transcribe_and_extract<T: Transcriber>(
        &self,
        transcriber: &T,
        audio: &[u8],
        mime_type: &str,
    ) -> Result<(String, Extraction)> {
        let mime_type = match mime_type.trim() {
            "" => DEFAULT_AUDIO_MIME_TYPE,
            m => m,
        };
        let transcript = transcriber
            .transcribe(audio, mime_type, &self.config.transcription_instruction)
            .await
            .map_err(|e| Error::Provider {
                stage: Stage::Transcription,
                message: e.message,
            })?;
        let extraction = self.extract(&transcript).await?;
        Ok((transcript, extraction))
    }
}
