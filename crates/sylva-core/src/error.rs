pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("topic tree JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object for the topic tree root, found {found}")]
    NotAnObject { found: &'static str },

    #[error("input text is empty")]
    EmptyInput,

    #[error("{stage} provider call failed: {message}")]
    Provider { stage: Stage, message: String },
}

/// Pipeline stage that talked to an external provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Transcription,
    Extraction,
    Validation,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Transcription => f.write_str("transcription"),
            Stage::Extraction => f.write_str("extraction"),
            Stage::Validation => f.write_str("validation"),
        }
    }
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
