use crate::prompt::{
    DEFAULT_EXTRACTION_PROMPT, DEFAULT_VALIDATION_PROMPT, TRANSCRIPTION_INSTRUCTION,
};
use serde_json::{Map, Value, json};

pub const DEFAULT_EXTRACTION_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_VALIDATION_MODEL: &str = "gemini-2.5-flash";

/// JSON-backed configuration addressed by dotted paths (`layout.levelSpacing`).
///
/// Unknown keys are kept as-is so hosts can stash their own settings next to ours.
#[derive(Debug, Clone, PartialEq)]
pub struct SylvaConfig(Value);

impl Default for SylvaConfig {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl SylvaConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Built-in defaults for every key this workspace reads.
    pub fn defaults() -> Self {
        Self(json!({
            "layout": {
                "nodeSlotWidth": 180.0,
                "levelSpacing": 150.0,
                "nodeWidth": 140.0,
                "nodeHeight": 60.0
            },
            "extraction": {
                "model": DEFAULT_EXTRACTION_MODEL
            },
            "validation": {
                "enabled": true,
                "model": DEFAULT_VALIDATION_MODEL
            },
            "prompts": {
                "extraction": DEFAULT_EXTRACTION_PROMPT,
                "validation": DEFAULT_VALIDATION_PROMPT,
                "transcription": TRANSCRIPTION_INSTRUCTION
            }
        }))
    }

    /// Defaults with `overrides` deep-merged on top.
    pub fn with_overrides(overrides: &Value) -> Self {
        let mut cfg = Self::defaults();
        cfg.deep_merge(overrides);
        cfg
    }

    fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.get(dotted_path)?.as_bool()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path)?.as_f64()
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }
}

/// Objects merge key by key; any other incoming value replaces what was there.
fn deep_merge_value(base: &mut Value, incoming: &Value) {
    if let (Value::Object(base_map), Value::Object(incoming_map)) = (&mut *base, incoming) {
        for (key, value) in incoming_map {
            match base_map.get_mut(key) {
                Some(existing) => deep_merge_value(existing, value),
                None => {
                    base_map.insert(key.clone(), value.clone());
                }
            }
        }
        return;
    }
    *base = incoming.clone();
}
