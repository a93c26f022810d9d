//! Lenient ingestion of model-produced topic trees.
//!
//! Chat-completion output is untrusted: it may be wrapped in Markdown fences, prefixed with prose,
//! or missing fields. Only a non-object root is rejected; everything below the root degrades to
//! something layout can handle, and each repair is reported as a [`Diagnostic`].

use crate::diagnostics::Diagnostic;
use crate::error::json_kind;
use crate::model::TopicNode;
use crate::{Error, Result};
use serde_json::{Map, Value};

#[derive(Debug, Clone)]
pub struct ParsedTree {
    pub tree: TopicNode,
    /// Repairs applied while reading the document.
    pub diagnostics: Vec<Diagnostic>,
}

/// Removes Markdown code fences around a JSON document.
///
/// If the remaining text still does not start with `{`, the slice between the first `{` and the
/// last `}` is returned (models sometimes add a sentence before the JSON).
pub fn strip_code_fence(text: &str) -> &str {
    let mut s = text.trim();
    if let Some(rest) = s.strip_prefix("```") {
        // Drop the info string (`json`, `JSON`, ...) up to the end of the fence line.
        s = match rest.find('\n') {
            Some(i) => &rest[i + 1..],
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
        };
    }
    s = s.trim_end();
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s = s.trim();

    if !s.starts_with('{') {
        if let (Some(start), Some(end)) = (s.find('{'), s.rfind('}')) {
            if start < end {
                return &s[start..=end];
            }
        }
    }
    s
}

/// Parses a topic tree out of raw model output.
pub fn parse_topic_tree(text: &str) -> Result<ParsedTree> {
    let value: Value = serde_json::from_str(strip_code_fence(text))?;
    TopicNode::from_value(&value)
}

impl TopicNode {
    /// Builds a tree from an arbitrary JSON value, repairing what can be repaired.
    pub fn from_value(value: &Value) -> Result<ParsedTree> {
        let Some(obj) = value.as_object() else {
            return Err(Error::NotAnObject {
                found: json_kind(value),
            });
        };
        let mut diagnostics = Vec::new();
        let tree = node_from_object(obj, None, 0, &mut diagnostics);
        for d in &diagnostics {
            tracing::warn!(diagnostic = %d, "repaired topic tree input");
        }
        Ok(ParsedTree { tree, diagnostics })
    }
}

fn node_from_object(
    obj: &Map<String, Value>,
    parent_id: Option<&str>,
    index: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> TopicNode {
    let id = match obj.get("id") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => {
            let id = match parent_id {
                Some(parent) => format!("{parent}_{index}"),
                None => "root".to_string(),
            };
            diagnostics.push(Diagnostic::SynthesizedId { id: id.clone() });
            id
        }
    };

    let topic = match obj.get("topic") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => id.clone(),
    };

    let accuracy = match obj.get("accuracy") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    };

    let mut subtopics = Vec::new();
    if let Some(Value::Array(items)) = obj.get("subtopics") {
        for (i, item) in items.iter().enumerate() {
            match item.as_object() {
                Some(child) => {
                    subtopics.push(node_from_object(child, Some(&id), i, diagnostics));
                }
                None => diagnostics.push(Diagnostic::SkippedSubtopic {
                    parent_id: id.clone(),
                    index: i,
                    found: json_kind(item),
                }),
            }
        }
    }

    TopicNode {
        id,
        topic,
        accuracy,
        subtopics,
    }
}
