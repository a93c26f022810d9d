//! Built-in prompt templates.
//!
//! Templates use `${name}` placeholders. Storage and editing of user templates belong to the host
//! application; this module only ships defaults and fills placeholders.

pub const TRANSCRIPTION_INSTRUCTION: &str = "Transcribe this audio. Return only the transcribed text without any additional formatting or explanations.";

pub const DEFAULT_EXTRACTION_PROMPT: &str = r#"Extract a hierarchical topic tree from the following text. Include every explicitly mentioned topic, concept, named entity, question and hypothetical scenario, even when it is not a factual statement.

RULES:
- Include every topic or named entity that is mentioned, including ones that only appear in a question or suggestion.
- Group related information under logical main topics; place specific values, measurements and names as subtopics of the category they belong to.
- Let the depth of the hierarchy follow the complexity of the content.
- Do NOT add topics that are not mentioned and do not infer content.

IDS:
- Use descriptive lowercase ids with underscores, built hierarchically: main_topic -> main_topic_subtopic -> main_topic_subtopic_detail.

ACCURACY:
- 0.9-1.0: discussed with significant detail or emphasis
- 0.7-0.9: clearly mentioned with context
- 0.5-0.7: briefly mentioned but clearly stated
- 0.3-0.5: implied or indirectly referenced

JSON SHAPE:
{
  "id": "main_topic_name",
  "topic": "Main Topic Title",
  "accuracy": 0.95,
  "subtopics": [
    { "id": "main_topic_specific_item", "topic": "Specific Item Name", "accuracy": 0.85, "subtopics": [] }
  ]
}

Use the field name "subtopics" at every level. The root should be the most representative overarching topic of the text; only call it "root" when there is no clear main topic.

Return ONLY a single JSON object.

Text: ${inputText}"#;

pub const DEFAULT_VALIDATION_PROMPT: &str = r#"You are a precision topic extraction validator. Review the extracted topic tree against the original text and correct it.

CHECKLIST:
- Every topic must be explicitly mentioned in the original text.
- No significant topic may be missing.
- Parent-child relationships must be logical.
- Accuracy scores (0.3-1.0) must reflect how prominent each topic is.
- Ids follow main_topic -> main_topic_subtopic -> main_topic_subtopic_detail.

CORRECTIONS, IN ORDER:
1. Remove topics that are not present in the text.
2. Add major topics that were missed.
3. Reorganize illogical parent-child relationships.
4. Adjust accuracy scores.
5. Fix malformed ids.

ORIGINAL TEXT:
"${originalText}"

EXTRACTED TOPIC TREE:
${topicTree}

Make surgical corrections and keep what is already accurate. Return only the corrected JSON, with no explanations or formatting."#;

/// Replaces every `${key}` placeholder with its value. Unknown placeholders are left untouched.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match vars.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 1]),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}
