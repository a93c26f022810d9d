use crate::*;
use serde_json::json;

#[test]
fn defaults_expose_layout_and_model_keys() {
    let cfg = SylvaConfig::defaults();
    assert_eq!(cfg.get_f64("layout.nodeSlotWidth"), Some(180.0));
    assert_eq!(cfg.get_f64("layout.levelSpacing"), Some(150.0));
    assert_eq!(cfg.get_str("extraction.model"), Some("gemini-2.0-flash"));
    assert_eq!(cfg.get_str("validation.model"), Some("gemini-2.5-flash"));
    assert_eq!(cfg.get_bool("validation.enabled"), Some(true));
    assert!(cfg.get_str("prompts.extraction").is_some_and(|p| p.contains("${inputText}")));
}

#[test]
fn overrides_deep_merge_onto_defaults() {
    let cfg = SylvaConfig::with_overrides(&json!({
        "layout": { "levelSpacing": 200 },
        "validation": { "enabled": false },
        "host": { "theme": "dark" }
    }));
    assert_eq!(cfg.get_f64("layout.levelSpacing"), Some(200.0));
    assert_eq!(cfg.get_f64("layout.nodeSlotWidth"), Some(180.0));
    assert_eq!(cfg.get_bool("validation.enabled"), Some(false));
    assert_eq!(cfg.get_str("host.theme"), Some("dark"));
}

#[test]
fn deep_merge_replaces_scalars_and_keeps_siblings() {
    let mut cfg = SylvaConfig::defaults();
    cfg.deep_merge(&json!({ "layout": { "nodeSlotWidth": { "inner": 1 } } }));
    assert_eq!(cfg.get_f64("layout.nodeSlotWidth"), None);
    assert_eq!(cfg.get_f64("layout.nodeSlotWidth.inner"), Some(1.0));
    assert_eq!(cfg.get_f64("layout.levelSpacing"), Some(150.0));

    cfg.deep_merge(&json!({ "layout": 3 }));
    assert_eq!(cfg.get_f64("layout"), Some(3.0));
    assert_eq!(cfg.get_f64("layout.levelSpacing"), None);
    assert_eq!(cfg.get_str("extraction.model"), Some("gemini-2.0-flash"));
}

#[test]
fn pipeline_config_reads_from_config() {
    let cfg = SylvaConfig::with_overrides(&json!({
        "extraction": { "model": "custom-model" },
        "validation": { "model": "   " },
        "prompts": {
            "extraction": "Topics of: ${inputText}",
            "transcription": "Transcribe verbatim."
        }
    }));
    let pc = PipelineConfig::from_config(&cfg);
    assert_eq!(pc.extraction_model, "custom-model");
    assert_eq!(pc.validation_model, "gemini-2.5-flash");
    assert!(pc.validate);
    assert_eq!(pc.extraction_prompt, "Topics of: ${inputText}");
    assert_eq!(pc.validation_prompt, prompt::DEFAULT_VALIDATION_PROMPT);
    assert_eq!(pc.transcription_instruction, "Transcribe verbatim.");
}
