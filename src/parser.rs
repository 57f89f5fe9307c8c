//! Parsing and repair of the text service's ad-idea batch response.
//!
//! The service is asked for a bare JSON array of 3 objects, but models often
//! wrap the array in commentary or code fences. A direct parse is attempted
//! first; on failure the substring between the first `[` and the last `]` is
//! parsed instead. Keyword subfields are defaulted individually so a missing
//! mood never fails the whole batch.

use crate::models::{DraftIdea, VisualKeywords};
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_ACTION: &str = "using";
const DEFAULT_MOOD: &str = "happy";
const DEFAULT_SETTING: &str = "lifestyle";

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawIdea {
    hook: Option<String>,
    caption: Option<String>,
    visual_suggestion: Option<String>,
    keywords: RawKeywords,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawKeywords {
    subject: Option<String>,
    action: Option<String>,
    mood: Option<String>,
    setting: Option<String>,
}

/// Parse the raw text-service response into exactly 3 normalized drafts.
///
/// `product` supplies the default keyword subject when the model omits one.
pub fn parse_ideas(raw: &str, product: &str) -> Result<Vec<DraftIdea>> {
    let items = parse_json_array(raw)?;

    if items.len() != 3 {
        return Err(Error::Schema(format!(
            "Expected an array of exactly 3 ad ideas, got {}",
            items.len()
        )));
    }

    items
        .into_iter()
        .map(|value| {
            let raw_idea: RawIdea = serde_json::from_value(value)
                .map_err(|e| Error::Schema(format!("Ad idea element is not an object: {}", e)))?;
            Ok(normalize(raw_idea, product))
        })
        .collect()
}

/// Direct JSON-array parse, then bracket repair on failure.
///
/// Repair assumes the wrapping text never contains an unrelated balanced
/// `[...]` pair before the answer. Known heuristic, kept as-is.
fn parse_json_array(raw: &str) -> Result<Vec<Value>> {
    if let Ok(items) = serde_json::from_str::<Vec<Value>>(raw) {
        return Ok(items);
    }

    tracing::debug!("Direct JSON-array parse failed, attempting bracket repair");

    let start = raw
        .find('[')
        .ok_or_else(|| Error::Parse("No '[' found in text-service response".to_string()))?;
    let end = raw
        .rfind(']')
        .ok_or_else(|| Error::Parse("No ']' found in text-service response".to_string()))?;
    if end < start {
        return Err(Error::Parse(
            "Brackets in text-service response are out of order".to_string(),
        ));
    }

    serde_json::from_str(&raw[start..=end])
        .map_err(|e| Error::Parse(format!("Repaired substring is not valid JSON: {}", e)))
}

fn normalize(raw: RawIdea, product: &str) -> DraftIdea {
    DraftIdea {
        hook: raw.hook.unwrap_or_default(),
        caption: raw.caption.unwrap_or_default(),
        visual_suggestion: raw.visual_suggestion.unwrap_or_default(),
        keywords: VisualKeywords {
            subject: normalize_keyword(raw.keywords.subject, &product.to_lowercase()),
            action: normalize_keyword(raw.keywords.action, DEFAULT_ACTION),
            mood: normalize_keyword(raw.keywords.mood, DEFAULT_MOOD),
            setting: normalize_keyword(raw.keywords.setting, DEFAULT_SETTING),
        },
    }
}

/// Lowercase and trim a keyword, substituting the default when the field is
/// missing or blank.
fn normalize_keyword(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) => {
            let cleaned = v.trim().to_lowercase();
            if cleaned.is_empty() {
                default.to_string()
            } else {
                cleaned
            }
        }
        None => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PRODUCT: &str = "Trail Mug";

    fn clean_batch() -> String {
        serde_json::json!([
            {
                "hook": "Morning coffee, anywhere",
                "caption": "Take it on the trail. Shop Now!",
                "visualSuggestion": "A mug steaming on a mountain ledge",
                "keywords": {
                    "subject": "trail mug",
                    "action": "sipping",
                    "mood": "peaceful",
                    "setting": "mountains"
                }
            },
            {
                "hook": "Built for the cold",
                "caption": "Insulated for hours. Learn More!",
                "visualSuggestion": "Close-up of the insulated lid in snow",
                "keywords": {
                    "subject": "insulated lid",
                    "action": "showcasing",
                    "mood": "bold",
                    "setting": "winter camp"
                }
            },
            {
                "hook": "Your campsite upgrade",
                "caption": "Campers love it. Sign Up!",
                "visualSuggestion": "Friends around a campfire holding mugs",
                "keywords": {
                    "subject": "campers",
                    "action": "enjoying",
                    "mood": "happy",
                    "setting": "campfire"
                }
            }
        ])
        .to_string()
    }

    #[test]
    fn test_clean_array_parses_without_defaults() {
        let drafts = parse_ideas(&clean_batch(), PRODUCT).unwrap();
        assert_eq!(drafts.len(), 3);
        assert_eq!(drafts[0].hook, "Morning coffee, anywhere");
        assert_eq!(drafts[0].keywords.subject, "trail mug");
        assert_eq!(drafts[0].keywords.action, "sipping");
        assert_eq!(drafts[0].keywords.mood, "peaceful");
        assert_eq!(drafts[0].keywords.setting, "mountains");
        assert_eq!(drafts[1].keywords.mood, "bold");
        assert_eq!(drafts[2].keywords.setting, "campfire");
    }

    #[test]
    fn test_wrapped_array_is_repaired() {
        let wrapped = format!("Here you go:\n{}\nHope that helps!", clean_batch());
        let direct = parse_ideas(&clean_batch(), PRODUCT).unwrap();
        let repaired = parse_ideas(&wrapped, PRODUCT).unwrap();

        for (a, b) in direct.iter().zip(repaired.iter()) {
            assert_eq!(a.hook, b.hook);
            assert_eq!(a.caption, b.caption);
            assert_eq!(a.keywords, b.keywords);
        }
    }

    #[test]
    fn test_code_fenced_array_is_repaired() {
        let fenced = format!("```json\n{}\n```", clean_batch());
        assert_eq!(parse_ideas(&fenced, PRODUCT).unwrap().len(), 3);
    }

    #[test]
    fn test_non_json_without_brackets_is_parse_error() {
        let err = parse_ideas("I could not generate ideas today.", PRODUCT).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_invalid_json_between_brackets_is_parse_error() {
        let err = parse_ideas("result: [not json at all]", PRODUCT).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_reversed_brackets_are_parse_error() {
        let err = parse_ideas("] nothing here [", PRODUCT).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_two_element_array_is_schema_error() {
        let raw = r#"[{"hook": "a"}, {"hook": "b"}]"#;
        let err = parse_ideas(raw, PRODUCT).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn test_four_element_array_is_schema_error() {
        let raw = r#"[{}, {}, {}, {}]"#;
        let err = parse_ideas(raw, PRODUCT).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn test_non_object_element_is_schema_error() {
        let raw = r#"[{"hook": "a"}, "just a string", {"hook": "c"}]"#;
        let err = parse_ideas(raw, PRODUCT).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn test_missing_mood_defaults_to_happy() {
        let raw = serde_json::json!([
            {"hook": "a", "keywords": {"subject": "mug", "action": "holding", "setting": "park"}},
            {"hook": "b", "keywords": {}},
            {"hook": "c"}
        ])
        .to_string();

        let drafts = parse_ideas(&raw, PRODUCT).unwrap();
        assert_eq!(drafts[0].keywords.mood, "happy");
        assert_eq!(drafts[1].keywords.mood, "happy");
        assert_eq!(drafts[2].keywords.mood, "happy");
    }

    #[test]
    fn test_missing_keywords_fill_all_defaults() {
        let raw = r#"[{"hook": "a"}, {"hook": "b"}, {"hook": "c"}]"#;
        let drafts = parse_ideas(raw, PRODUCT).unwrap();

        let keywords = &drafts[0].keywords;
        assert_eq!(keywords.subject, "trail mug");
        assert_eq!(keywords.action, "using");
        assert_eq!(keywords.mood, "happy");
        assert_eq!(keywords.setting, "lifestyle");
    }

    #[test]
    fn test_keywords_are_lowercased_and_trimmed() {
        let raw = serde_json::json!([
            {"keywords": {"subject": "  Trail MUG  ", "action": "SIPPING", "mood": " Calm ", "setting": "  FOREST"}},
            {},
            {}
        ])
        .to_string();

        let keywords = &parse_ideas(&raw, PRODUCT).unwrap()[0].keywords;
        assert_eq!(keywords.subject, "trail mug");
        assert_eq!(keywords.action, "sipping");
        assert_eq!(keywords.mood, "calm");
        assert_eq!(keywords.setting, "forest");
    }

    #[test]
    fn test_blank_keyword_is_treated_as_missing() {
        let raw = serde_json::json!([
            {"keywords": {"mood": "   "}},
            {},
            {}
        ])
        .to_string();

        assert_eq!(parse_ideas(&raw, PRODUCT).unwrap()[0].keywords.mood, "happy");
    }

    #[test]
    fn test_missing_text_fields_default_to_empty() {
        let raw = r#"[{}, {}, {}]"#;
        let drafts = parse_ideas(raw, PRODUCT).unwrap();
        assert_eq!(drafts[0].hook, "");
        assert_eq!(drafts[0].caption, "");
        assert_eq!(drafts[0].visual_suggestion, "");
    }
}
