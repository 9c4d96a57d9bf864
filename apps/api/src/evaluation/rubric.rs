//! Rubric extraction: turns a free-text job description into a `Rubric`.
//!
//! Never fails: an unreachable backend or a non-conforming response degrades to
//! `Rubric::empty()` so the rest of the pipeline keeps running.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::PipelineSettings;
use crate::evaluation::models::{Criterion, CriterionCategory, Importance, RoleType, Rubric};
use crate::evaluation::prompts::{RUBRIC_PROMPT_TEMPLATE, RUBRIC_SYSTEM};
use crate::llm_client::prompts::truncate_chars;
use crate::llm_client::{infer_json, Inference};

#[derive(Debug, Error, PartialEq)]
pub enum ExtractionError {
    #[error("extraction response is not a JSON object")]
    NotAnObject,

    #[error("`{0}` must be a list of criteria")]
    CategoryNotAList(&'static str),
}

/// Extracts a rubric from `jd_text`. Degrades to an empty rubric on any failure.
pub async fn extract_rubric(
    jd_text: &str,
    llm: &dyn Inference,
    settings: &PipelineSettings,
) -> Rubric {
    let prompt = RUBRIC_PROMPT_TEMPLATE
        .replace("{jd_text}", truncate_chars(jd_text, settings.jd_prompt_chars));

    let raw: Value = match infer_json(llm, RUBRIC_SYSTEM, &prompt, &settings.extraction).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Rubric extraction call failed, continuing with an empty rubric: {e}");
            return Rubric::empty();
        }
    };

    match rubric_from_value(&raw) {
        Ok(rubric) => {
            info!(
                "Rubric extracted: role_type={:?}, criteria={} (hard={}, soft={}, experience={})",
                rubric.role_type,
                rubric.criterion_count(),
                rubric.hard_skills.len(),
                rubric.soft_skills.len(),
                rubric.experience_requirements.len()
            );
            rubric
        }
        Err(e) => {
            warn!("Rubric extraction returned a non-conforming structure ({e}), continuing with an empty rubric");
            Rubric::empty()
        }
    }
}

/// Builds a rubric from the raw extraction response, assigning criterion ids.
///
/// Criteria without a non-empty `name` or without an `importance` field are dropped.
/// Later duplicates of a name within the same category are dropped.
pub fn rubric_from_value(value: &Value) -> Result<Rubric, ExtractionError> {
    let obj = value.as_object().ok_or(ExtractionError::NotAnObject)?;

    let mut rubric = Rubric {
        role_type: obj
            .get("role_type")
            .and_then(Value::as_str)
            .map(RoleType::from_label)
            .unwrap_or_default(),
        industry_context: obj
            .get("industry_context")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string(),
        ..Rubric::empty()
    };

    for category in CriterionCategory::ALL {
        let items = match obj.get(category.field_name()) {
            None | Some(Value::Null) => continue,
            Some(Value::Array(items)) => items,
            Some(_) => return Err(ExtractionError::CategoryNotAList(category.field_name())),
        };

        let list = rubric.category_mut(category);
        for item in items {
            let Some(fields) = item.as_object().and_then(criterion_fields) else {
                debug!("Dropping {} criterion with missing fields: {item}", category.field_name());
                continue;
            };

            if list.iter().any(|c| c.name == fields.name) {
                debug!("Dropping duplicate {} criterion '{}'", category.field_name(), fields.name);
                continue;
            }

            list.push(Criterion {
                id: format!("{}{}", category.id_prefix(), list.len() + 1),
                name: fields.name,
                category,
                importance: fields.importance,
                description: fields.description,
                validation_approach: fields.validation_approach,
            });
        }
    }

    Ok(rubric)
}

struct CriterionFields {
    name: String,
    importance: Importance,
    description: String,
    validation_approach: String,
}

fn criterion_fields(obj: &Map<String, Value>) -> Option<CriterionFields> {
    let name = obj.get("name")?.as_str()?.trim();
    if name.is_empty() {
        return None;
    }

    // Present but unrecognized importance is kept as medium; absent importance drops the criterion.
    let importance = match obj.get("importance")? {
        Value::Null => return None,
        Value::String(label) => Importance::from_label(label),
        _ => Importance::Medium,
    };

    let text = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string()
    };

    Some(CriterionFields {
        name: name.to_string(),
        importance,
        description: text("description"),
        validation_approach: text("validation_approach"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedInference;
    use serde_json::json;

    const BACKEND_JD: &str = r#"
        Senior Backend Engineer - Payments
        Required: 5+ years backend development, Rust or Go, PostgreSQL.
        Nice to have: Kafka. You will partner with product and compliance teams.
    "#;

    #[test]
    fn test_rubric_system_role_demands_json_only() {
        use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
        assert!(RUBRIC_SYSTEM.ends_with(JSON_ONLY_INSTRUCTION));
    }

    fn full_response() -> Value {
        json!({
            "role_type": "technical",
            "industry_context": "Payments",
            "hard_skills": [
                {"name": "Rust", "importance": "high", "description": "Core language", "validation_approach": "Shipped Rust"},
                {"name": "PostgreSQL", "importance": "medium", "description": "Primary store", "validation_approach": "SQL work"},
                {"name": "Kafka", "importance": "low", "description": "Nice to have", "validation_approach": "Streaming"}
            ],
            "soft_skills": [
                {"name": "Cross-team communication", "importance": "medium", "description": "", "validation_approach": ""}
            ],
            "experience_requirements": [
                {"name": "5+ years backend", "importance": "high", "description": "", "validation_approach": ""}
            ]
        })
    }

    #[test]
    fn test_full_response_builds_rubric_with_ids() {
        let rubric = rubric_from_value(&full_response()).unwrap();
        assert_eq!(rubric.role_type, RoleType::Technical);
        assert_eq!(rubric.industry_context, "Payments");
        let ids: Vec<&str> = rubric.criteria().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["H1", "H2", "H3", "S1", "E1"]);
        assert_eq!(rubric.hard_skills[0].importance, Importance::High);
        assert_eq!(rubric.hard_skills[2].importance, Importance::Low);
        assert_eq!(rubric.soft_skills[0].category, CriterionCategory::SoftSkill);
    }

    #[test]
    fn test_criteria_missing_name_or_importance_are_dropped() {
        let value = json!({
            "role_type": "business",
            "hard_skills": [
                {"importance": "high"},
                {"name": "   ", "importance": "high"},
                {"name": "Excel"},
                {"name": "SQL", "importance": null},
                {"name": "Forecasting", "importance": "high"}
            ]
        });
        let rubric = rubric_from_value(&value).unwrap();
        assert_eq!(rubric.hard_skills.len(), 1);
        assert_eq!(rubric.hard_skills[0].name, "Forecasting");
        assert_eq!(rubric.hard_skills[0].id, "H1");
    }

    #[test]
    fn test_unknown_importance_defaults_to_medium() {
        let value = json!({
            "soft_skills": [
                {"name": "Empathy", "importance": "paramount"},
                {"name": "Grit", "importance": 3}
            ]
        });
        let rubric = rubric_from_value(&value).unwrap();
        assert!(rubric
            .soft_skills
            .iter()
            .all(|c| c.importance == Importance::Medium));
    }

    #[test]
    fn test_duplicate_names_within_category_are_dropped() {
        let value = json!({
            "hard_skills": [
                {"name": "Rust", "importance": "high"},
                {"name": "Rust", "importance": "low"}
            ],
            "experience_requirements": [
                {"name": "Rust", "importance": "medium"}
            ]
        });
        let rubric = rubric_from_value(&value).unwrap();
        assert_eq!(rubric.hard_skills.len(), 1);
        assert_eq!(rubric.hard_skills[0].importance, Importance::High);
        // Same name in another category is a different criterion.
        assert_eq!(rubric.experience_requirements.len(), 1);
    }

    #[test]
    fn test_missing_role_type_defaults_to_general() {
        let rubric = rubric_from_value(&json!({})).unwrap();
        assert_eq!(rubric.role_type, RoleType::General);
        assert!(rubric.is_empty());
    }

    #[test]
    fn test_non_object_response_is_rejected() {
        assert_eq!(
            rubric_from_value(&json!(["Rust"])),
            Err(ExtractionError::NotAnObject)
        );
    }

    #[test]
    fn test_category_with_wrong_type_is_rejected() {
        assert_eq!(
            rubric_from_value(&json!({"soft_skills": "communication"})),
            Err(ExtractionError::CategoryNotAList("soft_skills"))
        );
    }

    #[tokio::test]
    async fn test_extract_rubric_parses_backend_response() {
        let llm = ScriptedInference::always_ok(&full_response().to_string());
        let rubric = extract_rubric(BACKEND_JD, &llm, &PipelineSettings::default()).await;
        assert_eq!(rubric.criterion_count(), 5);

        let calls = llm.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system_role, RUBRIC_SYSTEM);
        assert!(calls[0].prompt.contains("Senior Backend Engineer"));
        assert!(calls[0].options.json_mode);
    }

    #[tokio::test]
    async fn test_extract_rubric_degrades_on_inference_failure() {
        let llm = ScriptedInference::always_fail("upstream timeout");
        let rubric = extract_rubric(BACKEND_JD, &llm, &PipelineSettings::default()).await;
        assert_eq!(rubric, Rubric::empty());
    }

    #[tokio::test]
    async fn test_extract_rubric_degrades_on_unparseable_text() {
        let llm = ScriptedInference::always_ok("Sure! Here are the criteria: Rust, Go.");
        let rubric = extract_rubric(BACKEND_JD, &llm, &PipelineSettings::default()).await;
        assert_eq!(rubric, Rubric::empty());
    }

    #[tokio::test]
    async fn test_extract_rubric_degrades_on_wrong_structure() {
        let llm = ScriptedInference::always_ok(r#"{"hard_skills": {"name": "Rust"}}"#);
        let rubric = extract_rubric(BACKEND_JD, &llm, &PipelineSettings::default()).await;
        assert!(rubric.is_empty());
        assert_eq!(rubric.role_type, RoleType::General);
    }

    #[tokio::test]
    async fn test_extract_rubric_truncates_long_descriptions() {
        let llm = ScriptedInference::always_ok("{}");
        let settings = PipelineSettings {
            jd_prompt_chars: 10,
            ..PipelineSettings::default()
        };
        let jd = format!("0123456789{}", "TAIL".repeat(50));
        extract_rubric(&jd, &llm, &settings).await;
        let prompt = &llm.calls()[0].prompt;
        assert!(prompt.contains("0123456789"));
        assert!(!prompt.contains("TAIL"));
    }
}
