//! Scoring response repair: turns raw scoring responses into validated evaluations and
//! builds the degraded results that stand in when inference or parsing fails.
//!
//! Structural fields (`criteria`, `overall_score` / `score`) are strict: a type error there
//! rejects the whole response. Free-text fields are lenient: wrong types are
//! skipped, missing values take defaults.

use std::collections::HashSet;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::evaluation::models::{
    CriterionCategory, CriterionEvaluation, EvaluationResult, ExperienceGapAnalysis, Rubric,
    ScoreSource,
};
use crate::llm_client::strip_json_fences;

/// Marker placed in `missing_skills` when a scoring response cannot be used.
pub const EVALUATION_ERROR: &str = "Evaluation Error";
/// Marker placed in `missing_skills` when the inference call itself failed.
pub const PROCESSING_ERROR: &str = "Processing Error";

const DEFAULT_REMARKS: &str = "Evaluation completed";
const DEFAULT_RECOMMENDATION: &str = "Further review needed";

/// Per-criterion scale upper bound.
pub const MAX_CRITERION_SCORE: f64 = 10.0;
/// Aggregate scale upper bound.
pub const MAX_AGGREGATE_SCORE: f64 = 100.0;

#[derive(Debug, Error, PartialEq)]
pub enum RepairError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("field `{0}` has the wrong type")]
    WrongType(&'static str),

    #[error("criterion `{0}` was scored more than once")]
    DuplicateIdentifier(String),

    #[error("criterion ids do not match the rubric (missing: [{missing}], unexpected: [{unexpected}])")]
    IdentifierMismatch { missing: String, unexpected: String },
}

/// Free-text holistic summary taken from a scoring response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HolisticSummary {
    pub strength_areas: Vec<String>,
    pub red_flags: Vec<String>,
    pub cultural_fit_indicators: Vec<String>,
    pub experience_gap_analysis: Option<ExperienceGapAnalysis>,
    pub interview_focus_areas: Vec<String>,
    pub remarks: String,
    pub recommendation: String,
}

/// A scoring response that passed validation against its rubric.
#[derive(Debug, Clone, PartialEq)]
pub struct RepairedScoring {
    /// Joined evaluations: categories in rubric order, response order within a category.
    pub evaluations: Vec<CriterionEvaluation>,
    /// Aggregate supplied by the response, clamped to 0 – 100.
    pub precomputed_score: Option<f64>,
    pub summary: HolisticSummary,
}

/// Parses and validates a raw scoring response against the rubric it was requested for.
///
/// The returned criterion id set must equal the rubric's id set exactly.
pub fn repair_scoring_response(text: &str, rubric: &Rubric) -> Result<RepairedScoring, RepairError> {
    let value: Value = serde_json::from_str(strip_json_fences(text))
        .map_err(|e| RepairError::InvalidJson(e.to_string()))?;
    let obj = value.as_object().ok_or(RepairError::NotAnObject)?;

    let scored = scored_criteria(obj)?;
    validate_identifiers(&scored, rubric)?;

    let mut evaluations = Vec::with_capacity(scored.len());
    for category in CriterionCategory::ALL {
        for item in &scored {
            // Ids were validated above, so every lookup succeeds.
            let Some(criterion) = rubric.find(&item.id) else {
                continue;
            };
            if criterion.category != category {
                continue;
            }
            evaluations.push(CriterionEvaluation {
                criterion_id: criterion.id.clone(),
                name: criterion.name.clone(),
                category: criterion.category,
                importance: criterion.importance,
                score: item.score,
                reason: item.reason.clone(),
                evidence: item.evidence.clone(),
            });
        }
    }

    let precomputed_score = match precomputed_field(obj) {
        None => None,
        Some((field, raw)) => Some(
            number_from(raw)
                .ok_or(RepairError::WrongType(field))?
                .clamp(0.0, MAX_AGGREGATE_SCORE),
        ),
    };

    Ok(RepairedScoring {
        evaluations,
        precomputed_score,
        summary: HolisticSummary {
            strength_areas: string_list(obj, "strength_areas"),
            red_flags: string_list(obj, "red_flags"),
            cultural_fit_indicators: string_list(obj, "cultural_fit_indicators"),
            experience_gap_analysis: experience_gap(obj),
            interview_focus_areas: string_list(obj, "interview_focus_areas"),
            remarks: text_or(obj, "remarks", DEFAULT_REMARKS),
            recommendation: text_or(obj, "recommendation", DEFAULT_RECOMMENDATION),
        },
    })
}

/// The aggregate supplied by the response: `overall_score`, else a top-level `score`.
fn precomputed_field(obj: &Map<String, Value>) -> Option<(&'static str, &Value)> {
    ["overall_score", "score"]
        .into_iter()
        .find_map(|field| match obj.get(field) {
            None | Some(Value::Null) => None,
            Some(raw) => Some((field, raw)),
        })
}

/// Lenient: anything but an object is ignored, wrong-typed members are left unset.
fn experience_gap(obj: &Map<String, Value>) -> Option<ExperienceGapAnalysis> {
    let gap = obj.get("experience_gap_analysis")?.as_object()?;
    let analysis = ExperienceGapAnalysis {
        years_match: gap.get("years_match").and_then(Value::as_bool),
        industry_relevance: gap
            .get("industry_relevance")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        skill_transferability: gap
            .get("skill_transferability")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    };
    (!analysis.is_empty()).then_some(analysis)
}

/// Sanitizes one per-criterion score: missing, non-numeric or outside 0 – 10 becomes 0.
pub fn sanitize_criterion_score(raw: Option<&Value>) -> f64 {
    raw.and_then(number_from)
        .filter(|s| (0.0..=MAX_CRITERION_SCORE).contains(s))
        .unwrap_or(0.0)
}

struct ScoredItem {
    id: String,
    score: f64,
    reason: String,
    evidence: String,
}

fn scored_criteria(obj: &Map<String, Value>) -> Result<Vec<ScoredItem>, RepairError> {
    let items = match obj.get("criteria") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(RepairError::WrongType("criteria")),
    };

    items
        .iter()
        .map(|item| {
            let item = item.as_object().ok_or(RepairError::WrongType("criteria"))?;
            let id = item
                .get("id")
                .and_then(Value::as_str)
                .ok_or(RepairError::WrongType("criteria.id"))?;
            Ok(ScoredItem {
                id: id.trim().to_string(),
                score: sanitize_criterion_score(item.get("score")),
                reason: text_or(item, "reason", ""),
                evidence: text_or(item, "evidence", ""),
            })
        })
        .collect()
}

fn validate_identifiers(scored: &[ScoredItem], rubric: &Rubric) -> Result<(), RepairError> {
    let mut returned = HashSet::new();
    for item in scored {
        if !returned.insert(item.id.as_str()) {
            return Err(RepairError::DuplicateIdentifier(item.id.clone()));
        }
    }

    let missing: Vec<&str> = rubric
        .criteria()
        .map(|c| c.id.as_str())
        .filter(|id| !returned.contains(id))
        .collect();
    let unexpected: Vec<&str> = scored
        .iter()
        .map(|item| item.id.as_str())
        .filter(|id| rubric.find(id).is_none())
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        Ok(())
    } else {
        Err(RepairError::IdentifierMismatch {
            missing: missing.join(", "),
            unexpected: unexpected.join(", "),
        })
    }
}

/// Accepts JSON numbers and numeric strings.
fn number_from(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn string_list(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn text_or(obj: &Map<String, Value>, key: &str, default: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

impl EvaluationResult {
    /// A valid, zero-scored result tagged with `marker`.
    pub fn degraded(marker: &str, remarks: String) -> Self {
        Self {
            score: 0.0,
            score_source: ScoreSource::Degraded,
            missing_skills: vec![marker.to_string()],
            strength_areas: vec![],
            red_flags: vec![],
            cultural_fit_indicators: vec![],
            experience_gap_analysis: None,
            interview_focus_areas: vec![],
            remarks,
            recommendation: "reject".to_string(),
            criterion_scores: vec![],
        }
    }

    /// The scoring response could not be used.
    pub fn evaluation_error(cause: &RepairError) -> Self {
        Self::degraded(
            EVALUATION_ERROR,
            format!("Failed to parse evaluation results ({cause}). Please try again."),
        )
    }

    /// The inference call itself failed. `cause` is preserved for diagnostics.
    pub fn processing_error(cause: &str) -> Self {
        Self::degraded(
            PROCESSING_ERROR,
            format!("Evaluation failed due to technical error: {cause}"),
        )
    }
}
