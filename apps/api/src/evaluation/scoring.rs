//! Scoring: scores a résumé against a rubric and aggregates the result.
//!
//! Aggregation is deterministic and independent of inference:
//! 1. weight per importance: high=1.5, medium=1.0, low=0.5
//! 2. total_score = Σ(score × weight), total_weight = Σ(weight)
//! 3. total_weight == 0 → 0
//! 4. raw = (total_score / total_weight) × 10   (0 – 10 scale → 0 – 100)
//! 5. clamp to [0, 100]
//!
//! A precomputed aggregate in the scoring response (`overall_score`, else a
//! top-level `score`) overrides step 1 – 5.

use serde_json::json;
use tracing::{info, warn};

use crate::config::PipelineSettings;
use crate::evaluation::models::{CriterionEvaluation, EvaluationResult, RoleType, Rubric, ScoreSource};
use crate::evaluation::prompts::{
    BALANCED_GUIDANCE, BUSINESS_GUIDANCE, CREATIVE_GUIDANCE, SCORING_PROMPT_TEMPLATE,
    TECHNICAL_GUIDANCE,
};
use crate::evaluation::repair::{repair_scoring_response, MAX_AGGREGATE_SCORE};
use crate::evaluation::rubric::extract_rubric;
use crate::llm_client::prompts::{truncate_chars, JSON_ONLY_INSTRUCTION, TECHNICAL_RECRUITER};
use crate::llm_client::Inference;

/// Per-criterion score (0 – 10) strictly below which a criterion is reported missing.
pub const DEFICIENCY_THRESHOLD: f64 = 5.0;

/// Importance-weighted average of per-criterion scores, rescaled to 0 – 100.
pub fn aggregate_score(evaluations: &[CriterionEvaluation]) -> f64 {
    let mut total_score = 0.0_f64;
    let mut total_weight = 0.0_f64;

    for evaluation in evaluations {
        let weight = evaluation.importance.weight();
        total_score += evaluation.score * weight;
        total_weight += weight;
    }

    if total_weight == 0.0 {
        return 0.0;
    }

    let raw_score = (total_score / total_weight) * 10.0;
    raw_score.clamp(0.0, MAX_AGGREGATE_SCORE)
}

/// Names of criteria scored strictly below `threshold`, in evaluation order.
pub fn detect_missing_skills(evaluations: &[CriterionEvaluation], threshold: f64) -> Vec<String> {
    evaluations
        .iter()
        .filter(|e| e.score < threshold)
        .map(|e| e.name.clone())
        .collect()
}

/// Qualitative emphasis handed to the scoring step. Never affects aggregation.
pub fn scoring_guidance(role_type: RoleType) -> &'static str {
    match role_type {
        RoleType::Technical => TECHNICAL_GUIDANCE,
        RoleType::Business => BUSINESS_GUIDANCE,
        RoleType::Creative => CREATIVE_GUIDANCE,
        RoleType::Operational | RoleType::General => BALANCED_GUIDANCE,
    }
}

/// Extracts a rubric from `jd_text` and scores `resume_text` against it.
/// A failed extraction scores against the empty rubric.
pub async fn evaluate_resume(
    resume_text: &str,
    jd_text: &str,
    llm: &dyn Inference,
    settings: &PipelineSettings,
) -> EvaluationResult {
    let rubric = extract_rubric(jd_text, llm, settings).await;
    evaluate_against_rubric(&rubric, resume_text, llm, settings).await
}

/// Scores one résumé against an already-extracted rubric. Never fails:
/// transport errors yield a "Processing Error" result, unusable responses an
/// "Evaluation Error" result.
pub async fn evaluate_against_rubric(
    rubric: &Rubric,
    resume_text: &str,
    llm: &dyn Inference,
    settings: &PipelineSettings,
) -> EvaluationResult {
    let prompt = build_scoring_prompt(rubric, resume_text, settings);

    let text = match llm.infer(TECHNICAL_RECRUITER, &prompt, &settings.scoring).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Scoring call failed: {e}");
            return EvaluationResult::processing_error(&e.to_string());
        }
    };

    let repaired = match repair_scoring_response(&text, rubric) {
        Ok(repaired) => repaired,
        Err(e) => {
            warn!("Scoring response rejected: {e}");
            return EvaluationResult::evaluation_error(&e);
        }
    };

    let missing_skills = detect_missing_skills(&repaired.evaluations, settings.deficiency_threshold);
    let (score, score_source) = match repaired.precomputed_score {
        Some(score) => (score, ScoreSource::Precomputed),
        None => (aggregate_score(&repaired.evaluations), ScoreSource::Weighted),
    };

    info!(
        "Resume evaluated: score={score:.1} ({score_source:?}), criteria={}, missing={}",
        repaired.evaluations.len(),
        missing_skills.len()
    );

    let summary = repaired.summary;
    EvaluationResult {
        score,
        score_source,
        missing_skills,
        strength_areas: summary.strength_areas,
        red_flags: summary.red_flags,
        cultural_fit_indicators: summary.cultural_fit_indicators,
        experience_gap_analysis: summary.experience_gap_analysis,
        interview_focus_areas: summary.interview_focus_areas,
        remarks: summary.remarks,
        recommendation: summary.recommendation,
        criterion_scores: repaired.evaluations,
    }
}

/// Builds the scoring prompt: criteria listed by id, role emphasis, truncated résumé.
fn build_scoring_prompt(rubric: &Rubric, resume_text: &str, settings: &PipelineSettings) -> String {
    let criteria = json!(rubric
        .criteria()
        .map(|c| {
            json!({
                "id": c.id,
                "name": c.name,
                "category": c.category,
                "importance": c.importance,
                "description": c.description,
                "validation_approach": c.validation_approach,
            })
        })
        .collect::<Vec<_>>());

    let industry_context = if rubric.industry_context.is_empty() {
        "Not specified"
    } else {
        rubric.industry_context.as_str()
    };

    SCORING_PROMPT_TEMPLATE
        .replace("{role_guidance}", scoring_guidance(rubric.role_type))
        .replace("{industry_context}", industry_context)
        .replace("{criteria_json}", &format!("{criteria:#}"))
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace(
            "{resume_text}",
            truncate_chars(resume_text, settings.resume_prompt_chars),
        )
}
