//! Outcome drafting: renders interview/rejection notifications via inference.
//! Adds no scoring logic. On failure returns a static apology embedding the error.

use tracing::{error, info};

use crate::config::PipelineSettings;
use crate::evaluation::models::{EvaluationResult, OutcomeType};
use crate::evaluation::prompts::{INTERVIEW_PROMPT_TEMPLATE, REJECTION_PROMPT_TEMPLATE};
use crate::llm_client::prompts::EMPLOYER_BRANDING;
use crate::llm_client::Inference;

/// Rejections for evaluations scoring strictly above this acknowledge the candidate's strengths.
const FEEDBACK_NOTE_MIN_SCORE: f64 = 70.0;
const DEFAULT_STRENGTHS: &str = "Strong technical background";
const DRAFTING_APOLOGY: &str =
    "We encountered an error generating your email. Please try again or contact support.";

pub async fn draft_outcome(
    candidate_name: &str,
    position: &str,
    outcome: OutcomeType,
    evaluation: Option<&EvaluationResult>,
    llm: &dyn Inference,
    settings: &PipelineSettings,
) -> String {
    let prompt = match outcome {
        OutcomeType::Interview => build_interview_prompt(candidate_name, position, evaluation),
        OutcomeType::Rejection => build_rejection_prompt(candidate_name, position, evaluation),
    };

    match llm.infer(EMPLOYER_BRANDING, &prompt, &settings.drafting).await {
        Ok(text) => {
            info!("{outcome:?} email drafted for {candidate_name}");
            text.trim().to_string()
        }
        Err(e) => {
            error!("Failed to draft {outcome:?} email for {candidate_name}: {e}");
            format!("{DRAFTING_APOLOGY}\n\nError: {e}")
        }
    }
}

fn build_interview_prompt(
    candidate_name: &str,
    position: &str,
    evaluation: Option<&EvaluationResult>,
) -> String {
    let score = evaluation
        .map(|e| format!("{:.1}", e.score))
        .unwrap_or_else(|| "n/a".to_string());
    let strengths = evaluation
        .and_then(|e| first_sentence(&e.remarks))
        .unwrap_or(DEFAULT_STRENGTHS);
    let focus_areas = evaluation
        .filter(|e| !e.interview_focus_areas.is_empty())
        .map(|e| e.interview_focus_areas.join(", "))
        .unwrap_or_else(|| "their recent experience".to_string());

    INTERVIEW_PROMPT_TEMPLATE
        .replace("{candidate_name}", candidate_name)
        .replace("{position}", position)
        .replace("{score}", &score)
        .replace("{strengths}", strengths)
        .replace("{focus_areas}", &focus_areas)
}

fn build_rejection_prompt(
    candidate_name: &str,
    position: &str,
    evaluation: Option<&EvaluationResult>,
) -> String {
    let feedback_note = evaluation
        .filter(|e| e.score > FEEDBACK_NOTE_MIN_SCORE)
        .map(|e| {
            let background = e.remarks.split_whitespace().take(5).collect::<Vec<_>>().join(" ");
            let background = if background.is_empty() {
                "certain areas".to_string()
            } else {
                background
            };
            format!(
                "EVALUATION NOTES: While your background in {background} was impressive, \
                we've chosen candidates whose experience more closely matches our current needs."
            )
        })
        .unwrap_or_default();

    REJECTION_PROMPT_TEMPLATE
        .replace("{candidate_name}", candidate_name)
        .replace("{position}", position)
        .replace("{feedback_note}", &feedback_note)
}

fn first_sentence(text: &str) -> Option<&str> {
    text.split('.')
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
