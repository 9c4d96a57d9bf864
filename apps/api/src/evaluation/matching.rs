//! Candidate matching: orchestrates the full pipeline for one job description.
//!
//! Flow: extract_rubric (once) → evaluate every résumé concurrently against the
//! shared rubric → select best → draft interview (if qualified) and rejection emails.
//!
//! Output order always follows upload order, whatever order evaluations finish in.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tracing::{info, warn};

use crate::config::PipelineSettings;
use crate::evaluation::drafting::draft_outcome;
use crate::evaluation::models::{
    CandidateResult, EvaluationResult, MatchingResponse, OutcomeType, Rubric,
};
use crate::evaluation::ranking::{decide_outcome, rank_candidates, select_best};
use crate::evaluation::repair::PROCESSING_ERROR;
use crate::evaluation::rubric::extract_rubric;
use crate::evaluation::scoring::{evaluate_against_rubric, evaluate_resume};
use crate::llm_client::prompts::truncate_chars;
use crate::llm_client::Inference;

/// Name used on the generic rejection template.
const GENERIC_CANDIDATE: &str = "Candidate";
pub const DEFAULT_POSITION: &str = "the position";

/// One uploaded résumé, decoded or not.
#[derive(Debug, Clone)]
pub struct ResumeSubmission {
    pub filename: String,
    pub content: ResumeContent,
}

#[derive(Debug, Clone)]
pub enum ResumeContent {
    Text(String),
    /// Text could not be extracted; carries the reason.
    Unreadable(String),
}

impl ResumeSubmission {
    pub fn text(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: ResumeContent::Text(text.into()),
        }
    }

    pub fn unreadable(filename: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: ResumeContent::Unreadable(reason.into()),
        }
    }
}

/// The evaluation pipeline with its inference capability and settings bound at construction.
#[derive(Clone)]
pub struct MatchingPipeline {
    llm: Arc<dyn Inference>,
    settings: PipelineSettings,
}

impl MatchingPipeline {
    pub fn new(llm: Arc<dyn Inference>, settings: PipelineSettings) -> Self {
        Self { llm, settings }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn llm(&self) -> &dyn Inference {
        self.llm.as_ref()
    }

    pub async fn extract_rubric(&self, jd_text: &str) -> Rubric {
        extract_rubric(jd_text, self.llm(), &self.settings).await
    }

    pub async fn evaluate_resume(&self, resume_text: &str, jd_text: &str) -> EvaluationResult {
        evaluate_resume(resume_text, jd_text, self.llm(), &self.settings).await
    }

    pub async fn draft_outcome(
        &self,
        candidate_name: &str,
        position: &str,
        outcome: OutcomeType,
        evaluation: Option<&EvaluationResult>,
    ) -> String {
        draft_outcome(
            candidate_name,
            position,
            outcome,
            evaluation,
            self.llm(),
            &self.settings,
        )
        .await
    }

    /// Runs the full matching flow. Never fails; per-résumé failures become
    /// degraded candidates that stay in the ranking with score 0.
    pub async fn match_candidates(
        &self,
        jd_text: &str,
        position: &str,
        submissions: Vec<ResumeSubmission>,
    ) -> MatchingResponse {
        let started = Instant::now();
        info!("Matching {} resumes against job description", submissions.len());

        let rubric = self.extract_rubric(jd_text).await;
        if rubric.is_empty() {
            warn!("Rubric is empty; résumés will be scored on holistic signals only");
        }

        let candidates: Vec<CandidateResult> = join_all(
            submissions
                .iter()
                .map(|submission| self.evaluate_submission(&rubric, submission)),
        )
        .await;

        for (rank, candidate) in rank_candidates(&candidates).iter().enumerate() {
            info!(
                "#{} {} score={:.1}",
                rank + 1,
                candidate.filename,
                candidate.evaluation.score
            );
        }

        let best = select_best(&candidates);
        let interview_email = match best {
            Some(best)
                if decide_outcome(best.evaluation.score, self.settings.qualification_threshold)
                    == OutcomeType::Interview =>
            {
                info!(
                    "Best candidate {} qualifies for interview (score {:.1})",
                    best.filename, best.evaluation.score
                );
                Some(
                    self.draft_outcome(
                        &best.filename,
                        position,
                        OutcomeType::Interview,
                        Some(&best.evaluation),
                    )
                    .await,
                )
            }
            Some(best) => {
                info!(
                    "Best candidate {} below interview threshold (score {:.1})",
                    best.filename, best.evaluation.score
                );
                None
            }
            None => None,
        };

        let rejection_email = self
            .draft_outcome(GENERIC_CANDIDATE, position, OutcomeType::Rejection, None)
            .await;

        let processing_time_secs = started.elapsed().as_secs_f64();
        info!(
            "Candidate matching completed: {} candidates in {:.2}s",
            candidates.len(),
            processing_time_secs
        );

        MatchingResponse {
            best_candidate: best.map(|b| b.filename.clone()),
            candidates,
            interview_email,
            rejection_email,
            processing_time_secs,
        }
    }

    async fn evaluate_submission(
        &self,
        rubric: &Rubric,
        submission: &ResumeSubmission,
    ) -> CandidateResult {
        match &submission.content {
            ResumeContent::Text(text) => {
                let evaluation =
                    evaluate_against_rubric(rubric, text, self.llm(), &self.settings).await;
                if evaluation.is_degraded() {
                    warn!("Degraded evaluation for {}: {}", submission.filename, evaluation.remarks);
                } else {
                    info!(
                        "Processed {} - score {:.1}",
                        submission.filename, evaluation.score
                    );
                }
                CandidateResult {
                    filename: submission.filename.clone(),
                    evaluation,
                    resume_excerpt: excerpt(text, self.settings.excerpt_chars),
                }
            }
            ResumeContent::Unreadable(reason) => {
                warn!("Could not read {}: {reason}", submission.filename);
                CandidateResult {
                    filename: submission.filename.clone(),
                    evaluation: EvaluationResult::degraded(
                        PROCESSING_ERROR,
                        format!("Error processing resume: {reason}"),
                    ),
                    resume_excerpt: String::new(),
                }
            }
        }
    }
}

/// First `max_chars` characters, with `...` appended when the text was longer.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let head = truncate_chars(text, max_chars);
    if head.len() < text.len() {
        format!("{head}...")
    } else {
        head.to_string()
    }
}
