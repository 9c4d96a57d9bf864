//! Candidate ranking: orders evaluated candidates and applies the
//! interview threshold. Degraded candidates stay in the comparison set with score 0.

use std::cmp::Ordering;

use crate::evaluation::models::{CandidateResult, OutcomeType};

/// Aggregate score (0 – 100) at or above which the best candidate is invited.
pub const QUALIFICATION_THRESHOLD: f64 = 70.0;

/// The highest-scoring candidate. Ties go to the first in upload order.
pub fn select_best(candidates: &[CandidateResult]) -> Option<&CandidateResult> {
    candidates.iter().fold(None, |best, candidate| match best {
        Some(b) if candidate.evaluation.score <= b.evaluation.score => Some(b),
        _ => Some(candidate),
    })
}

/// Candidates by descending score; equal scores keep upload order.
pub fn rank_candidates(candidates: &[CandidateResult]) -> Vec<&CandidateResult> {
    let mut ranked: Vec<&CandidateResult> = candidates.iter().collect();
    ranked.sort_by(|a, b| {
        b.evaluation
            .score
            .partial_cmp(&a.evaluation.score)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

pub fn is_qualified(score: f64, threshold: f64) -> bool {
    score >= threshold
}

pub fn decide_outcome(score: f64, threshold: f64) -> OutcomeType {
    if is_qualified(score, threshold) {
        OutcomeType::Interview
    } else {
        OutcomeType::Rejection
    }
}
