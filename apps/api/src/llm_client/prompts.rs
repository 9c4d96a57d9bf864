// Shared system roles and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments.

/// System role for job description authoring.
pub const HR_PROFESSIONAL: &str = "You are an experienced HR professional and technical writer \
    specializing in creating compelling job descriptions and candidate communications.";

/// System role for résumé scoring. Objective, evidence-driven.
pub const TECHNICAL_RECRUITER: &str = "You are an expert technical recruiter with 10+ years of \
    experience evaluating candidates across various industries. \
    Be thorough, objective, and provide actionable insights.";

/// System role for candidate communications.
pub const EMPLOYER_BRANDING: &str = "You are an HR professional writing professional, \
    compassionate emails to candidates while maintaining excellent employer branding \
    and positive candidate experience.";

/// Fragment that enforces JSON-only output. Spliced into the scoring prompt via
/// `{json_only}`; `RUBRIC_SYSTEM` ends with the same text.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Truncates `text` to at most `max_chars` characters, on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
