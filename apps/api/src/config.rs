use std::time::Duration;

use anyhow::{Context, Result};

use crate::evaluation::ranking::QUALIFICATION_THRESHOLD;
use crate::evaluation::scoring::DEFICIENCY_THRESHOLD;
use crate::llm_client::InferOptions;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model_name: String,
    /// Maximum résumés accepted in one matching request.
    pub max_resumes: usize,
    pub llm_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: optional_env("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            model_name: optional_env("MODEL_NAME", DEFAULT_MODEL),
            max_resumes: optional_env("MAX_RESUMES", "10")
                .parse::<usize>()
                .context("MAX_RESUMES must be a positive integer")?,
            llm_timeout: Duration::from_secs(
                optional_env("LLM_TIMEOUT_SECS", "120")
                    .parse::<u64>()
                    .context("LLM_TIMEOUT_SECS must be a number of seconds")?,
            ),
            port: optional_env("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

/// Explicit knobs for the evaluation pipeline, handed to it at construction.
/// The thresholds are fixed design constants and are not read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    /// Aggregate score (0 – 100) at or above which a candidate is invited to interview.
    pub qualification_threshold: f64,
    /// Per-criterion score (0 – 10) strictly below which a criterion is a missing skill.
    pub deficiency_threshold: f64,
    /// Characters of résumé text kept for display.
    pub excerpt_chars: usize,
    /// Characters of job description text sent to inference.
    pub jd_prompt_chars: usize,
    /// Characters of résumé text sent to inference.
    pub resume_prompt_chars: usize,
    pub extraction: InferOptions,
    pub scoring: InferOptions,
    pub drafting: InferOptions,
    pub authoring: InferOptions,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            qualification_threshold: QUALIFICATION_THRESHOLD,
            deficiency_threshold: DEFICIENCY_THRESHOLD,
            excerpt_chars: 500,
            jd_prompt_chars: 2000,
            resume_prompt_chars: 3000,
            extraction: InferOptions::json(0.1, 2000),
            scoring: InferOptions::json(0.2, 1500),
            drafting: InferOptions::text(0.7, 1000),
            authoring: InferOptions::text(0.8, 2500),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
