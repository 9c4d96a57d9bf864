use serde::{Deserialize, Serialize};

/// Importance level of a single criterion. Drives the aggregate weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    #[default]
    Medium,
    Low,
}

impl Importance {
    /// Lenient parse of a model-produced label. Anything unrecognized is `Medium`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" | "critical" | "required" => Importance::High,
            "low" | "optional" | "nice to have" | "nice-to-have" => Importance::Low,
            _ => Importance::Medium,
        }
    }

    /// high=1.5, medium=1.0, low=0.5
    pub fn weight(self) -> f64 {
        match self {
            Importance::High => 1.5,
            Importance::Medium => 1.0,
            Importance::Low => 0.5,
        }
    }
}

/// Closed vocabulary of role shapes. Only shifts the qualitative scoring guidance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    Technical,
    Business,
    Creative,
    Operational,
    #[default]
    General,
}

impl RoleType {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "technical" | "engineering" | "tech" => RoleType::Technical,
            "business" | "management" | "managerial" => RoleType::Business,
            "creative" | "design" => RoleType::Creative,
            "operational" | "operations" => RoleType::Operational,
            _ => RoleType::General,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionCategory {
    HardSkill,
    SoftSkill,
    Experience,
}

impl CriterionCategory {
    /// Evaluation order: hard skills, soft skills, experience requirements.
    pub const ALL: [CriterionCategory; 3] = [
        CriterionCategory::HardSkill,
        CriterionCategory::SoftSkill,
        CriterionCategory::Experience,
    ];

    /// Field name used in the extraction response.
    pub fn field_name(self) -> &'static str {
        match self {
            CriterionCategory::HardSkill => "hard_skills",
            CriterionCategory::SoftSkill => "soft_skills",
            CriterionCategory::Experience => "experience_requirements",
        }
    }

    pub fn id_prefix(self) -> char {
        match self {
            CriterionCategory::HardSkill => 'H',
            CriterionCategory::SoftSkill => 'S',
            CriterionCategory::Experience => 'E',
        }
    }
}

/// A single named, importance-tagged evaluation dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    /// Assigned at rubric creation (`H1`, `S2`, `E1`, ...). The join key for scoring.
    pub id: String,
    pub name: String,
    pub category: CriterionCategory,
    pub importance: Importance,
    pub description: String,
    pub validation_approach: String,
}

/// Structured evaluation criteria derived from one job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rubric {
    pub role_type: RoleType,
    pub industry_context: String,
    pub hard_skills: Vec<Criterion>,
    pub soft_skills: Vec<Criterion>,
    pub experience_requirements: Vec<Criterion>,
}

impl Rubric {
    /// The degraded rubric: no criteria, role type `general`.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.criterion_count() == 0
    }

    pub fn criterion_count(&self) -> usize {
        self.hard_skills.len() + self.soft_skills.len() + self.experience_requirements.len()
    }

    pub fn category(&self, category: CriterionCategory) -> &[Criterion] {
        match category {
            CriterionCategory::HardSkill => &self.hard_skills,
            CriterionCategory::SoftSkill => &self.soft_skills,
            CriterionCategory::Experience => &self.experience_requirements,
        }
    }

    pub(crate) fn category_mut(&mut self, category: CriterionCategory) -> &mut Vec<Criterion> {
        match category {
            CriterionCategory::HardSkill => &mut self.hard_skills,
            CriterionCategory::SoftSkill => &mut self.soft_skills,
            CriterionCategory::Experience => &mut self.experience_requirements,
        }
    }

    /// All criteria in evaluation order.
    pub fn criteria(&self) -> impl Iterator<Item = &Criterion> {
        CriterionCategory::ALL
            .into_iter()
            .flat_map(move |c| self.category(c).iter())
    }

    pub fn find(&self, id: &str) -> Option<&Criterion> {
        self.criteria().find(|c| c.id == id)
    }
}

/// Score and evidence for one criterion against one résumé.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionEvaluation {
    pub criterion_id: String,
    pub name: String,
    pub category: CriterionCategory,
    /// Copied from the rubric, never taken from the scoring response.
    pub importance: Importance,
    /// 0 – 10
    pub score: f64,
    pub reason: String,
    pub evidence: String,
}

/// Where an aggregate score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// Supplied directly by the scoring response.
    Precomputed,
    /// Importance-weighted average of per-criterion scores.
    Weighted,
    /// Inference or parsing failed; score forced to 0.
    Degraded,
}

/// How the candidate's experience lines up with the role. Every member is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceGapAnalysis {
    pub years_match: Option<bool>,
    pub industry_relevance: Option<String>,
    pub skill_transferability: Option<String>,
}

impl ExperienceGapAnalysis {
    pub fn is_empty(&self) -> bool {
        self.years_match.is_none()
            && self.industry_relevance.is_none()
            && self.skill_transferability.is_none()
    }
}

/// Result of evaluating one résumé against one rubric. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// 0 – 100
    pub score: f64,
    pub score_source: ScoreSource,
    pub missing_skills: Vec<String>,
    pub strength_areas: Vec<String>,
    pub red_flags: Vec<String>,
    pub cultural_fit_indicators: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_gap_analysis: Option<ExperienceGapAnalysis>,
    pub interview_focus_areas: Vec<String>,
    pub remarks: String,
    pub recommendation: String,
    pub criterion_scores: Vec<CriterionEvaluation>,
}

impl EvaluationResult {
    pub fn is_degraded(&self) -> bool {
        self.score_source == ScoreSource::Degraded
    }
}

/// One evaluated résumé within a matching request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub filename: String,
    #[serde(flatten)]
    pub evaluation: EvaluationResult,
    pub resume_excerpt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeType {
    Interview,
    Rejection,
}

/// Everything produced for one job description and its batch of résumés.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingResponse {
    pub candidates: Vec<CandidateResult>,
    pub best_candidate: Option<String>,
    pub interview_email: Option<String>,
    pub rejection_email: String,
    pub processing_time_secs: f64,
}
