// All LLM prompt constants for the Evaluation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for rubric extraction. Enforces JSON-only output.
pub const RUBRIC_SYSTEM: &str = "You are an expert technical recruiter and job analyst. \
    Turn a job description into a structured evaluation rubric. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Rubric extraction prompt template. Replace `{jd_text}` before sending.
pub const RUBRIC_PROMPT_TEMPLATE: &str = r#"Extract the evaluation criteria from the following job description.

Return a JSON object with this EXACT schema (no extra fields):
{
  "role_type": "technical",
  "industry_context": "B2B fintech, regulated environment",
  "hard_skills": [
    {
      "name": "Rust",
      "importance": "high",
      "description": "Backend services are written in Rust",
      "validation_approach": "Look for shipped Rust projects or professional Rust experience"
    }
  ],
  "soft_skills": [
    {"name": "Stakeholder communication", "importance": "medium", "description": "...", "validation_approach": "..."}
  ],
  "experience_requirements": [
    {"name": "5+ years backend development", "importance": "high", "description": "...", "validation_approach": "..."}
  ]
}

Rules:

ROLE TYPE (pick exactly one): "technical", "business", "creative", "operational", "general".

IMPORTANCE (pick exactly one per criterion):
- "high": explicit must-haves, "required", minimum years, repeated emphasis
- "medium": clearly expected but not gating
- "low": "nice to have", "bonus", "a plus"

Every criterion name must be unique within its list and short enough to act as a label.
Ground every description in the text of the job description. Do NOT invent requirements.

JOB DESCRIPTION:
{jd_text}"#;

/// Résumé scoring prompt template.
/// Replace: {role_guidance}, {industry_context}, {criteria_json}, {resume_text}, {json_only}
pub const SCORING_PROMPT_TEMPLATE: &str = r#"TASK: Score the resume below against each evaluation criterion.
EVALUATION FRAMEWORK: STAR method (Situation, Task, Action, Result)

ROLE EMPHASIS:
{role_guidance}

INDUSTRY CONTEXT: {industry_context}

CRITERIA (score every one, identified by its "id"):
{criteria_json}

RESUME CONTENT:
{resume_text}

Return a JSON object:
{
  "criteria": [
    {"id": "H1", "score": 8, "reason": "Four years of production Rust", "evidence": "Built payment ledger in Rust at Acme"}
  ],
  "strength_areas": ["Backend Development", "System Architecture"],
  "red_flags": ["Employment gap 2021-2022"],
  "experience_gap_analysis": {
    "years_match": true,
    "industry_relevance": "High",
    "skill_transferability": "Medium"
  },
  "cultural_fit_indicators": ["Startup experience"],
  "interview_focus_areas": ["Cloud experience"],
  "remarks": "One or two sentences summarizing the fit.",
  "recommendation": "hire | consider | reject"
}

HARD RULES:
1. Return exactly one entry in "criteria" per criterion id listed above. Do not add, rename or omit ids.
2. "score" is a number from 0 (no evidence) to 10 (exceeds the requirement).
3. Quote or paraphrase concrete evidence from the resume. If there is none, say so and score low.
4. Do NOT reward keyword stuffing without supporting experience.

{json_only}"#;

/// Role-type scoring emphasis. Qualitative guidance only.
pub const TECHNICAL_GUIDANCE: &str = "Technical role: weigh hard skills most heavily. \
    Look for depth in the named languages, frameworks and tools, and for shipped systems.";

pub const BUSINESS_GUIDANCE: &str = "Business or management role: weigh soft skills and \
    experience requirements most heavily. Look for leadership scope, stakeholder management \
    and measurable business outcomes.";

pub const CREATIVE_GUIDANCE: &str = "Creative role: weigh portfolio evidence and tooling \
    proficiency most heavily. Look for published work, design process and the named tools.";

pub const BALANCED_GUIDANCE: &str = "Balanced evaluation: give hard skills, soft skills and \
    experience requirements comparable attention.";

/// Interview invitation prompt template.
/// Replace: {candidate_name}, {position}, {score}, {strengths}, {focus_areas}
pub const INTERVIEW_PROMPT_TEMPLATE: &str = r#"TASK: Compose a personalized interview invitation email
ROLE: Talent Acquisition Specialist
TONE: Warm, professional, enthusiastic

CANDIDATE: {candidate_name}
POSITION: {position}
EVALUATION SCORE: {score}/100
STRENGTHS: {strengths}
INTERVIEW FOCUS AREAS: {focus_areas}

EMAIL COMPONENTS:
1. Personalized greeting with candidate name
2. Specific compliment referencing their experience or skills
3. Interview details (duration, format, participants)
4. Topics to expect, drawn from the focus areas
5. Next steps and contact information
6. Professional closing

FORMATTING: clear subject line with the position title, short paragraphs."#;

/// Rejection email prompt template.
/// Replace: {candidate_name}, {position}, {feedback_note}
pub const REJECTION_PROMPT_TEMPLATE: &str = r#"TASK: Compose a compassionate rejection email
ROLE: HR Business Partner
TONE: Professional, kind, future-oriented

CANDIDATE: {candidate_name}
POSITION: {position}
{feedback_note}

EMAIL COMPONENTS:
1. Appreciation for their time and interest
2. Gentle notification of the decision
3. Encouragement to apply for future positions
4. Best wishes for their job search

GUIDELINES:
- Avoid generic phrases like "we had many qualified applicants"
- Don't make false promises
- No specific criticism of the candidate
- Be concise but compassionate"#;
