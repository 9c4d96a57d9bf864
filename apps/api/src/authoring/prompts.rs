// Prompt constants for job description authoring.
// System role comes from llm_client::prompts::HR_PROFESSIONAL.

/// Replace every `{placeholder}` before sending. Missing optional inputs are
/// rendered as "Not specified".
pub const JOB_DESCRIPTION_PROMPT_TEMPLATE: &str = r#"ROLE: Senior HR Content Specialist
TASK: Create a comprehensive, professional job description
FORMAT: Professional business document with clear section headers
TONE: Engaging, professional, and detailed

INPUT PARAMETERS:
- Job Title: {job_title}
- Years of Experience: {years_of_experience}
- Must-have Skills: {must_have_skills}
- Nice-to-have Skills: {nice_to_have_skills}
- Company Name: {company_name}
- Employment Type: {employment_type}
- Industry: {industry}
- Location: {location}
- Salary Range: {salary_range}
- Remote Policy: {remote_policy}

REQUIRED SECTIONS:
1. Company Overview - Brief company background, mission, values, and culture
2. Position Summary - Overall purpose and objectives of the role
3. Key Responsibilities - 5-8 bullet points of primary duties
4. Required Qualifications - Must-have skills, experience, and education
5. Preferred Qualifications - Nice-to-have assets
6. Compensation & Benefits - Salary range, benefits package, perks
7. Application Process - Next steps and timeline

GUIDELINES:
- Use inclusive language and an equal employment opportunity statement
- Highlight growth opportunities and career progression
- Keep paragraphs concise and scannable
- Use action-oriented language for responsibilities"#;
