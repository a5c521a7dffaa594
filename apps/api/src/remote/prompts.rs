// Prompt constants for the resume analysis client.

/// System prompt for resume analysis — enforces JSON output.
pub const ANALYSIS_SYSTEM: &str = "You are an expert HR recruiter and resume analyzer. \
    Provide detailed, accurate analysis in JSON format. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Analysis prompt template. Replace `{job_title}`, `{job_requirements}` and
/// `{resume_text}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this resume against the job requirements and provide:
1. A match score (0-100%)
2. Key skills found in the resume
3. Matching skills with job requirements
4. Missing skills
5. Overall assessment

Job Title: {job_title}
Job Requirements: {job_requirements}

Resume:
{resume_text}

Respond in JSON format with: { "matchScore": 85, "skills": [], "matchingSkills": [], "missingSkills": [], "assessment": "" }"#;

/// Fills the analysis prompt template.
pub fn build_analysis_prompt(job_title: &str, job_requirements: &str, resume_text: &str) -> String {
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{job_title}", job_title)
        .replace("{job_requirements}", job_requirements)
        .replace("{resume_text}", resume_text)
}
