// LLM prompt constants for the Screening module.
// Placeholders in `{braces}` are replaced before sending.

/// System prompt for interview question generation.
pub const INTERVIEW_QUESTIONS_SYSTEM: &str = "You are a helpful recruitment assistant.";

/// Interview question prompt. Replace `{candidate_name}`, `{missing_skills}`
/// and `{jd_excerpt}` before sending.
pub const INTERVIEW_QUESTIONS_PROMPT: &str = r#"You are an expert technical recruiter.
Candidate Name: {candidate_name}
Missing Skills: {missing_skills}

Job Description:
{jd_excerpt}... (truncated)

Task:
Generate 3 specific technical interview questions to test the candidate's knowledge on the missing skills.
Focus on practical scenarios.
Output format: Numbered list."#;

/// System prompt for résumé improvement suggestions.
pub const IMPROVEMENTS_SYSTEM: &str = "You are an expert resume coach.";

/// Improvement prompt. Replace `{resume_excerpt}` and `{jd_excerpt}` before sending.
pub const IMPROVEMENTS_PROMPT: &str = r#"Analyze this resume against the JD.
Resume: {resume_excerpt}
JD: {jd_excerpt}

Provide 3 concrete bullet points on how the candidate can improve their resume to better match this job."#;
