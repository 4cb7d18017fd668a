//! LLM-backed follow-ups keyed off a screening result: interview questions
//! for missing required skills and résumé improvement suggestions.

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::screening::prompts::{
    IMPROVEMENTS_PROMPT, IMPROVEMENTS_SYSTEM, INTERVIEW_QUESTIONS_PROMPT,
    INTERVIEW_QUESTIONS_SYSTEM,
};

pub const NO_MISSING_SKILLS_MESSAGE: &str =
    "No missing skills identified. Ready for general interview!";

const JD_EXCERPT_CHARS: usize = 1000;
const RESUME_EXCERPT_CHARS: usize = 2000;

/// Generates three interview questions targeting `missing_skills`.
/// Returns a fixed message without calling the LLM when nothing is missing.
pub async fn generate_interview_questions(
    llm: &LlmClient,
    candidate_name: &str,
    missing_skills: &[String],
    jd_text: &str,
) -> Result<String, AppError> {
    if missing_skills.is_empty() {
        return Ok(NO_MISSING_SKILLS_MESSAGE.to_string());
    }

    let prompt = build_interview_prompt(candidate_name, missing_skills, jd_text);
    llm.call_text(&prompt, INTERVIEW_QUESTIONS_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Interview question generation failed: {e}")))
}

/// Suggests three concrete résumé improvements for the given JD.
pub async fn suggest_improvements(
    llm: &LlmClient,
    resume_text: &str,
    jd_text: &str,
) -> Result<String, AppError> {
    let prompt = build_improvements_prompt(resume_text, jd_text);
    llm.call_text(&prompt, IMPROVEMENTS_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Suggestion generation failed: {e}")))
}

fn build_interview_prompt(candidate_name: &str, missing_skills: &[String], jd_text: &str) -> String {
    render(
        INTERVIEW_QUESTIONS_PROMPT,
        &[
            ("candidate_name", candidate_name),
            ("missing_skills", &missing_skills.join(", ")),
            ("jd_excerpt", excerpt(jd_text, JD_EXCERPT_CHARS)),
        ],
    )
}

fn build_improvements_prompt(resume_text: &str, jd_text: &str) -> String {
    render(
        IMPROVEMENTS_PROMPT,
        &[
            ("resume_excerpt", excerpt(resume_text, RESUME_EXCERPT_CHARS)),
            ("jd_excerpt", excerpt(jd_text, JD_EXCERPT_CHARS)),
        ],
    )
}

/// Fills `{name}` placeholders in a single pass over `template`.
/// Substituted values are copied verbatim and never rescanned.
fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after_brace = &rest[start + 1..];

        let hit = vars.iter().find(|(key, _)| {
            after_brace
                .strip_prefix(*key)
                .is_some_and(|tail| tail.starts_with('}'))
        });

        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &after_brace[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after_brace;
            }
        }
    }

    out.push_str(rest);
    out
}

/// First `max_chars` characters of `text`, cut on a char boundary.
fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
