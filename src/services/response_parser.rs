//! Turns a `generateContent` envelope into a validated question list.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AppError, AppResult};
use crate::models::domain::question::Question;
use crate::models::dto::gemini::GenerateContentResponse;
use crate::models::dto::generated_question::GeneratedQuestion;

static CODE_FENCE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)```(?:json)?").expect("CODE_FENCE_REGEX is a valid regex pattern"));

pub fn extract_generated_text(response: &GenerateContentResponse) -> AppResult<&str> {
    match response.first_text() {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(AppError::EmptyResponse(
            "generation service returned no text".to_string(),
        )),
    }
}

pub fn strip_code_fences(raw: &str) -> String {
    CODE_FENCE_REGEX.replace_all(raw, "").trim().to_string()
}

pub fn parse_generated_questions(cleaned: &str) -> AppResult<Vec<GeneratedQuestion>> {
    match serde_json::from_str::<Vec<GeneratedQuestion>>(cleaned) {
        Ok(questions) => Ok(questions),
        Err(first_err) => {
            // Prose around the array: retry on the outermost brackets.
            let start = cleaned.find('[');
            let end = cleaned.rfind(']');
            match (start, end) {
                (Some(start), Some(end)) if start < end => {
                    serde_json::from_str(&cleaned[start..=end]).map_err(|e| {
                        AppError::ParseError(format!("generated text is not a question array: {}", e))
                    })
                }
                _ => Err(AppError::ParseError(format!(
                    "generated text is not a question array: {}",
                    first_err
                ))),
            }
        }
    }
}

pub fn normalize(generated: Vec<GeneratedQuestion>) -> AppResult<Vec<Question>> {
    generated
        .into_iter()
        .enumerate()
        .map(|(i, question)| question.normalize(i + 1))
        .collect()
}

/// Runs every stage after the network call. On failure the raw text is
/// logged and no questions are returned.
pub fn questions_from_response(response: &GenerateContentResponse) -> AppResult<Vec<Question>> {
    let raw = extract_generated_text(response)?;
    log::debug!("Raw generated text ({} bytes)", raw.len());

    let cleaned = strip_code_fences(raw);
    let result = parse_generated_questions(&cleaned).and_then(normalize);
    if let Err(e) = &result {
        log::warn!("Discarding generated text: {}. Raw text: {}", e, raw);
    }
    result
}
