use crate::error::{Error, Result};
use crate::models::exam::Question;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use serde_json::Value as JsonValue;
use std::sync::OnceLock;

fn json_object_span() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("json span regex"))
}

/// Parses a free-form model reply into validated questions.
///
/// Models rarely return bare JSON: fenced blocks and surrounding prose are
/// stripped first, then a direct parse is attempted, then the widest `{...}`
/// span as a last resort. Anything without a `questions` array is a parse
/// failure and feeds the caller's retry budget.
pub fn parse_questions(raw: &str, rng: &mut impl Rng) -> Result<Vec<Question>> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    let parsed: JsonValue = match serde_json::from_str(cleaned) {
        Ok(val) => val,
        Err(_) => {
            let span = json_object_span()
                .find(cleaned)
                .ok_or_else(|| Error::Parse("Sin objeto JSON en la respuesta".to_string()))?;
            serde_json::from_str(span.as_str())
                .map_err(|e| Error::Parse(format!("JSON extraído inválido: {}", e)))?
        }
    };

    let items = parsed
        .get("questions")
        .and_then(|q| q.as_array())
        .ok_or_else(|| Error::Parse("Falta el array 'questions'".to_string()))?;

    let mut questions = Vec::with_capacity(items.len());
    for item in items {
        let mut question: Question = serde_json::from_value(item.clone())
            .map_err(|e| Error::Parse(format!("Pregunta con estructura inválida: {}", e)))?;
        if question.choices.is_empty() || question.answer_index >= question.choices.len() {
            return Err(Error::Parse("answerIndex fuera de rango".to_string()));
        }
        shuffle_choices(&mut question, rng);
        questions.push(question);
    }

    Ok(questions)
}

/// Removes the model's positional bias by shuffling the choices and chasing
/// the correct answer's text to its new slot. Index 0 is the defensive
/// fallback when the text cannot be found again, which would mean duplicate
/// or mutated choices.
fn shuffle_choices(question: &mut Question, rng: &mut impl Rng) {
    let correct_text = question.choices[question.answer_index].clone();
    question.choices.shuffle(rng);
    question.answer_index = question
        .choices
        .iter()
        .position(|c| c == &correct_text)
        .unwrap_or(0);
}
