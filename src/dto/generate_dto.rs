use crate::models::exam::Difficulty;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateExamPayload {
    #[validate(length(min = 1, message = "Curso requerido"))]
    pub course: String,
    pub difficulty: Difficulty,
    #[validate(range(min = 5, max = 50, message = "questionCount fuera de rango"))]
    pub question_count: u32,
    #[validate(range(min = 2, max = 6, message = "optionCount fuera de rango"))]
    pub option_count: u32,
    #[validate(custom(function = "non_blank"))]
    pub source_text: String,
}

fn non_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut err = validator::ValidationError::new("blank");
        err.message = Some("Temario requerido".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackEventRequest {
    pub event: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(text: &str) -> GenerateExamPayload {
        GenerateExamPayload {
            course: "1º".into(),
            difficulty: Difficulty::Media,
            question_count: 10,
            option_count: 4,
            source_text: text.into(),
        }
    }

    #[test]
    fn accepts_wire_field_names() {
        let p: GenerateExamPayload = serde_json::from_value(serde_json::json!({
            "course": "2º",
            "difficulty": "facil",
            "questionCount": 5,
            "optionCount": 3,
            "sourceText": "Los ríos de Europa."
        }))
        .unwrap();
        assert_eq!(p.question_count, 5);
        assert_eq!(p.option_count, 3);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn whitespace_only_source_text_is_invalid() {
        assert!(payload("   \n\t ").validate().is_err());
        assert!(payload("Tema 1: fotosíntesis.").validate().is_ok());
    }

    #[test]
    fn counts_outside_bounds_are_rejected() {
        let mut p = payload("texto");
        p.question_count = 4;
        assert!(p.validate().is_err());
        p.question_count = 51;
        assert!(p.validate().is_err());
        p.question_count = 50;
        p.option_count = 7;
        assert!(p.validate().is_err());
    }
}
