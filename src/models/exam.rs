use serde::{Deserialize, Serialize};

/// One multiple-choice question as delivered to the client.
///
/// `id` is reassigned to the 1-based position in the final exam by the
/// aggregation step; whatever the model put there is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub id: u32,
    pub question: String,
    pub choices: Vec<String>,
    #[serde(rename = "answerIndex")]
    pub answer_index: usize,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Facil,
    Media,
    Dificil,
}

impl Difficulty {
    /// Cognitive-level descriptor interpolated into the user prompt.
    pub fn prompt_descriptor(&self) -> &'static str {
        match self {
            Difficulty::Facil => "básicos y conceptos fundamentales",
            Difficulty::Media => "comprensión, aplicación y análisis de conceptos",
            Difficulty::Dificil => {
                "análisis profundo, síntesis y pensamiento crítico a nivel universitario"
            }
        }
    }

    /// Stable key used by the analytics counters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Facil => "facil",
            Difficulty::Media => "media",
            Difficulty::Dificil => "dificil",
        }
    }
}

/// Immutable result of one successful generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamDocument {
    pub title: String,
    pub difficulty: Difficulty,
    pub questions: Vec<Question>,
}

/// Outcome of grading an answer sheet against an exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingResult {
    pub correct: usize,
    pub total: usize,
    pub percentage: u32,
}
