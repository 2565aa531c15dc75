use crate::models::exam::{ExamDocument, GradingResult};
use crate::services::grading_service::GradingService;

/// In-browser exam lifecycle as a pure state machine. The only network call
/// a client makes is the generation request itself; answering and grading
/// happen locally against the immutable `ExamDocument`.
#[derive(Debug, Clone)]
pub enum ExamSession {
    Configuring { error: Option<String> },
    Generating,
    Reviewing(ReviewState),
}

#[derive(Debug, Clone)]
pub struct ReviewState {
    pub exam: ExamDocument,
    pub answers: Vec<Option<usize>>,
    pub grade: Option<GradingResult>,
}

impl Default for ExamSession {
    fn default() -> Self {
        ExamSession::Configuring { error: None }
    }
}

impl ExamSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leaves `Configuring` only when there is something to generate from.
    pub fn begin_generation(&mut self, source_text: &str) {
        if let ExamSession::Configuring { error } = self {
            if source_text.trim().is_empty() {
                *error = Some("Temario requerido".to_string());
            } else {
                *self = ExamSession::Generating;
            }
        }
    }

    pub fn generation_succeeded(&mut self, exam: ExamDocument) {
        if matches!(self, ExamSession::Generating) {
            let answers = vec![None; exam.questions.len()];
            *self = ExamSession::Reviewing(ReviewState {
                exam,
                answers,
                grade: None,
            });
        }
    }

    /// Back to configuration; entered parameters live outside the machine
    /// and are untouched.
    pub fn generation_failed(&mut self, message: String) {
        if matches!(self, ExamSession::Generating) {
            *self = ExamSession::Configuring {
                error: Some(message),
            };
        }
    }

    /// Records one selection. Ignored outside review and after grading.
    pub fn select_choice(&mut self, question: usize, choice: usize) {
        if let ExamSession::Reviewing(review) = self {
            if review.grade.is_some() {
                return;
            }
            if let Some(slot) = review.answers.get_mut(question) {
                *slot = Some(choice);
            }
        }
    }

    pub fn grade(&mut self) -> Option<GradingResult> {
        if let ExamSession::Reviewing(review) = self {
            let result = GradingService::grade(&review.exam, &review.answers);
            review.grade = Some(result);
            return Some(result);
        }
        None
    }

    /// Discards the exam and any answers.
    pub fn reset(&mut self) {
        *self = ExamSession::Configuring { error: None };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::exam::{Difficulty, Question};

    fn exam(questions: usize) -> ExamDocument {
        ExamDocument {
            title: "Examen - 1º".into(),
            difficulty: Difficulty::Media,
            questions: (0..questions)
                .map(|i| Question {
                    id: i as u32 + 1,
                    question: format!("Pregunta {}", i + 1),
                    choices: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    answer_index: 2,
                    explanation: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn blank_source_text_stays_configuring_with_error() {
        let mut session = ExamSession::new();
        session.begin_generation("   ");
        match &session {
            ExamSession::Configuring { error } => assert!(error.is_some()),
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn happy_path_reaches_graded_review() {
        let mut session = ExamSession::new();
        session.begin_generation("Tema 1: los ríos.");
        assert!(matches!(session, ExamSession::Generating));

        session.generation_succeeded(exam(3));
        match &session {
            ExamSession::Reviewing(review) => {
                assert_eq!(review.answers, vec![None, None, None]);
                assert!(review.grade.is_none());
            }
            other => panic!("unexpected state: {:?}", other),
        }

        session.select_choice(0, 2);
        session.select_choice(2, 1);
        let result = session.grade().unwrap();
        assert_eq!(result.correct, 1);
        assert_eq!(result.total, 3);
    }

    #[test]
    fn generation_failure_returns_to_configuring() {
        let mut session = ExamSession::new();
        session.begin_generation("texto");
        session.generation_failed("No se pudieron generar preguntas.".into());
        match &session {
            ExamSession::Configuring { error } => {
                assert_eq!(error.as_deref(), Some("No se pudieron generar preguntas."));
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn selections_after_grading_are_ignored() {
        let mut session = ExamSession::new();
        session.begin_generation("texto");
        session.generation_succeeded(exam(1));
        session.select_choice(0, 2);
        let before = session.grade().unwrap();

        session.select_choice(0, 0);
        let after = session.grade().unwrap();
        assert_eq!(before, after);
        if let ExamSession::Reviewing(review) = &session {
            assert_eq!(review.answers[0], Some(2));
        }
    }

    #[test]
    fn out_of_range_selection_is_a_no_op() {
        let mut session = ExamSession::new();
        session.begin_generation("texto");
        session.generation_succeeded(exam(1));
        session.select_choice(5, 0);
        if let ExamSession::Reviewing(review) = &session {
            assert_eq!(review.answers, vec![None]);
        }
    }

    #[test]
    fn reset_discards_exam_and_answers() {
        let mut session = ExamSession::new();
        session.begin_generation("texto");
        session.generation_succeeded(exam(2));
        session.reset();
        assert!(matches!(session, ExamSession::Configuring { error: None }));
    }
}
