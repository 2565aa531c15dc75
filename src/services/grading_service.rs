use crate::models::exam::{ExamDocument, GradingResult};

pub struct GradingService;

impl GradingService {
    /// Grades an answer sheet against an exam. A `None` slot is an
    /// unanswered question and never counts as correct. Pure and
    /// deterministic, so regrading the same sheet yields the same result.
    pub fn grade(exam: &ExamDocument, answers: &[Option<usize>]) -> GradingResult {
        let correct = exam
            .questions
            .iter()
            .zip(answers.iter())
            .filter(|(question, answer)| **answer == Some(question.answer_index))
            .count();

        let total = exam.questions.len();
        let percentage = if total == 0 {
            0
        } else {
            ((correct as f64 / total as f64) * 100.0).round() as u32
        };

        GradingResult {
            correct,
            total,
            percentage,
        }
    }
}
