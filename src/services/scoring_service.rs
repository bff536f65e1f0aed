use serde::Serialize;

use crate::models::domain::{OptionIndex, Question};

pub const NOT_ANSWERED: &str = "Not Answered";

/// How one question of a finished attempt turned out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionReview {
    pub position: usize,
    pub question_id: i64,
    pub statement: String,
    pub selected: Option<OptionIndex>,
    pub selected_text: String,
    pub correct_text: String,
    pub is_correct: bool,
}

pub struct Scorer;

impl Scorer {
    /// Number of positions whose answer equals the question's correct option.
    ///
    /// Answers beyond the question list are ignored and missing answers count as unanswered.
    pub fn compute(questions: &[Question], answers: &[Option<OptionIndex>]) -> u32 {
        questions
            .iter()
            .enumerate()
            .filter(|(i, question)| question.is_correct(answers.get(*i).copied().flatten()))
            .count() as u32
    }

    /// Per-question breakdown shown on the results screen.
    pub fn review(questions: &[Question], answers: &[Option<OptionIndex>]) -> Vec<QuestionReview> {
        questions
            .iter()
            .enumerate()
            .map(|(position, question)| {
                let selected = answers.get(position).copied().flatten();
                QuestionReview {
                    position,
                    question_id: question.id,
                    statement: question.statement.clone(),
                    selected,
                    selected_text: Self::option_label(question, selected),
                    correct_text: Self::option_label(question, question.correct_option_index()),
                    is_correct: question.is_correct(selected),
                }
            })
            .collect()
    }

    fn option_label(question: &Question, option: Option<OptionIndex>) -> String {
        match option {
            None => NOT_ANSWERED.to_string(),
            Some(index) => question
                .option_text(index)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Option {}", index)),
        }
    }
}
