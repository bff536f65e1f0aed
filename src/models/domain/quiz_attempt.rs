use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::quiz_question::{OptionIndex, Question};

/// Lifecycle of a single attempt. Answers only change while `InProgress`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AttemptState {
    Loading,
    InProgress,
    Submitting,
    Completed,
}

impl fmt::Display for AttemptState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AttemptState::Loading => "loading",
            AttemptState::InProgress => "in progress",
            AttemptState::Submitting => "submitting",
            AttemptState::Completed => "completed",
        };
        f.write_str(label)
    }
}

/// Identifies one load of an attempt; responses issued for an older token are stale.
pub type AttemptToken = Uuid;

/// One user's pass through a quiz's questions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attempt {
    token: AttemptToken,
    quiz_id: i64,
    user_id: i64,
    duration_seconds: u32,
    questions: Vec<Question>,
    answers: Vec<Option<OptionIndex>>,
    cursor: usize,
    terminal: bool,
}

impl Attempt {
    pub fn new(
        quiz_id: i64,
        user_id: i64,
        duration_seconds: u32,
        questions: Vec<Question>,
    ) -> AppResult<Self> {
        if questions.is_empty() {
            return Err(AppError::LoadError(format!(
                "quiz {} has no questions",
                quiz_id
            )));
        }

        let answers = vec![None; questions.len()];
        Ok(Attempt {
            token: Uuid::new_v4(),
            quiz_id,
            user_id,
            duration_seconds,
            questions,
            answers,
            cursor: 0,
            terminal: false,
        })
    }

    pub fn token(&self) -> AttemptToken {
        self.token
    }

    pub fn quiz_id(&self) -> i64 {
        self.quiz_id
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<OptionIndex>] {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.cursor]
    }

    pub fn current_answer(&self) -> Option<OptionIndex> {
        self.answers[self.cursor]
    }

    pub fn has_previous(&self) -> bool {
        self.cursor > 0
    }

    pub fn is_last(&self) -> bool {
        self.cursor + 1 == self.questions.len()
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Records `option` at `position`, replacing any earlier choice.
    ///
    /// Returns `Ok(false)` without touching anything once the attempt is terminal.
    pub fn select_answer(&mut self, position: usize, option: u8) -> AppResult<bool> {
        if self.terminal {
            return Ok(false);
        }

        let option = OptionIndex::try_from(option)?;
        let question = self.questions.get(position).ok_or_else(|| {
            AppError::InvalidSelection(format!(
                "position {} is outside 0..{}",
                position,
                self.questions.len()
            ))
        })?;
        if question.option_text(option).is_none() {
            return Err(AppError::InvalidSelection(format!(
                "option {} of question {} is blank",
                option, question.id
            )));
        }

        self.answers[position] = Some(option);
        Ok(true)
    }

    pub fn go_to(&mut self, position: usize) -> usize {
        self.cursor = position.min(self.questions.len() - 1);
        self.cursor
    }

    pub fn next(&mut self) -> usize {
        self.go_to(self.cursor.saturating_add(1))
    }

    pub fn previous(&mut self) -> usize {
        self.go_to(self.cursor.saturating_sub(1))
    }

    /// Marks the attempt terminal. Returns `true` only for the call that made the transition.
    pub(crate) fn finish(&mut self) -> bool {
        !std::mem::replace(&mut self.terminal, true)
    }
}
