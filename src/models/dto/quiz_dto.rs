use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Question, Quiz};

static LEADING_INTEGER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?\d+)").expect("LEADING_INTEGER is a valid regex pattern")
});

/// Numeric field that the backend may send either as a number or as text.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(i64),
    Float(f64),
    Text(String),
}

impl NumberOrText {
    /// Reads a number the way a browser `parseInt` would: the leading integer of the text.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            NumberOrText::Number(n) => Some(*n),
            NumberOrText::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            NumberOrText::Float(_) => None,
            NumberOrText::Text(text) => LEADING_INTEGER
                .captures(text)
                .and_then(|caps| caps[1].parse().ok()),
        }
    }
}

impl From<i64> for NumberOrText {
    fn from(value: i64) -> Self {
        NumberOrText::Number(value)
    }
}

/// `GET /api/quizzes/{id}` payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuizResponseDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub time_duration: NumberOrText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_quiz: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl QuizResponseDto {
    pub fn into_domain(self, requested_id: i64) -> AppResult<Quiz> {
        let minutes = self.time_duration.as_integer().ok_or_else(|| {
            AppError::ValidationError(format!(
                "time_duration {:?} is not a number of minutes",
                self.time_duration
            ))
        })?;
        let duration_minutes = u32::try_from(minutes).map_err(|_| {
            AppError::ValidationError(format!("time_duration {} is out of range", minutes))
        })?;

        let date_of_quiz = self.date_of_quiz.as_deref().and_then(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| log::warn!("Ignoring unparseable date_of_quiz '{}': {}", raw, e))
                .ok()
        });

        Ok(Quiz {
            id: self.id.unwrap_or(requested_id),
            duration_minutes,
            chapter_name: self.chapter_name,
            subject_name: self.subject_name,
            date_of_quiz,
            remarks: self.remarks,
        })
    }
}

/// One entry of `GET /api/questions?quiz_id={id}`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct QuestionResponseDto {
    #[validate(range(min = 1))]
    pub id: i64,

    #[serde(default)]
    pub question_title: String,

    #[serde(default)]
    pub question_statement: String,

    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,
    #[serde(default)]
    pub option4: Option<String>,

    pub correct_option: NumberOrText,
}

impl TryFrom<QuestionResponseDto> for Question {
    type Error = AppError;

    fn try_from(dto: QuestionResponseDto) -> Result<Self, Self::Error> {
        dto.validate()?;

        if dto.question_statement.trim().is_empty() {
            log::warn!("Question {} has an empty statement", dto.id);
        }

        let correct_option = match dto.correct_option.as_integer() {
            Some(value) => value,
            None => {
                log::warn!(
                    "Question {} has unparseable correct_option {:?}; it can never be answered correctly",
                    dto.id,
                    dto.correct_option
                );
                0
            }
        };
        if !(1..=4).contains(&correct_option) {
            log::warn!(
                "Question {} has correct_option {} outside 1..=4",
                dto.id,
                correct_option
            );
        }

        Ok(Question {
            id: dto.id,
            title: dto.question_title,
            statement: dto.question_statement,
            options: [
                dto.option1.unwrap_or_default(),
                dto.option2.unwrap_or_default(),
                dto.option3.unwrap_or_default(),
                dto.option4.unwrap_or_default(),
            ],
            correct_option,
        })
    }
}

impl From<Question> for QuestionResponseDto {
    fn from(question: Question) -> Self {
        let [option1, option2, option3, option4] = question.options;
        QuestionResponseDto {
            id: question.id,
            question_title: question.title,
            question_statement: question.statement,
            option1: Some(option1),
            option2: Some(option2),
            option3: Some(option3),
            option4: Some(option4),
            correct_option: NumberOrText::Number(question.correct_option),
        }
    }
}
