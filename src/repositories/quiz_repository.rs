use async_trait::async_trait;

use crate::{
    api::ApiClient,
    errors::{AppError, AppResult},
    models::domain::{Question, Quiz},
    models::dto::quiz_dto::{QuestionResponseDto, QuizResponseDto},
};

/// Read side of the quiz catalog: quiz metadata and its question sequence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizCatalog: Send + Sync {
    async fn fetch_quiz(&self, quiz_id: i64) -> AppResult<Quiz>;
    async fn fetch_questions(&self, quiz_id: i64) -> AppResult<Vec<Question>>;
}

pub struct HttpQuizCatalog {
    api: ApiClient,
}

impl HttpQuizCatalog {
    pub fn new(api: &ApiClient) -> Self {
        Self { api: api.clone() }
    }
}

#[async_trait]
impl QuizCatalog for HttpQuizCatalog {
    async fn fetch_quiz(&self, quiz_id: i64) -> AppResult<Quiz> {
        let dto: QuizResponseDto = self
            .api
            .get_json(&format!("api/quizzes/{}", quiz_id), &[])
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        dto.into_domain(quiz_id)
    }

    async fn fetch_questions(&self, quiz_id: i64) -> AppResult<Vec<Question>> {
        let dtos: Vec<QuestionResponseDto> = self
            .api
            .get_json("api/questions", &[("quiz_id", quiz_id.to_string())])
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Questions for quiz '{}' not found", quiz_id))
            })?;

        log::debug!("Fetched {} questions for quiz {}", dtos.len(), quiz_id);

        dtos.into_iter().map(Question::try_from).collect()
    }
}
