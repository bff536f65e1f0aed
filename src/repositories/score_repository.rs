use async_trait::async_trait;
use validator::Validate;

use crate::{
    api::ApiClient,
    errors::AppResult,
    models::domain::Score,
    models::dto::{request::SubmitScoreRequest, response::LatestScoreResponse},
};

/// Durable score history owned by the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn save_score(&self, quiz_id: i64, user_id: i64, total_scored: u32) -> AppResult<()>;

    /// Most recent score for the pair, `None` when the user never attempted the quiz.
    async fn latest_score(&self, quiz_id: i64, user_id: i64) -> AppResult<Option<Score>>;
}

pub struct HttpScoreStore {
    api: ApiClient,
}

impl HttpScoreStore {
    pub fn new(api: &ApiClient) -> Self {
        Self { api: api.clone() }
    }
}

#[async_trait]
impl ScoreStore for HttpScoreStore {
    async fn save_score(&self, quiz_id: i64, user_id: i64, total_scored: u32) -> AppResult<()> {
        let request = SubmitScoreRequest {
            quiz_id,
            user_id,
            total_scored,
        };
        request.validate()?;

        self.api.post_json("api/scores", &request).await
    }

    async fn latest_score(&self, quiz_id: i64, user_id: i64) -> AppResult<Option<Score>> {
        let response: Option<LatestScoreResponse> = self
            .api
            .get_json(&format!("api/scores/latest/{}/{}", quiz_id, user_id), &[])
            .await?;

        response.map(|r| r.into_domain(user_id)).transpose()
    }
}
