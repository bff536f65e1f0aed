use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/scores`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct SubmitScoreRequest {
    #[validate(range(min = 1))]
    pub quiz_id: i64,

    #[validate(range(min = 1))]
    pub user_id: i64,

    pub total_scored: u32,
}

/// Query string of `GET /api/questions`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct QuestionsQuery {
    #[validate(range(min = 1))]
    pub quiz_id: i64,
}
