use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Score {
    pub quiz_id: i64,
    pub user_id: i64,
    pub total_scored: u32,
    pub timestamp: DateTime<Utc>,
}

impl Score {
    pub fn new(quiz_id: i64, user_id: i64, total_scored: u32) -> Self {
        Score {
            quiz_id,
            user_id,
            total_scored,
            timestamp: Utc::now(),
        }
    }
}

/// Picks the most recent score of a history, the one shown as "previous best".
pub fn latest_of<'a, I>(scores: I) -> Option<&'a Score>
where
    I: IntoIterator<Item = &'a Score>,
{
    scores.into_iter().max_by_key(|score| score.timestamp)
}
