use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Score,
    repositories::ScoreStore,
};

/// Persists finished attempts and looks up the previous score for comparison.
#[derive(Clone)]
pub struct ScoreReporter {
    store: Arc<dyn ScoreStore>,
}

impl ScoreReporter {
    pub fn new(store: Arc<dyn ScoreStore>) -> Self {
        Self { store }
    }

    /// Sends the score to the store. Any failure comes back as `SubmitError`.
    pub async fn persist(&self, quiz_id: i64, user_id: i64, total_scored: u32) -> AppResult<Score> {
        log::info!(
            "Submitting score {} for quiz {} (user {})",
            total_scored,
            quiz_id,
            user_id
        );

        self.store
            .save_score(quiz_id, user_id, total_scored)
            .await
            .map_err(AppError::into_submit_error)?;

        Ok(Score::new(quiz_id, user_id, total_scored))
    }

    pub async fn fetch_latest(&self, quiz_id: i64, user_id: i64) -> AppResult<Option<Score>> {
        let latest = self.store.latest_score(quiz_id, user_id).await?;

        match &latest {
            Some(score) => log::debug!(
                "Latest score for quiz {} (user {}) is {}",
                quiz_id,
                user_id,
                score.total_scored
            ),
            None => log::debug!("No previous score for quiz {} (user {})", quiz_id, user_id),
        }

        Ok(latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockScoreStore;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn persist_forwards_to_store() {
        let mut store = MockScoreStore::new();
        store
            .expect_save_score()
            .with(eq(3), eq(42), eq(2))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let reporter = ScoreReporter::new(Arc::new(store));
        let score = reporter.persist(3, 42, 2).await.unwrap();

        assert_eq!(score.quiz_id, 3);
        assert_eq!(score.user_id, 42);
        assert_eq!(score.total_scored, 2);
    }

    #[tokio::test]
    async fn persist_failure_is_a_submit_error() {
        let mut store = MockScoreStore::new();
        store
            .expect_save_score()
            .returning(|_, _, _| Err(AppError::HttpError("connection reset".to_string())));

        let reporter = ScoreReporter::new(Arc::new(store));
        let err = reporter.persist(3, 42, 2).await.unwrap_err();

        assert_eq!(
            err,
            AppError::SubmitError("HTTP error: connection reset".to_string())
        );
    }

    #[tokio::test]
    async fn fetch_latest_without_history_is_none() {
        let mut store = MockScoreStore::new();
        store.expect_latest_score().returning(|_, _| Ok(None));

        let reporter = ScoreReporter::new(Arc::new(store));

        assert_eq!(reporter.fetch_latest(3, 42).await, Ok(None));
    }

    #[tokio::test]
    async fn fetch_latest_distinguishes_zero_from_none() {
        let mut store = MockScoreStore::new();
        store
            .expect_latest_score()
            .returning(|quiz_id, user_id| Ok(Some(Score::new(quiz_id, user_id, 0))));

        let reporter = ScoreReporter::new(Arc::new(store));
        let latest = reporter.fetch_latest(3, 42).await.unwrap();

        assert_eq!(latest.map(|s| s.total_scored), Some(0));
    }
}
