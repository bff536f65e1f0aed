use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::domain::Score;

/// `GET /api/scores/latest/{quiz_id}/{user_id}` payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LatestScoreResponse {
    pub quiz_id: i64,
    pub total_scored: u32,
    #[serde(alias = "time_stamp_of_attempt")]
    pub timestamp: String,
}

impl LatestScoreResponse {
    pub fn into_domain(self, user_id: i64) -> AppResult<Score> {
        Ok(Score {
            quiz_id: self.quiz_id,
            user_id,
            total_scored: self.total_scored,
            timestamp: parse_timestamp(&self.timestamp)?,
        })
    }
}

impl From<&Score> for LatestScoreResponse {
    fn from(score: &Score) -> Self {
        LatestScoreResponse {
            quiz_id: score.quiz_id,
            total_scored: score.total_scored,
            timestamp: score.timestamp.to_rfc3339(),
        }
    }
}

/// Accepts RFC 3339, HTTP-date (RFC 2822) and naive ISO timestamps, the latter read as UTC.
pub fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| AppError::ValidationError(format!("timestamp '{}': {}", raw, e)))
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_all_backend_timestamp_flavours() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 7, 10, 30, 0).unwrap();

        assert_eq!(parse_timestamp("2025-01-07T10:30:00Z").unwrap(), expected);
        assert_eq!(
            parse_timestamp("Tue, 07 Jan 2025 10:30:00 GMT").unwrap(),
            expected
        );
        assert_eq!(parse_timestamp("2025-01-07T10:30:00.000").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-01-07 10:30:00").unwrap(), expected);
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn latest_score_accepts_model_column_name() {
        let payload = serde_json::json!({
            "quiz_id": 5,
            "total_scored": 3,
            "time_stamp_of_attempt": "2025-01-07T10:30:00Z"
        });

        let response: LatestScoreResponse = serde_json::from_value(payload).unwrap();
        let score = response.into_domain(8).unwrap();

        assert_eq!(score.user_id, 8);
        assert_eq!(score.total_scored, 3);
    }
}
