pub mod quiz_session_service;
pub mod score_reporter_service;
pub mod scoring_service;
pub mod timer_service;

pub use quiz_session_service::{AttemptOutcome, QuizSession, SubmitTrigger};
pub use score_reporter_service::ScoreReporter;
pub use scoring_service::{QuestionReview, Scorer};
pub use timer_service::{CountdownTimer, TimerHandle};
