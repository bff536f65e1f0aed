pub mod quiz_repository;
pub mod score_repository;

pub use quiz_repository::{HttpQuizCatalog, QuizCatalog};
pub use score_repository::{HttpScoreStore, ScoreStore};

#[cfg(test)]
pub use quiz_repository::MockQuizCatalog;
#[cfg(test)]
pub use score_repository::MockScoreStore;
