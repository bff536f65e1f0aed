use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::sync::RwLock;

use quizmaster::{
    errors::{AppError, AppResult},
    models::domain::{score::latest_of, AttemptState, Question, Quiz, Score, UserContext},
    repositories::{QuizCatalog, ScoreStore},
    services::{CountdownTimer, QuizSession, ScoreReporter, SubmitTrigger},
};

struct InMemoryQuizCatalog {
    quizzes: Arc<RwLock<HashMap<i64, (Quiz, Vec<Question>)>>>,
}

impl InMemoryQuizCatalog {
    fn new() -> Self {
        Self {
            quizzes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn insert(&self, quiz: Quiz, questions: Vec<Question>) {
        self.quizzes.write().await.insert(quiz.id, (quiz, questions));
    }
}

#[async_trait]
impl QuizCatalog for InMemoryQuizCatalog {
    async fn fetch_quiz(&self, quiz_id: i64) -> AppResult<Quiz> {
        let quizzes = self.quizzes.read().await;
        quizzes
            .get(&quiz_id)
            .map(|(quiz, _)| quiz.clone())
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))
    }

    async fn fetch_questions(&self, quiz_id: i64) -> AppResult<Vec<Question>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes
            .get(&quiz_id)
            .map(|(_, questions)| questions.clone())
            .unwrap_or_default())
    }
}

struct InMemoryScoreStore {
    scores: Arc<RwLock<Vec<Score>>>,
    offline: bool,
}

impl InMemoryScoreStore {
    fn new() -> Self {
        Self {
            scores: Arc::new(RwLock::new(Vec::new())),
            offline: false,
        }
    }

    fn offline() -> Self {
        Self {
            offline: true,
            ..Self::new()
        }
    }

    async fn saved(&self) -> Vec<u32> {
        self.scores.read().await.iter().map(|s| s.total_scored).collect()
    }
}

#[async_trait]
impl ScoreStore for InMemoryScoreStore {
    async fn save_score(&self, quiz_id: i64, user_id: i64, total_scored: u32) -> AppResult<()> {
        if self.offline {
            return Err(AppError::HttpError("backend unreachable".to_string()));
        }
        self.scores
            .write()
            .await
            .push(Score::new(quiz_id, user_id, total_scored));
        Ok(())
    }

    async fn latest_score(&self, quiz_id: i64, user_id: i64) -> AppResult<Option<Score>> {
        let scores = self.scores.read().await;
        Ok(latest_of(
            scores
                .iter()
                .filter(|s| s.quiz_id == quiz_id && s.user_id == user_id),
        )
        .cloned())
    }
}

fn question(id: i64, correct_option: i64) -> Question {
    Question {
        id,
        title: format!("Question {}", id),
        statement: format!("What is answer {}?", id),
        options: [1, 2, 3, 4].map(|k| format!("Choice {}", k)),
        correct_option,
    }
}

async fn catalog_with_quiz(quiz_id: i64, minutes: u32, correct: &[i64]) -> Arc<InMemoryQuizCatalog> {
    let catalog = InMemoryQuizCatalog::new();
    let questions = correct
        .iter()
        .enumerate()
        .map(|(i, &c)| question(i as i64 + 1, c))
        .collect();
    catalog.insert(Quiz::new(quiz_id, minutes), questions).await;
    Arc::new(catalog)
}

fn session(catalog: Arc<InMemoryQuizCatalog>, store: Arc<InMemoryScoreStore>) -> QuizSession {
    QuizSession::new(catalog, ScoreReporter::new(store), UserContext::new(7))
}

#[tokio::test(start_paused = true)]
async fn test_full_attempt_then_retake_sees_previous_score() {
    let catalog = catalog_with_quiz(3, 10, &[1, 2, 3, 4]).await;
    let store = Arc::new(InMemoryScoreStore::new());

    let mut first = session(catalog.clone(), store.clone());
    first.load_attempt(3).await.unwrap();
    for (position, option) in [1u8, 2, 3, 4].into_iter().enumerate() {
        assert!(first.select_answer(position, option));
    }
    let outcome = first.submit().await.unwrap();

    assert_eq!(outcome.total_scored, 4);
    assert_eq!(outcome.question_count, 4);
    assert!(outcome.previous.is_none());
    assert!(outcome.is_persisted());
    assert_eq!(first.state(), AttemptState::Completed);
    assert!(!first.is_timer_running());

    let mut second = session(catalog, store.clone());
    second.load_attempt(3).await.unwrap();
    second.select_answer(0, 1);
    second.select_answer(2, 3);
    let outcome = second.submit().await.unwrap();

    assert_eq!(outcome.total_scored, 2);
    assert_eq!(outcome.previous.map(|s| s.total_scored), Some(4));
    assert_eq!(store.saved().await, vec![4, 2]);
}

#[tokio::test(start_paused = true)]
async fn test_timer_expiry_submits_selected_answers() {
    let catalog = catalog_with_quiz(5, 1, &[2, 2]).await;
    let store = Arc::new(InMemoryScoreStore::new());

    let mut session = session(catalog, store.clone());
    session.load_attempt(5).await.unwrap();
    session.select_answer(0, 2);

    session.expired().await;
    assert_eq!(session.remaining_seconds(), 0);
    assert!(!session.select_answer(1, 2));

    let outcome = session.submit_on_expiry().await.unwrap();

    assert_eq!(outcome.trigger, SubmitTrigger::TimerExpired);
    assert_eq!(outcome.total_scored, 1);
    assert_eq!(store.saved().await, vec![1]);
}

#[tokio::test(start_paused = true)]
async fn test_manual_submit_wins_over_later_expiry() {
    let catalog = catalog_with_quiz(5, 1, &[1]).await;
    let store = Arc::new(InMemoryScoreStore::new());

    let mut session = session(catalog, store.clone())
        .with_timer(CountdownTimer::new(Duration::from_millis(10)));
    session.load_attempt(5).await.unwrap();
    session.select_answer(0, 1);

    let manual = session.submit().await.unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;
    let late = session.submit_on_expiry().await.unwrap();

    assert_eq!(manual, late);
    assert_eq!(late.trigger, SubmitTrigger::Manual);
    assert_eq!(store.saved().await, vec![1]);
}

#[tokio::test(start_paused = true)]
async fn test_late_manual_submit_is_recorded_as_expiry() {
    let catalog = catalog_with_quiz(5, 1, &[1, 2]).await;
    let store = Arc::new(InMemoryScoreStore::new());

    let mut session = session(catalog, store.clone());
    session.load_attempt(5).await.unwrap();
    session.select_answer(0, 1);

    tokio::time::sleep(Duration::from_secs(61)).await;

    assert!(!session.abandon());
    assert!(session.attempt().unwrap().is_terminal());

    let outcome = session.submit().await.unwrap();

    assert_eq!(outcome.trigger, SubmitTrigger::TimerExpired);
    assert_eq!(outcome.total_scored, 1);
    assert_eq!(store.saved().await, vec![1]);
}

#[tokio::test(start_paused = true)]
async fn test_save_failure_still_reports_score() {
    let catalog = catalog_with_quiz(5, 2, &[1, 2, 3]).await;
    let store = Arc::new(InMemoryScoreStore::offline());

    let mut session = session(catalog, store);
    session.load_attempt(5).await.unwrap();
    session.select_answer(1, 2);
    let outcome = session.submit().await.unwrap();

    assert_eq!(outcome.total_scored, 1);
    assert!(matches!(outcome.submit_error, Some(AppError::SubmitError(_))));
    assert_eq!(session.state(), AttemptState::Completed);
}

#[tokio::test]
async fn test_unknown_quiz_is_a_load_error() {
    let catalog = Arc::new(InMemoryQuizCatalog::new());
    let store = Arc::new(InMemoryScoreStore::new());

    let mut session = session(catalog, store);
    let result = session.load_attempt(404).await;

    assert!(matches!(result, Err(AppError::LoadError(_))));
    assert_eq!(session.state(), AttemptState::Loading);
}

#[tokio::test]
async fn test_quiz_without_questions_is_a_load_error() {
    let catalog = catalog_with_quiz(8, 5, &[]).await;
    let store = Arc::new(InMemoryScoreStore::new());

    let mut session = session(catalog, store.clone());
    let result = session.load_attempt(8).await;

    assert!(matches!(result, Err(AppError::LoadError(_))));
    assert!(store.saved().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_attempt_saves_nothing() {
    let catalog = catalog_with_quiz(5, 1, &[1, 1]).await;
    let store = Arc::new(InMemoryScoreStore::new());

    let mut session = session(catalog, store.clone());
    session.load_attempt(5).await.unwrap();
    session.select_answer(0, 1);
    session.abandon();

    tokio::time::sleep(Duration::from_secs(120)).await;

    assert!(!session.is_timer_running());
    assert_eq!(session.state(), AttemptState::Loading);
    assert!(store.saved().await.is_empty());
}
