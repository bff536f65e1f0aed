use std::{collections::HashMap, fs, sync::Arc};

use serde::Deserialize;
use tokio::sync::RwLock;
use validator::Validate;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{score::latest_of, Question, Score},
    models::dto::{
        quiz_dto::{NumberOrText, QuestionResponseDto, QuizResponseDto},
        request::SubmitScoreRequest,
    },
};

/// Seed file layout for the development backend.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedData {
    pub quizzes: Vec<SeedQuiz>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedQuiz {
    pub quiz: QuizResponseDto,
    #[serde(default)]
    pub questions: Vec<QuestionResponseDto>,
}

/// In-memory stand-in for the quiz backend: catalog plus score history.
pub struct DevBackend {
    quizzes: RwLock<HashMap<i64, QuizResponseDto>>,
    questions: RwLock<HashMap<i64, Vec<QuestionResponseDto>>>,
    scores: RwLock<Vec<Score>>,
}

impl DevBackend {
    pub fn from_seed(seed: SeedData) -> AppResult<Self> {
        let mut quizzes = HashMap::new();
        let mut questions = HashMap::new();

        for entry in seed.quizzes {
            let id = entry.quiz.id.ok_or_else(|| {
                AppError::ValidationError("every seeded quiz needs an id".to_string())
            })?;
            entry.quiz.clone().into_domain(id)?;
            for question in &entry.questions {
                Question::try_from(question.clone())?;
            }

            if quizzes.insert(id, entry.quiz).is_some() {
                return Err(AppError::ValidationError(format!(
                    "quiz {} is seeded twice",
                    id
                )));
            }
            questions.insert(id, entry.questions);
        }

        Ok(Self {
            quizzes: RwLock::new(quizzes),
            questions: RwLock::new(questions),
            scores: RwLock::new(Vec::new()),
        })
    }

    pub fn from_seed_file(path: &str) -> AppResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(format!("cannot read seed file '{}': {}", path, e))
        })?;
        let seed: SeedData = serde_json::from_str(&raw)?;
        Self::from_seed(seed)
    }

    /// One five-minute general knowledge quiz with id 1.
    pub fn demo() -> Self {
        let question = |id: i64, title: &str, statement: &str, options: [&str; 4], correct: i64| {
            QuestionResponseDto {
                id,
                question_title: title.to_string(),
                question_statement: statement.to_string(),
                option1: Some(options[0].to_string()),
                option2: Some(options[1].to_string()),
                option3: Some(options[2].to_string()),
                option4: Some(options[3].to_string()),
                correct_option: NumberOrText::Number(correct),
            }
        };

        let seed = SeedData {
            quizzes: vec![SeedQuiz {
                quiz: QuizResponseDto {
                    id: Some(1),
                    time_duration: NumberOrText::Text("5".to_string()),
                    chapter_name: Some("Warm-up".to_string()),
                    subject_name: Some("General Knowledge".to_string()),
                    date_of_quiz: None,
                    remarks: Some("Demo quiz".to_string()),
                },
                questions: vec![
                    question(1, "Geography", "What is the capital of France?", ["Berlin", "Paris", "Madrid", "Rome"], 2),
                    question(2, "Arithmetic", "What is 7 x 6?", ["36", "42", "48", "54"], 2),
                    question(3, "Science", "Which gas do plants absorb?", ["Oxygen", "Nitrogen", "Carbon dioxide", "Helium"], 3),
                    question(4, "Astronomy", "Which planet is largest?", ["Mars", "Venus", "Earth", "Jupiter"], 4),
                ],
            }],
        };

        match Self::from_seed(seed) {
            Ok(backend) => backend,
            Err(err) => unreachable!("built-in demo seed is invalid: {}", err),
        }
    }

    pub async fn quiz(&self, quiz_id: i64) -> Option<QuizResponseDto> {
        self.quizzes.read().await.get(&quiz_id).cloned()
    }

    /// Questions of a quiz; unknown quizzes simply have none.
    pub async fn questions(&self, quiz_id: i64) -> Vec<QuestionResponseDto> {
        self.questions
            .read()
            .await
            .get(&quiz_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn record_score(&self, request: SubmitScoreRequest) -> AppResult<Score> {
        request.validate()?;
        if !self.quizzes.read().await.contains_key(&request.quiz_id) {
            return Err(AppError::NotFound(format!(
                "Quiz with id '{}' not found",
                request.quiz_id
            )));
        }

        let score = Score::new(request.quiz_id, request.user_id, request.total_scored);
        self.scores.write().await.push(score.clone());
        Ok(score)
    }

    pub async fn latest_score(&self, quiz_id: i64, user_id: i64) -> Option<Score> {
        let scores = self.scores.read().await;
        latest_of(
            scores
                .iter()
                .filter(|s| s.quiz_id == quiz_id && s.user_id == user_id),
        )
        .cloned()
    }

    pub async fn score_count(&self) -> usize {
        self.scores.read().await.len()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<DevBackend>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let backend = match &config.dev_server_seed_file {
            Some(path) => {
                log::info!("Seeding development backend from {}", path);
                DevBackend::from_seed_file(path)?
            }
            None => {
                log::info!("Seeding development backend with the demo quiz");
                DevBackend::demo()
            }
        };

        Ok(Self {
            backend: Arc::new(backend),
            config: Arc::new(config),
        })
    }

    pub fn with_backend(config: Config, backend: DevBackend) -> Self {
        Self {
            backend: Arc::new(backend),
            config: Arc::new(config),
        }
    }
}
