use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{oneshot, watch};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Attempt, AttemptState, AttemptToken, Quiz, Score, UserContext},
    repositories::QuizCatalog,
    services::{
        score_reporter_service::ScoreReporter,
        scoring_service::{QuestionReview, Scorer},
        timer_service::{CountdownTimer, TimerHandle},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SubmitTrigger {
    Manual,
    TimerExpired,
}

/// Result of a submitted attempt. The score is always present, even when saving it failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptOutcome {
    pub token: AttemptToken,
    pub quiz_id: i64,
    pub user_id: i64,
    pub total_scored: u32,
    pub question_count: usize,
    pub review: Vec<QuestionReview>,
    /// Latest score recorded before this attempt; `None` means no earlier attempt.
    pub previous: Option<Score>,
    pub submit_error: Option<AppError>,
    pub trigger: SubmitTrigger,
}

impl AttemptOutcome {
    pub fn is_persisted(&self) -> bool {
        self.submit_error.is_none()
    }
}

/// Drives one quiz attempt from load to submission.
///
/// The countdown task is the only writer of the remaining-seconds channel; the session only
/// reads it. Dropping the session cancels the countdown.
pub struct QuizSession {
    catalog: Arc<dyn QuizCatalog>,
    reporter: ScoreReporter,
    timer: CountdownTimer,
    user: UserContext,
    state: AttemptState,
    quiz: Option<Quiz>,
    attempt: Option<Attempt>,
    countdown: Option<TimerHandle>,
    remaining: watch::Receiver<u32>,
    expiry: Option<oneshot::Receiver<()>>,
    previous: Option<Option<Score>>,
    outcome: Option<AttemptOutcome>,
}

impl QuizSession {
    pub fn new(catalog: Arc<dyn QuizCatalog>, reporter: ScoreReporter, user: UserContext) -> Self {
        let (_, remaining) = watch::channel(0);
        Self {
            catalog,
            reporter,
            timer: CountdownTimer::default(),
            user,
            state: AttemptState::Loading,
            quiz: None,
            attempt: None,
            countdown: None,
            remaining,
            expiry: None,
            previous: None,
            outcome: None,
        }
    }

    #[must_use]
    pub fn with_timer(mut self, timer: CountdownTimer) -> Self {
        self.timer = timer;
        self
    }

    pub fn state(&self) -> AttemptState {
        self.state
    }

    pub fn user(&self) -> &UserContext {
        &self.user
    }

    pub fn reporter(&self) -> &ScoreReporter {
        &self.reporter
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn attempt(&self) -> Option<&Attempt> {
        self.attempt.as_ref()
    }

    pub fn token(&self) -> Option<AttemptToken> {
        self.attempt.as_ref().map(Attempt::token)
    }

    pub fn outcome(&self) -> Option<&AttemptOutcome> {
        self.outcome.as_ref()
    }

    pub fn remaining_seconds(&self) -> u32 {
        *self.remaining.borrow()
    }

    pub fn is_timer_running(&self) -> bool {
        self.countdown.as_ref().is_some_and(TimerHandle::is_active)
    }

    /// Whether the clock of the running attempt has reached zero. Seeing zero freezes the
    /// attempt even if `expired()` was never polled.
    pub fn time_is_up(&mut self) -> bool {
        if self.state != AttemptState::InProgress || self.remaining_seconds() > 0 {
            return false;
        }
        if let Some(attempt) = self.attempt.as_mut() {
            if attempt.finish() {
                log::info!("Time is up for quiz {}", attempt.quiz_id());
            }
        }
        true
    }

    /// Fetches the quiz and its questions, then starts the countdown.
    ///
    /// # Errors
    ///
    /// `LoadError` when the catalog cannot supply the quiz or any question,
    /// `InvalidState` when an attempt is already running or finished.
    pub async fn load_attempt(&mut self, quiz_id: i64) -> AppResult<&Attempt> {
        if self.state != AttemptState::Loading {
            return Err(AppError::InvalidState(format!(
                "cannot load quiz {} while the attempt is {}",
                quiz_id, self.state
            )));
        }

        log::info!("Loading quiz {} for user {}", quiz_id, self.user.user_id);

        let quiz = self
            .catalog
            .fetch_quiz(quiz_id)
            .await
            .map_err(AppError::into_load_error)?;
        let questions = self
            .catalog
            .fetch_questions(quiz_id)
            .await
            .map_err(AppError::into_load_error)?;

        let attempt = Attempt::new(quiz_id, self.user.user_id, quiz.duration_seconds(), questions)?;

        log::info!(
            "Quiz {} loaded: {} questions, {}s on the clock",
            quiz_id,
            attempt.len(),
            attempt.duration_seconds()
        );

        self.start_countdown(attempt.duration_seconds());
        self.quiz = Some(quiz);
        self.previous = None;
        self.state = AttemptState::InProgress;

        let attempt = self.attempt.insert(attempt);
        Ok(&*attempt)
    }

    fn start_countdown(&mut self, duration_seconds: u32) {
        let (tick_tx, tick_rx) = watch::channel(duration_seconds);
        let (expire_tx, expire_rx) = oneshot::channel();

        let handle = self.timer.start(
            duration_seconds,
            move |remaining| {
                let _ = tick_tx.send(remaining);
            },
            move || {
                let _ = expire_tx.send(());
            },
        );

        self.remaining = tick_rx;
        self.expiry = Some(expire_rx);
        self.countdown = Some(handle);
    }

    fn stop_countdown(&mut self) {
        if let Some(mut handle) = self.countdown.take() {
            handle.cancel();
        }
        self.expiry = None;
    }

    /// Records an answer. Returns whether it was recorded; invalid input is logged and ignored.
    pub fn select_answer(&mut self, position: usize, option: u8) -> bool {
        if self.state != AttemptState::InProgress || self.time_is_up() {
            log::debug!(
                "Ignoring answer for position {} while the attempt is {}",
                position,
                self.state
            );
            return false;
        }
        let Some(attempt) = self.attempt.as_mut() else {
            return false;
        };

        match attempt.select_answer(position, option) {
            Ok(recorded) => recorded,
            Err(err) => {
                log::debug!("{}", err);
                false
            }
        }
    }

    pub fn select_current(&mut self, option: u8) -> bool {
        let position = self.attempt.as_ref().map_or(0, Attempt::cursor);
        self.select_answer(position, option)
    }

    pub fn go_to(&mut self, position: usize) -> usize {
        self.attempt.as_mut().map_or(0, |a| a.go_to(position))
    }

    pub fn next(&mut self) -> usize {
        self.attempt.as_mut().map_or(0, Attempt::next)
    }

    pub fn previous(&mut self) -> usize {
        self.attempt.as_mut().map_or(0, Attempt::previous)
    }

    /// Resolves once the countdown reaches zero. Never resolves when no countdown is pending,
    /// so it can sit in a `select!` next to user input.
    pub async fn expired(&mut self) {
        if let Some(rx) = self.expiry.as_mut() {
            let fired = rx.await.is_ok();
            self.expiry = None;
            if fired {
                log::info!("Time is up");
                return;
            }
        }
        futures::future::pending::<()>().await
    }

    /// Stores a "previous score" lookup made outside the session.
    ///
    /// Ignored unless `token` still names the running attempt, so late responses for an
    /// abandoned attempt cannot leak into a new one.
    pub fn apply_previous_score(&mut self, token: AttemptToken, previous: Option<Score>) -> bool {
        if self.state != AttemptState::InProgress || self.token() != Some(token) {
            log::debug!("Discarding stale previous-score response");
            return false;
        }
        self.previous = Some(previous);
        true
    }

    pub async fn submit(&mut self) -> AppResult<AttemptOutcome> {
        self.finish(SubmitTrigger::Manual).await
    }

    pub async fn submit_on_expiry(&mut self) -> AppResult<AttemptOutcome> {
        self.finish(SubmitTrigger::TimerExpired).await
    }

    /// One-way transition to `Completed`. Later calls hand back the recorded outcome and
    /// never persist again.
    async fn finish(&mut self, trigger: SubmitTrigger) -> AppResult<AttemptOutcome> {
        match self.state {
            AttemptState::InProgress => {}
            AttemptState::Completed => {
                log::debug!("Attempt already submitted, ignoring {:?} submit", trigger);
                return self.outcome.clone().ok_or_else(|| {
                    AppError::InternalError("completed attempt has no outcome".to_string())
                });
            }
            state => {
                return Err(AppError::InvalidState(format!(
                    "cannot submit while the attempt is {}",
                    state
                )))
            }
        }

        // Expiry that already happened wins over whoever asked to submit.
        let trigger = if self.time_is_up() {
            SubmitTrigger::TimerExpired
        } else {
            trigger
        };

        let attempt = self
            .attempt
            .as_mut()
            .ok_or_else(|| AppError::InternalError("attempt in progress is missing".to_string()))?;
        attempt.finish();

        let token = attempt.token();
        let quiz_id = attempt.quiz_id();
        let user_id = attempt.user_id();
        let question_count = attempt.len();
        let total_scored = Scorer::compute(attempt.questions(), attempt.answers());
        let review = Scorer::review(attempt.questions(), attempt.answers());

        self.state = AttemptState::Submitting;
        self.stop_countdown();

        log::info!(
            "Quiz {} finished ({:?}): {}/{}",
            quiz_id,
            trigger,
            total_scored,
            question_count
        );

        let previous = match self.previous.take() {
            Some(previous) => previous,
            None => self
                .reporter
                .fetch_latest(quiz_id, user_id)
                .await
                .unwrap_or_else(|err| {
                    log::warn!("Could not fetch previous score for quiz {}: {}", quiz_id, err);
                    None
                }),
        };

        let submit_error = match self.reporter.persist(quiz_id, user_id, total_scored).await {
            Ok(_) => None,
            Err(err) => {
                log::warn!("Score for quiz {} was not saved: {}", quiz_id, err);
                Some(err)
            }
        };

        let outcome = AttemptOutcome {
            token,
            quiz_id,
            user_id,
            total_scored,
            question_count,
            review,
            previous,
            submit_error,
            trigger,
        };

        self.outcome = Some(outcome.clone());
        self.state = AttemptState::Completed;
        Ok(outcome)
    }

    /// Leaves the attempt: stops the countdown and drops unsaved answers.
    ///
    /// Returns `false` without changing anything once time is up; an expired attempt has to
    /// go through `submit_on_expiry` instead.
    pub fn abandon(&mut self) -> bool {
        if self.time_is_up() {
            log::info!("Attempt already expired, it will be submitted instead of abandoned");
            return false;
        }
        if self.state == AttemptState::InProgress {
            log::info!(
                "Abandoning attempt for quiz {:?}",
                self.attempt.as_ref().map(Attempt::quiz_id)
            );
        }
        self.stop_countdown();
        self.attempt = None;
        self.quiz = None;
        self.previous = None;
        self.outcome = None;
        self.state = AttemptState::Loading;
        true
    }
}
