use std::{process::ExitCode, sync::Arc};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use quizmaster::{
    api::ApiClient,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{AttemptToken, Score, UserContext},
    render,
    repositories::{HttpQuizCatalog, HttpScoreStore},
    services::{AttemptOutcome, CountdownTimer, QuizSession, ScoreReporter},
};

const USAGE: &str = "usage: quizmaster <quiz_id> | quizmaster latest <quiz_id>";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Answer(u8),
    Next,
    Previous,
    GoTo(usize),
    Submit,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?;

    let command = match head {
        "n" => Command::Next,
        "p" => Command::Previous,
        "s" => Command::Submit,
        "q" => Command::Quit,
        "g" => match parts.next().and_then(|n| n.parse::<usize>().ok()) {
            Some(n) if n > 0 => Command::GoTo(n - 1),
            _ => Command::Unknown(line.trim().to_string()),
        },
        other => match other.parse::<u8>() {
            Ok(option) => Command::Answer(option),
            Err(_) => Command::Unknown(other.to_string()),
        },
    };
    Some(command)
}

enum Event {
    Input(Option<String>),
    Expired,
    Interrupted,
    Previous(AttemptToken, Option<Score>),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> AppResult<()> {
    let config = Config::from_env();
    let user_id = config.validate_for_runner()?;

    let api = ApiClient::connect(&config)?;
    let catalog = Arc::new(HttpQuizCatalog::new(&api));
    let reporter = ScoreReporter::new(Arc::new(HttpScoreStore::new(&api)));

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [command, quiz_id] if command == "latest" => {
            show_latest(&reporter, parse_quiz_id(quiz_id)?, user_id).await
        }
        [quiz_id] => {
            let session = QuizSession::new(catalog, reporter, UserContext::new(user_id))
                .with_timer(CountdownTimer::new(config.tick_period()));
            take_quiz(session, parse_quiz_id(quiz_id)?).await
        }
        _ => Err(AppError::ConfigError(USAGE.to_string())),
    }
}

fn parse_quiz_id(raw: &str) -> AppResult<i64> {
    raw.parse()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::ValidationError(format!("'{}' is not a quiz id; {}", raw, USAGE)))
}

async fn show_latest(reporter: &ScoreReporter, quiz_id: i64, user_id: i64) -> AppResult<()> {
    let latest = reporter.fetch_latest(quiz_id, user_id).await?;
    print!("{}", render::render_latest_score(quiz_id, latest.as_ref()));
    Ok(())
}

async fn take_quiz(mut session: QuizSession, quiz_id: i64) -> AppResult<()> {
    let token = session.load_attempt(quiz_id).await?.token();
    if let Some(quiz) = session.quiz() {
        println!("{}\n", quiz.display_name());
    }

    // The lookup runs beside the attempt; its answer is tagged with the attempt token.
    let (previous_tx, mut previous_rx) = mpsc::channel(1);
    let reporter = session.reporter().clone();
    let user_id = session.user().user_id;
    tokio::spawn(async move {
        match reporter.fetch_latest(quiz_id, user_id).await {
            Ok(previous) => {
                let _ = previous_tx.send((token, previous)).await;
            }
            Err(err) => log::warn!("Could not fetch previous score for quiz {}: {}", quiz_id, err),
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    redraw(&session);

    loop {
        let event = tokio::select! {
            line = lines.next_line() => Event::Input(line.map_err(|e| {
                AppError::InternalError(format!("cannot read input: {}", e))
            })?),
            _ = session.expired() => Event::Expired,
            _ = tokio::signal::ctrl_c() => Event::Interrupted,
            Some((token, previous)) = previous_rx.recv() => Event::Previous(token, previous),
        };

        match event {
            Event::Previous(token, previous) => {
                session.apply_previous_score(token, previous);
                continue;
            }
            Event::Expired => {
                println!("\nTime is up!");
                return finish(session.submit_on_expiry().await?);
            }
            Event::Interrupted => return leave(session).await,
            Event::Input(None) => {
                log::info!("Input closed, submitting the attempt");
                return finish(session.submit().await?);
            }
            Event::Input(Some(line)) => match parse_command(&line) {
                None => {}
                Some(Command::Answer(option)) => {
                    if !session.select_current(option) {
                        println!("Option {} cannot be selected here.", option);
                    }
                }
                Some(Command::Next) => {
                    session.next();
                }
                Some(Command::Previous) => {
                    session.previous();
                }
                Some(Command::GoTo(position)) => {
                    session.go_to(position);
                }
                Some(Command::Submit) => return finish(session.submit().await?),
                Some(Command::Quit) => return leave(session).await,
                Some(Command::Unknown(input)) => println!("Unknown command '{}'.", input),
            },
        }

        redraw(&session);
    }
}

/// Quits the attempt, unless the clock already ran out; then the answers are submitted.
async fn leave(mut session: QuizSession) -> AppResult<()> {
    if session.abandon() {
        println!("\nAttempt abandoned, nothing was submitted.");
        return Ok(());
    }
    println!("\nTime is up!");
    finish(session.submit_on_expiry().await?)
}

fn redraw(session: &QuizSession) {
    if let Some(attempt) = session.attempt() {
        println!(
            "{}",
            render::render_question(attempt, session.remaining_seconds())
        );
    }
}

fn finish(outcome: AttemptOutcome) -> AppResult<()> {
    println!("{}", render::render_outcome(&outcome));
    Ok(())
}
