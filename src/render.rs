//! Plain-text rendering of attempt screens for the terminal runner.

use crate::models::domain::{Attempt, Score};
use crate::services::{AttemptOutcome, SubmitTrigger};

pub fn format_remaining(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn render_question(attempt: &Attempt, remaining_seconds: u32) -> String {
    let question = attempt.current_question();
    let selected = attempt.current_answer();

    let mut out = format!(
        "Question {}/{}    [{}]\n",
        attempt.cursor() + 1,
        attempt.len(),
        format_remaining(remaining_seconds)
    );
    if !question.title.is_empty() {
        out.push_str(&format!("{}\n", question.title));
    }
    out.push_str(&format!("{}\n\n", question.statement));

    for (index, text) in question.offered_options() {
        let marker = if selected == Some(index) { "x" } else { " " };
        out.push_str(&format!("  [{}] {}. {}\n", marker, index, text));
    }

    let mut hints = vec!["1-4 answer"];
    if attempt.has_previous() {
        hints.push("p previous");
    }
    if attempt.is_last() {
        hints.push("s submit");
    } else {
        hints.push("n next");
    }
    hints.push("g <n> go to");
    hints.push("q quit");
    out.push_str(&format!("\n{}\n", hints.join(" | ")));
    out
}

/// "Previous best" line; a missing score reads differently from a score of zero.
pub fn render_previous(previous: Option<&Score>) -> String {
    match previous {
        Some(score) => format!("Your previous best score: {}", score.total_scored),
        None => "No previous score for this quiz.".to_string(),
    }
}

pub fn render_outcome(outcome: &AttemptOutcome) -> String {
    let mut out = String::from("Quiz Completed!\n");
    if outcome.trigger == SubmitTrigger::TimerExpired {
        out.push_str("Time is up, your answers were submitted automatically.\n");
    }
    out.push_str(&format!(
        "Total Score: {} / {}\n",
        outcome.total_scored, outcome.question_count
    ));
    out.push_str(&format!("{}\n", render_previous(outcome.previous.as_ref())));
    if let Some(err) = &outcome.submit_error {
        out.push_str(&format!("Warning: {}\n", err));
    }

    out.push('\n');
    for row in &outcome.review {
        let verdict = if row.is_correct { "Correct" } else { "Wrong" };
        out.push_str(&format!(
            "{:>3}. {}\n     your answer: {} | correct answer: {} | {}\n",
            row.position + 1,
            row.statement,
            row.selected_text,
            row.correct_text,
            verdict
        ));
    }
    out
}

pub fn render_latest_score(quiz_id: i64, latest: Option<&Score>) -> String {
    match latest {
        Some(score) => format!(
            "Your Latest Quiz Score\nQuiz ID: {}\nScore: {}\nAttempted on: {}\n",
            score.quiz_id,
            score.total_scored,
            score.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        None => format!("Quiz ID: {}\nNo scores found for this quiz.\n", quiz_id),
    }
}
