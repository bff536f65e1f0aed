use actix_web::{get, web, HttpResponse};
use validator::Validate;

use crate::{app_state::AppState, errors::AppError, models::dto::request::QuestionsQuery};

#[get("/api/quizzes/{id}")]
async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let quiz = state
        .backend
        .quiz(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[get("/api/questions")]
async fn list_questions(
    state: web::Data<AppState>,
    query: web::Query<QuestionsQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;
    let questions = state.backend.questions(query.quiz_id).await;
    Ok(HttpResponse::Ok().json(questions))
}
