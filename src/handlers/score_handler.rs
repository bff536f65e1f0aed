use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::SubmitScoreRequest,
        response::{LatestScoreResponse, MessageResponse},
    },
};

#[get("/api/scores/latest/{quiz_id}/{user_id}")]
async fn latest_score(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
    let (quiz_id, user_id) = path.into_inner();
    let score = state
        .backend
        .latest_score(quiz_id, user_id)
        .await
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No score for quiz '{}' and user '{}'",
                quiz_id, user_id
            ))
        })?;
    Ok(HttpResponse::Ok().json(LatestScoreResponse::from(&score)))
}

#[post("/api/scores")]
async fn submit_score(
    state: web::Data<AppState>,
    request: web::Json<SubmitScoreRequest>,
) -> Result<HttpResponse, AppError> {
    let score = state.backend.record_score(request.into_inner()).await?;
    log::info!(
        "Recorded score {} for quiz {} (user {})",
        score.total_scored,
        score.quiz_id,
        score.user_id
    );
    Ok(HttpResponse::Created().json(MessageResponse {
        message: "Score submitted successfully".to_string(),
    }))
}
