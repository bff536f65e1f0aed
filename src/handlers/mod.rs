use actix_web::{get, web, HttpResponse};

pub mod quiz_handler;
pub mod score_handler;

pub use quiz_handler::{get_quiz, list_questions};
pub use score_handler::{latest_score, submit_score};

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Registers every development backend route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(get_quiz)
        .service(list_questions)
        .service(latest_score)
        .service(submit_score);
}
