use actix_web::{middleware::Logger, web, App, HttpServer};

use quizmaster::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    let bind = (config.dev_server_host.clone(), config.dev_server_port);
    let state = AppState::new(config).map_err(std::io::Error::other)?;

    log::info!("Starting development backend at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind(bind)?
    .run()
    .await
}
