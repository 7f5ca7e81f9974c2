use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizdesk_server::{app_state::AppState, config::Config, graphql::create_schema, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let schema = create_schema(state.clone());

    log::info!("Starting HTTP server on {}:{}", host, port);
    log::info!("GraphiQL playground: http://{}:{}/graphiql", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(schema.clone()))
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .service(handlers::health_check)
            .service(handlers::health_check_live)
            .service(handlers::health_check_ready)
            .service(handlers::graphql)
            .service(handlers::graphiql)
            .service(handlers::preview_quiz)
            .service(handlers::get_quiz_for_taking)
            .service(handlers::start_quiz)
            .service(handlers::submit_quiz)
            .service(handlers::save_progress)
            .service(handlers::load_progress)
            .service(handlers::clear_progress)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
