use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use std::sync::Arc;

use noor_book_api::app_state::AppState;
use noor_book_api::config::Config;
use noor_book_api::routes;

fn init_logging() {
    if let Err(e) = log4rs::init_file("log4rs.yml", Default::default()) {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::warn!("log4rs.yml not loaded ({}), logging to stderr", e);
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logging();

    let cfg = Config::load();

    let client = cfg
        .http
        .create_http_client()
        .map_err(std::io::Error::other)?;

    info!("Upstream: {}", cfg.base_url());
    info!(
        "  Timeout: {}",
        cfg.http
            .timeout_secs
            .map(|t| format!("{}s", t))
            .unwrap_or_else(|| "none".to_string())
    );
    info!("  User agents in pool: {}", cfg.http.user_agents.len());

    let data = web::Data::new(AppState::new(Arc::new(client), cfg.base_url()));

    let addr = (cfg.host.clone(), cfg.port);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Logger::default())
            .configure(routes::configure)
    })
    .bind(&addr)?;

    info!("Server is running on {}:{}", addr.0, addr.1);
    info!("API available at: http://localhost:{}", addr.1);
    server.run().await
}
