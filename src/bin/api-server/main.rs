use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use restaurant_query::{config::Config, db};
use tracing_subscriber::EnvFilter;

mod api;
mod error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(true)
        .with_file(false)
        .init();

    let config = Config::from_env().context("fail to read configuration")?;
    tracing::info!(?config, "starting api server");

    // the store is ready before anything can reach a handler
    let db_pool = db::connect(&config)
        .await
        .with_context(|| format!("fail to open database {}", config.database_url))?;
    let state = web::Data::new(api::ApiState::new(db_pool));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(api::cors())
            .wrap(Logger::default())
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("fail to bind {}:{}", config.host, config.port))?;

    tracing::info!("listening at http://{}:{}", config.host, config.port);
    server.run().await?;
    Ok(())
}
