use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use flight_booking::config::AppConfig;
use flight_booking::handlers;
use flight_booking::services::recognizer::luis::LuisRecognizer;
use flight_booking::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    anyhow::ensure!(
        config.is_luis_configured(),
        "LUIS_APP_ID and LUIS_API_KEY must be set"
    );
    tracing::info!("using LUIS recognizer (host: {})", config.luis_api_host_name);

    let recognizer = LuisRecognizer::new(
        config.luis_app_id.clone(),
        config.luis_api_key.clone(),
        config.luis_api_host_name.clone(),
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        recognizer: Box::new(recognizer),
    });

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
