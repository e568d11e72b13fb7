use tracing_subscriber::EnvFilter;

use essay_qa::api;
use essay_qa::config::Config;
use essay_qa::credentials::{check_api_key, MISSING_KEY_EXIT_CODE, REMEDIATION};
use essay_qa::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Nothing else may run before this gate
    if check_api_key(|key| std::env::var_os(key).is_some()).is_err() {
        eprint!("{REMEDIATION}");
        std::process::exit(MISSING_KEY_EXIT_CODE);
    }

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!("Corpus directory: {}", config.data_dir.display());
    tracing::info!(
        "LLM provider: {} ({}, model {})",
        config.llm.provider,
        config.llm.base_url,
        config.llm.chat_model
    );

    let state = AppState::new(config.clone())?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
