use movieshelf::{AppState, config::Config, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movieshelf=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;
    let addr = config.addr;
    tracing::info!(orphan_policy = %config.orphan_policy, "configuration loaded");

    let state = AppState::connect(config).await?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
