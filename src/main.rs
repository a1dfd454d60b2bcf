use std::{sync::Arc, time::Duration};

use tracing_subscriber::EnvFilter;

use roost_api::{config::Config, db, routes, services::S3UrlSigner, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let pool = db::create_pool(&config.database_url).await?;
    sqlx::migrate!().run(&pool).await?;

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;
    let signer = Arc::new(S3UrlSigner::new(
        aws_sdk_s3::Client::new(&aws_config),
        config.bucket_name.clone(),
        Duration::from_secs(config.url_ttl_seconds),
    ));

    let store = Arc::new(db::PgRentalStore::new(pool));
    let state = AppState::new(store, signer, config.min_available_days);

    let app = routes::create_router(state);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "roost-api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
