mod api;
mod middleware;
mod scheduler;

use tracing_subscriber::EnvFilter;

use revq_chains::PineconeClient;
use revq_llm::GeminiClient;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = revq_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = revq_db::PoolConfig::from_app_config(&config);
    let pool = revq_db::connect_pool(&config.database_url, pool_config).await?;
    revq_db::run_migrations(&pool).await?;

    let llm = GeminiClient::new(
        &config.gemini_api_key,
        &config.generation_model,
        &config.embedding_model,
        config.llm_timeout_secs,
    )?;
    let vectors = PineconeClient::new(&config.pinecone_index_host, &config.pinecone_api_key);

    let _scheduler = scheduler::build_scheduler(pool.clone(), llm.clone()).await?;

    let app = build_app(AppState {
        pool,
        llm,
        vectors,
        classification_buckets: config.classification_buckets.clone(),
    });

    tracing::info!(addr = %config.bind_addr, env = %config.env, "starting revq server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
