//! Background job scheduler.
//!
//! Initialises a [`JobScheduler`] at server startup and registers the two
//! recurring batch tasks. The HTTP trigger routes call the same task
//! functions, so a manual run and a scheduled run behave identically.

use std::sync::Arc;

use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use revq_chains::topics::{DEFAULT_SAMPLE_SIZE, DEFAULT_TOPIC_COUNT};
use revq_chains::{summary, topics};
use revq_llm::GeminiClient;

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process — dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// a job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    pool: PgPool,
    llm: GeminiClient,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;
    let pool = Arc::new(pool);
    let llm = Arc::new(llm);

    register_topics_job(&scheduler, Arc::clone(&pool), Arc::clone(&llm)).await?;
    register_summary_job(&scheduler, pool, llm).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the daily topic-extraction job (04:00 UTC).
async fn register_topics_job(
    scheduler: &JobScheduler,
    pool: Arc<PgPool>,
    llm: Arc<GeminiClient>,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async("0 0 4 * * *", move |_uuid, _lock| {
        let pool = Arc::clone(&pool);
        let llm = Arc::clone(&llm);

        Box::pin(async move {
            tracing::info!("scheduler: starting daily topic extraction");
            run_topics_job(&pool, &llm).await;
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}

/// Register the weekly summary job (Mondays 05:00 UTC).
async fn register_summary_job(
    scheduler: &JobScheduler,
    pool: Arc<PgPool>,
    llm: Arc<GeminiClient>,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async("0 0 5 * * MON", move |_uuid, _lock| {
        let pool = Arc::clone(&pool);
        let llm = Arc::clone(&llm);

        Box::pin(async move {
            tracing::info!("scheduler: starting weekly summary");
            run_summary_job(&pool, &llm).await;
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}

/// Drive one topic-extraction run, logging the outcome.
async fn run_topics_job(pool: &PgPool, llm: &GeminiClient) {
    match topics::extract_and_store_topics(llm, pool, DEFAULT_TOPIC_COUNT, DEFAULT_SAMPLE_SIZE)
        .await
    {
        Ok(stored) => {
            tracing::info!(topics = stored, "scheduler: topic extraction complete");
        }
        Err(e) => {
            tracing::error!(error = %e, "scheduler: topic extraction failed");
        }
    }
}

/// Drive one weekly-summary run, logging the outcome.
async fn run_summary_job(pool: &PgPool, llm: &GeminiClient) {
    match summary::generate_and_store_weekly_summary(llm, pool).await {
        Ok(Some(_)) => {
            tracing::info!("scheduler: weekly summary generated and stored");
        }
        Ok(None) => {
            tracing::info!("scheduler: weekly summary produced no text; nothing stored");
        }
        Err(e) => {
            tracing::error!(error = %e, "scheduler: weekly summary failed");
        }
    }
}
