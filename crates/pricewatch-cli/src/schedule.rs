//! Recurring scrape runs.
//!
//! One run starts immediately, then a [`JobScheduler`] repeats it on the
//! configured cron expression until the process receives Ctrl-C or SIGTERM.

use std::sync::Arc;

use pricewatch_core::AppConfig;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::scrape;

/// Run the initial scrape, register the cron job, and block until shutdown.
///
/// # Errors
///
/// Returns an error if the cron expression is rejected or the scheduler
/// cannot be started or stopped. Failed scrape runs are logged and do not
/// stop the schedule.
pub(crate) async fn run_schedule(config: AppConfig) -> anyhow::Result<()> {
    let config = Arc::new(config);
    // Cron ticks that land while a run is still going wait for it.
    let run_lock = Arc::new(Mutex::new(()));

    tracing::info!(cron = %config.schedule_cron, "scheduler: running initial scrape");
    scheduled_run(&config, &run_lock).await;

    let mut scheduler = build_scheduler(Arc::clone(&config), Arc::clone(&run_lock)).await?;
    tracing::info!(cron = %config.schedule_cron, "scheduler: waiting for next run");

    shutdown_signal().await;
    scheduler.shutdown().await?;
    Ok(())
}

/// Builds and starts the scheduler with the recurring scrape job.
async fn build_scheduler(
    config: Arc<AppConfig>,
    run_lock: Arc<Mutex<()>>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;
    let cron = config.schedule_cron.clone();

    let job = Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let config = Arc::clone(&config);
        let run_lock = Arc::clone(&run_lock);

        Box::pin(async move {
            scheduled_run(&config, &run_lock).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    Ok(scheduler)
}

async fn scheduled_run(config: &AppConfig, run_lock: &Mutex<()>) {
    let _guard = run_lock.lock().await;
    tracing::info!("scheduler: starting scrape run");
    match scrape::run_scrape(config, true).await {
        Ok(records) => tracing::info!(records, "scheduler: scrape run complete"),
        Err(e) => tracing::error!(error = %e, "scheduler: scrape run failed"),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, stopping scheduler");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_cron_is_accepted() {
        let job = Job::new_async("0 0 9 * * *", |_uuid, _lock| Box::pin(async {}));
        assert!(job.is_ok());
    }

    #[tokio::test]
    async fn malformed_cron_is_rejected() {
        let job = Job::new_async("every morning", |_uuid, _lock| Box::pin(async {}));
        assert!(job.is_err());
    }
}
