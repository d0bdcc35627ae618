use std::future::Future;
use tokio::time::{Duration, timeout};
use tracing::{error, warn};

#[derive(Debug)]
pub enum StepOutcome<T, E> {
    Finished(Result<T, E>),
    TimedOut,
    /// The task running the step panicked or was cancelled. Ledger steps
    /// only fail this way before their adjust commits, so no undo runs.
    Aborted(String),
}

/// Runs a ledger step on its own task and waits at most `limit` for it.
///
/// A step that misses the deadline keeps running. If it later turns out to
/// have applied, `undo` is called with its result so the change is reversed.
pub async fn within_deadline<T, E, F, U, UF>(limit: Duration, step: F, undo: U) -> StepOutcome<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
    F: Future<Output = Result<T, E>> + Send + 'static,
    U: FnOnce(T) -> UF + Send + 'static,
    UF: Future<Output = ()> + Send + 'static,
{
    let mut handle = tokio::spawn(step);

    match timeout(limit, &mut handle).await {
        Ok(Ok(result)) => StepOutcome::Finished(result),
        Ok(Err(join_err)) => StepOutcome::Aborted(join_err.to_string()),
        Err(_) => {
            warn!("⏱️ Ledger step exceeded {:?}, watching for a late commit", limit);
            tokio::spawn(async move {
                match handle.await {
                    Ok(Ok(applied)) => {
                        warn!("↩️ Timed out ledger step committed late, reversing it");
                        undo(applied).await;
                    }
                    Ok(Err(_)) => {}
                    Err(e) => error!("💥 Timed out ledger step did not finish: {e}"),
                }
            });
            StepOutcome::TimedOut
        }
    }
}
