//! Background scheduler for the overdue sweep.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::state::AppState;
use crate::usecase::notification::OverdueSweepUseCase;

/// Run one sweep against the shared state. Errors are logged, never returned.
pub async fn run_once(state: &AppState) {
    let usecase = OverdueSweepUseCase {
        borrows: state.borrow_repo(),
        notifications: state.notification_repo(),
        clock: state.clock(),
    };
    if let Err(e) = usecase.execute().await {
        tracing::error!(error = %e, "overdue sweep failed to list overdue borrows");
    }
}

/// Spawn the sweep loop. The first sweep runs immediately, then once per
/// `interval`. The loop exits when `shutdown` flips to `true` or its sender
/// is dropped.
pub fn spawn(
    state: AppState,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // A sweep that overruns pushes the next one back rather than bursting.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(interval_secs = interval.as_secs(), "overdue sweep scheduled");

        loop {
            tokio::select! {
                biased;

                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("overdue sweep stopped");
                        break;
                    }
                }

                _ = ticker.tick() => {
                    run_once(&state).await;
                }
            }
        }
    })
}
