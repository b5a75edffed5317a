//! Periodic trigger for alert evaluation

use std::time::Duration;

use tokio::{sync::watch, task::JoinHandle, time};

use super::evaluator::AlertEvaluator;

/// Owns the timer that drives evaluation passes
pub struct AlertScheduler {
    evaluator: AlertEvaluator,
    interval: Duration,
}

/// Handle to a running scheduler
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl AlertScheduler {
    pub fn new(evaluator: AlertEvaluator, interval: Duration) -> Self {
        Self { evaluator, interval }
    }

    /// Spawn the timer loop. The first pass runs immediately.
    pub fn start(self) -> SchedulerHandle {
        let (shutdown, mut stop) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut interval = time::interval(self.interval);
            interval.set_missed_tick_behavior(time::MissedTickBehavior::Skip);
            tracing::info!("Alert scheduler started, evaluating every {:?}", self.interval);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        self.evaluator.try_run_pass().await;
                    }
                    changed = stop.changed() => {
                        if changed.is_err() || *stop.borrow() {
                            break;
                        }
                    }
                }
            }

            tracing::info!("Alert scheduler stopped");
        });

        SchedulerHandle { shutdown, task }
    }
}

impl SchedulerHandle {
    /// Stop ticking and wait for an in-flight pass to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            tracing::error!("Alert scheduler task failed: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
