//! Documentation Pipeline Simulator
//!
//! Replays a [`Schedule`] on a tokio task and streams the events to the host.
//!
//! ## Cancellation
//!
//! The host owns the run through a [`SimulationHandle`]. Dropping the handle
//! or calling [`SimulationHandle::cancel`] aborts the task: pending timers are
//! released and no further events reach the host.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use super::event::PipelineEvent;
use super::schedule::Schedule;
use crate::config::SimulatorConfig;
use crate::constants::simulator::EVENT_BUFFER;
use crate::types::{DocError, Result};

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub seed: u64,
    pub files: usize,
    pub events: usize,
    pub final_progress: f64,
}

pub struct PipelineSimulator {
    config: SimulatorConfig,
}

impl PipelineSimulator {
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Plan a run without starting it
    pub fn plan(&self, files: &[String]) -> Schedule {
        let seed = self.config.seed.unwrap_or_else(rand::random::<u64>);
        Schedule::build(files, seed, &self.config)
    }

    /// Start a run over `files`. Must be called inside a tokio runtime.
    #[instrument(skip(self, files), fields(files = files.len()))]
    pub fn start(&self, files: Vec<String>) -> SimulationHandle {
        let schedule = self.plan(&files);
        let seed = schedule.seed;
        let unit = self.config.time_unit();
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);

        info!(seed, steps = schedule.steps.len(), "Starting documentation pipeline");

        let task = tokio::spawn(replay(schedule, unit, tx));

        SimulationHandle {
            events: rx,
            task,
            seed,
            files: files.len(),
            received: 0,
            last_progress: 0.0,
            cancelled: false,
        }
    }
}

async fn replay(schedule: Schedule, unit: Duration, tx: mpsc::Sender<PipelineEvent>) {
    for step in schedule.steps {
        sleep_units(step.delay, unit).await;

        if let Some(file) = step.event.current_file() {
            debug!(file, progress = step.event.progress(), "Processing file");
        }

        if tx.send(step.event).await.is_err() {
            // Host went away
            return;
        }
    }

    sleep_units(schedule.settle, unit).await;
    debug!("Documentation pipeline settled");
}

async fn sleep_units(units: u64, unit: Duration) {
    if units > 0 {
        let units = u32::try_from(units).unwrap_or(u32::MAX);
        tokio::time::sleep(unit.saturating_mul(units)).await;
    }
}

/// Host-side handle of a running simulation
pub struct SimulationHandle {
    events: mpsc::Receiver<PipelineEvent>,
    task: JoinHandle<()>,
    seed: u64,
    files: usize,
    received: usize,
    last_progress: f64,
    cancelled: bool,
}

impl SimulationHandle {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Next event in order, or `None` once the run has resolved or was
    /// cancelled
    pub async fn next_event(&mut self) -> Option<PipelineEvent> {
        if self.cancelled {
            return None;
        }
        let event = self.events.recv().await?;
        self.received += 1;
        self.last_progress = event.progress();
        Some(event)
    }

    /// Abort the run. Events still buffered are discarded.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            debug!(seed = self.seed, "Cancelling documentation pipeline");
            self.cancelled = true;
            self.task.abort();
            self.events.close();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Drain the remaining events and wait for the run to resolve
    pub async fn wait(mut self) -> Result<SimulationReport> {
        while self.next_event().await.is_some() {}
        self.finish().await
    }

    /// Wait for resolution, passing every remaining event to `on_event`
    pub async fn for_each<F>(mut self, mut on_event: F) -> Result<SimulationReport>
    where
        F: FnMut(&PipelineEvent),
    {
        while let Some(event) = self.next_event().await {
            on_event(&event);
        }
        self.finish().await
    }

    async fn finish(&mut self) -> Result<SimulationReport> {
        if self.cancelled {
            return Err(DocError::Cancelled);
        }

        match (&mut self.task).await {
            Ok(()) => {
                info!(
                    seed = self.seed,
                    events = self.received,
                    "Documentation pipeline complete"
                );
                Ok(SimulationReport {
                    seed: self.seed,
                    files: self.files,
                    events: self.received,
                    final_progress: self.last_progress,
                })
            }
            Err(e) if e.is_cancelled() => Err(DocError::Cancelled),
            Err(e) => Err(DocError::Io(std::io::Error::other(e.to_string()))),
        }
    }

    #[cfg(test)]
    fn abort_handle(&self) -> tokio::task::AbortHandle {
        self.task.abort_handle()
    }
}

impl Drop for SimulationHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
