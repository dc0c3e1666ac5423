//! Simulation schedule
//!
//! The whole run is planned up front as an ordered list of `(delay, event)`
//! steps. Planning is pure: the same files, seed and timing always give the
//! same schedule. The simulator only replays it against a clock.
//!
//! For `n` files, file `i` contributes:
//!
//! ```text
//! FileStarted   progress (i + 0.5) * 100 / n   after start/advance delay
//! FileProcessed progress (i + 1)   * 100 / n   after read delay
//! ```
//!
//! followed by `Completed` at exactly 100 and a fixed settle delay.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::Rng;

use super::event::PipelineEvent;
use super::phase::{COMPLETE, INITIALIZING, pick_phase};
use crate::config::SimulatorConfig;
use crate::types::Result;

/// One scheduled event, emitted `delay` time units after the previous step
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub delay: u64,
    pub event: PipelineEvent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub seed: u64,
    pub steps: Vec<Step>,
    /// Wait after the last event before the run resolves
    pub settle: u64,
}

impl Schedule {
    /// Plan a run over `files`. Fails on an invalid `timing`.
    pub fn plan(files: &[String], seed: u64, timing: &SimulatorConfig) -> Result<Self> {
        timing.validate()?;
        Ok(Self::build(files, seed, timing))
    }

    /// Plan with a `timing` that already passed `SimulatorConfig::validate`.
    /// Delay ranges are sampled with `random_range`, which panics on empty ranges.
    pub(crate) fn build(files: &[String], seed: u64, timing: &SimulatorConfig) -> Self {
        let total = files.len();

        if total == 0 {
            return Self {
                seed,
                steps: vec![Step {
                    delay: 0,
                    event: PipelineEvent::Completed {
                        message: COMPLETE,
                        progress: 100.0,
                    },
                }],
                settle: 0,
            };
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut steps = Vec::with_capacity(total * 2 + 2);

        steps.push(Step {
            delay: 0,
            event: PipelineEvent::Started {
                message: INITIALIZING,
                total,
            },
        });

        let mut lead_in = timing.start_delay;
        for (index, file) in files.iter().enumerate() {
            steps.push(Step {
                delay: lead_in,
                event: PipelineEvent::FileStarted {
                    index,
                    total,
                    file: file.clone(),
                    message: pick_phase(&mut rng),
                    progress: progress_at(index as f64 + 0.5, total),
                },
            });

            steps.push(Step {
                delay: rng.random_range(timing.read_delay_min..timing.read_delay_max),
                event: PipelineEvent::FileProcessed {
                    index,
                    total,
                    progress: progress_at((index + 1) as f64, total),
                },
            });

            lead_in = rng.random_range(timing.advance_delay_min..timing.advance_delay_max);
        }

        steps.push(Step {
            delay: lead_in,
            event: PipelineEvent::Completed {
                message: COMPLETE,
                progress: 100.0,
            },
        });

        Self {
            seed,
            steps,
            settle: timing.completion_delay,
        }
    }

    /// Sum of all delays, settle included
    pub fn total_delay(&self) -> u64 {
        self.steps.iter().map(|s| s.delay).sum::<u64>() + self.settle
    }

    pub fn progress_values(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.event.progress()).collect()
    }
}

fn progress_at(completed: f64, total: usize) -> f64 {
    (completed * 100.0 / total as f64).min(100.0)
}
