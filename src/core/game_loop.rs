//! Two-cadence run loop.
//!
//! The host calls the engine once per rendered frame. The loop turns each
//! frame delta into an ordered task list: one `StatusTick` for every whole
//! second that elapsed, always ahead of the frame's own turn resolution.

use super::constants::STATUS_TICK_INTERVAL_MS;

/// A unit of work for one engine update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopTask {
    /// 1 Hz: statuses, passive regeneration, stamina.
    StatusTick,
    /// Per frame: state timers, gauges, turn resolution.
    Frame,
}

/// Accumulates frame time and schedules the 1 Hz task.
#[derive(Debug, Clone, Default)]
pub struct RunLoop {
    second_accumulator_ms: f64,
}

impl RunLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks due after `delta_ms` of (already capped) frame time.
    pub fn due(&mut self, delta_ms: f64) -> Vec<LoopTask> {
        let mut tasks = Vec::new();
        self.second_accumulator_ms += delta_ms.max(0.0);
        while self.second_accumulator_ms >= STATUS_TICK_INTERVAL_MS {
            self.second_accumulator_ms -= STATUS_TICK_INTERVAL_MS;
            tasks.push(LoopTask::StatusTick);
        }
        tasks.push(LoopTask::Frame);
        tasks
    }
}
