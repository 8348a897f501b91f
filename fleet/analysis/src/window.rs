//! Per-train speed accumulation for one tumbling window

use ahash::AHashMap;
use railwatch::domain::TrainAverageSpeed;

/// Accumulates speed samples per train until the window is drained.
#[derive(Debug, Default)]
pub struct SpeedWindow {
    samples: AHashMap<String, Accumulator>,
}

#[derive(Debug, Default)]
struct Accumulator {
    count: u32,
    sum: f64,
}

impl SpeedWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one speed sample for a train.
    pub fn add(&mut self, train_id: &str, speed_kph: f64) {
        let acc = self.samples.entry(train_id.to_owned()).or_default();
        acc.count += 1;
        acc.sum += speed_kph;
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Closes the window: returns the averages and clears the accumulators.
    /// Trains without samples in the window yield nothing.
    pub fn drain(&mut self) -> Vec<TrainAverageSpeed> {
        self.samples
            .drain()
            .map(|(train_id, acc)| TrainAverageSpeed {
                train_id,
                average_speed: acc.sum / f64::from(acc.count),
            })
            .collect()
    }
}
