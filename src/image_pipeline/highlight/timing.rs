//! Wall-clock bookkeeping for the stages of one processed frame.

use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTiming {
    pub stage: &'static str,
    pub elapsed: Duration,
}

/// Stage durations in the order the stages ran.
#[derive(Debug, Clone, Default)]
pub struct PipelineTimings {
    stages: Vec<StageTiming>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `work` and records its duration under `stage`.
    pub fn measure<T>(&mut self, stage: &'static str, work: impl FnOnce() -> T) -> T {
        let started = Instant::now();
        let value = work();
        self.stages.push(StageTiming {
            stage,
            elapsed: started.elapsed(),
        });
        value
    }

    pub fn stages(&self) -> &[StageTiming] {
        &self.stages
    }

    pub fn total(&self) -> Duration {
        self.stages.iter().map(|t| t.elapsed).sum()
    }

    /// Time spent in `stage`, summed if it ran more than once.
    pub fn stage(&self, stage: &str) -> Option<Duration> {
        self.stages
            .iter()
            .filter(|t| t.stage == stage)
            .map(|t| t.elapsed)
            .reduce(|a, b| a + b)
    }

    pub fn log_summary(&self) {
        let total = self.total();
        let total_secs = total.as_secs_f64();
        for t in &self.stages {
            let share = if total_secs > 0.0 {
                100.0 * t.elapsed.as_secs_f64() / total_secs
            } else {
                0.0
            };
            debug!(
                stage = t.stage,
                ms = t.elapsed.as_secs_f64() * 1000.0,
                share_pct = share,
                "Stage timing"
            );
        }
        debug!(ms = total_secs * 1000.0, "Frame timing");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing(stage: &'static str, millis: u64) -> StageTiming {
        StageTiming {
            stage,
            elapsed: Duration::from_millis(millis),
        }
    }

    #[test]
    fn test_repeated_stage_is_summed() {
        let timings = PipelineTimings {
            stages: vec![
                timing("decode_frame", 3),
                timing("build_integral", 2),
                timing("decode_frame", 1),
            ],
        };

        assert_eq!(timings.stages().len(), 3);
        assert_eq!(timings.stage("decode_frame"), Some(Duration::from_millis(4)));
        assert_eq!(timings.stage("build_integral"), Some(Duration::from_millis(2)));
        assert_eq!(timings.stage("missing"), None);
        assert_eq!(timings.total(), Duration::from_millis(6));
    }

    #[test]
    fn test_measure_passes_value_through() {
        let mut timings = PipelineTimings::new();
        let sum: u32 = timings.measure("tint_background", || (1..=4).sum());
        let failed: Result<(), &str> = timings.measure("decode_frame", || Err("bad plane"));

        assert_eq!(sum, 10);
        assert!(failed.is_err());
        let names: Vec<_> = timings.stages().iter().map(|t| t.stage).collect();
        assert_eq!(names, ["tint_background", "decode_frame"]);
    }

    #[test]
    fn test_empty_timings() {
        let timings = PipelineTimings::new();
        assert_eq!(timings.total(), Duration::ZERO);
        assert!(timings.stage("decode_frame").is_none());
        timings.log_summary();
    }
}
