//! Background metrics generator.

use std::time::Duration;

use metrics::{counter, describe_counter};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Name of the counter the generator ticks in the shared metrics
/// registry.
pub const TICKS_METRIC: &str = "tally_hello_ticks_total";

const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GeneratorState {
    Idle,
    Running,
    Stopped,
}

/// Ticks a counter in the process-wide metrics registry while running.
///
/// `start`/`stop` are transition-checked: starting twice or stopping twice
/// is a logged no-op, and [`stop`](Self::stop) reports whether this call
/// was the one that actually performed the stop.
pub struct MetricsGenerator {
    state: Mutex<GeneratorState>,
    shutdown: CancellationToken,
}

impl MetricsGenerator {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GeneratorState::Idle),
            shutdown: CancellationToken::new(),
        }
    }

    /// Starts the periodic increment task. No-op unless currently idle.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&self) {
        {
            let mut state = self.state.lock();
            if *state != GeneratorState::Idle {
                warn!(state = ?*state, "Metrics generator start ignored");
                return;
            }
            *state = GeneratorState::Running;
        }

        describe_counter!(TICKS_METRIC, "Seconds the hello plugin has been running");

        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            // The first tick of a tokio interval completes immediately;
            // skip it so the counter counts whole elapsed intervals.
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = interval.tick() => counter!(TICKS_METRIC).increment(1),
                }
            }
            debug!("Metrics generator task exited");
        });
    }

    /// Stops the increment task.
    ///
    /// Returns `true` for the call that actually performed the stop,
    /// `false` for a generator that never ran or was already stopped.
    pub fn stop(&self) -> bool {
        let mut state = self.state.lock();
        match *state {
            GeneratorState::Running => {
                *state = GeneratorState::Stopped;
                self.shutdown.cancel();
                true
            }
            GeneratorState::Idle => {
                *state = GeneratorState::Stopped;
                debug!("Metrics generator stopped before start");
                false
            }
            GeneratorState::Stopped => {
                debug!("Metrics generator already stopped");
                false
            }
        }
    }

    /// Whether the generator is currently running.
    pub fn is_running(&self) -> bool {
        *self.state.lock() == GeneratorState::Running
    }
}

impl Default for MetricsGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stop_reports_true_exactly_once() {
        let generator = MetricsGenerator::new();
        generator.start();
        assert!(generator.is_running());

        assert!(generator.stop());
        assert!(!generator.stop());
        assert!(!generator.is_running());
    }

    #[tokio::test]
    async fn test_double_start_is_ignored() {
        let generator = MetricsGenerator::new();
        generator.start();
        generator.start();

        assert!(generator.is_running());
        assert!(generator.stop());
    }

    #[test]
    fn test_stop_before_start() {
        let generator = MetricsGenerator::new();
        assert!(!generator.stop());
        assert!(!generator.is_running());
    }

    #[tokio::test]
    async fn test_stopped_generator_does_not_restart() {
        let generator = MetricsGenerator::new();
        generator.start();
        generator.stop();

        generator.start();
        assert!(!generator.is_running());
    }
}
