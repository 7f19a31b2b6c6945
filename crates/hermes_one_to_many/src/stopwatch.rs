use std::{
    fmt::Display,
    time::{Duration, Instant},
};

use tracing::debug;

/// Accumulates time spent across one or more start/stop intervals.
///
/// A new stopwatch is already running.
pub struct Stopwatch {
    name: String,
    running_since: Option<Instant>,
    accumulated: Duration,
}

impl Stopwatch {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            running_since: Some(Instant::now()),
            accumulated: Duration::ZERO,
        }
    }

    /// Creates a stopwatch that only counts time between `start` and `stop` calls
    pub fn stopped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            running_since: None,
            accumulated: Duration::ZERO,
        }
    }

    pub fn start(&mut self) {
        self.running_since = Some(Instant::now());
    }

    pub fn stop(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += since.elapsed();
        }
    }

    pub fn total_duration(&self) -> Duration {
        match self.running_since {
            Some(since) => self.accumulated + since.elapsed(),
            None => self.accumulated,
        }
    }

    pub fn report(&self) {
        debug!("{}", self);
    }
}

impl Display for Stopwatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]: {:?}", self.name, self.total_duration())
    }
}

/// Runs `$block` while `$sw` is running and evaluates to the block's value
#[macro_export]
macro_rules! timer {
    ($sw:ident, $block:expr) => {{
        $sw.start();
        let result = $block;
        $sw.stop();
        result
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_stopwatch_only_counts_intervals() {
        let mut stopwatch = Stopwatch::stopped("test");
        assert_eq!(stopwatch.total_duration(), Duration::ZERO);

        let value = crate::timer!(stopwatch, {
            std::thread::sleep(Duration::from_millis(2));
            42
        });

        assert_eq!(value, 42);
        let first = stopwatch.total_duration();
        assert!(first >= Duration::from_millis(2));

        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(stopwatch.total_duration(), first);
    }
}
