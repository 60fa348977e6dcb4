use std::time::{Duration, Instant};

/// Wall clock for one solve: total runtime plus a movable tick marker used
/// to throttle progress updates.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    start: Instant,
    tick: Instant,
}

impl Clock {
    pub fn start() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            tick: now,
        }
    }

    /// Seconds since `start`.
    pub fn runtime(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    pub fn since_tick(&self) -> Duration {
        self.tick.elapsed()
    }

    pub fn mark_tick(&mut self) {
        self.tick = Instant::now();
    }
}

/// Items per second, 0 when no time has passed.
pub fn rate(count: u64, seconds: f64) -> f64 {
    if seconds > 0.0 {
        count as f64 / seconds
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn tick_marker_moves() {
        let mut clock = Clock::start();
        thread::sleep(Duration::from_millis(20));
        assert!(clock.since_tick() >= Duration::from_millis(20));
        clock.mark_tick();
        assert!(clock.since_tick() < Duration::from_millis(20));
        assert!(clock.runtime() >= 0.02);
    }

    #[test]
    fn rate_guards_zero_time() {
        assert_eq!(rate(100, 0.0), 0.0);
        assert_eq!(rate(100, 2.0), 50.0);
    }
}
