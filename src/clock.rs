use std::time::{Duration, Instant};

/// Monotonic time source. The game never sleeps except through `delay`, and
/// only the round presenter calls that.
pub trait Clock {
    /// seconds since some fixed point; never goes backwards
    fn now(&mut self) -> f64;

    /// block for `seconds`
    fn delay(&mut self, seconds: f64);
}

/// wall clock time, from when the clock was created
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn delay(&mut self, seconds: f64) {
        if seconds > 0.0 {
            // thread::sleep overshoots by a whole scheduler slice on some
            // platforms, which makes the flashes visibly uneven
            spin_sleep::sleep(Duration::from_secs_f64(seconds));
        }
    }
}

/// Simulated time for testing. Every read moves time forward by `step`, so a
/// polling loop makes progress without anything sleeping; `delay` jumps
/// straight to the end of the wait.
pub struct ManualClock {
    time: f64,
    step: f64,
    delayed: f64,
}

impl ManualClock {
    pub fn new(step: f64) -> Self {
        ManualClock {
            time: 0.0,
            step,
            delayed: 0.0,
        }
    }

    /// move time forward without reading it
    pub fn advance(&mut self, seconds: f64) {
        self.time += seconds;
    }

    /// read the time without moving it
    pub fn peek(&self) -> f64 {
        self.time
    }

    /// total seconds spent in `delay`
    pub fn delayed(&self) -> f64 {
        self.delayed
    }
}

impl Clock for ManualClock {
    fn now(&mut self) -> f64 {
        let t = self.time;
        self.time += self.step;
        t
    }

    fn delay(&mut self, seconds: f64) {
        self.time += seconds;
        self.delayed += seconds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_never_goes_backwards() {
        let mut c = MonotonicClock::new();
        let mut last = c.now();
        for _ in 0..1000 {
            let t = c.now();
            assert!(t >= last);
            last = t;
        }
    }

    #[test]
    fn test_monotonic_delay_waits() {
        let mut c = MonotonicClock::new();
        let before = c.now();
        c.delay(0.01);
        assert!(c.now() - before >= 0.01);
    }

    #[test]
    fn test_manual_steps_per_read() {
        let mut c = ManualClock::new(0.25);
        assert_eq!(c.now(), 0.0);
        assert_eq!(c.now(), 0.25);
        assert_eq!(c.peek(), 0.5);
    }

    #[test]
    fn test_manual_delay_is_recorded() {
        let mut c = ManualClock::new(0.0);
        c.delay(0.5);
        c.advance(1.0);
        c.delay(0.25);
        assert_eq!(c.peek(), 1.75);
        assert_eq!(c.delayed(), 0.75);
    }
}
