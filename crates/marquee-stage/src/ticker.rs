//! Fixed-rate tick accumulator.

/// Converts frame timestamps into whole integrator ticks.
///
/// The ticker starts disarmed. While disarmed it produces no ticks and keeps
/// no backlog; arming it starts counting from the given time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTicker {
    interval_ms: u64,
    max_catch_up: u32,
    last_ms: Option<u64>,
    backlog_ms: u64,
}

impl FixedTicker {
    /// Creates a disarmed ticker. Both limits are raised to at least 1.
    pub fn new(interval_ms: u64, max_catch_up: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            max_catch_up: max_catch_up.max(1),
            last_ms: None,
            backlog_ms: 0,
        }
    }

    /// Tick period in milliseconds.
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Tick period in seconds.
    pub fn dt(&self) -> f32 {
        self.interval_ms as f32 / 1000.0
    }

    /// Returns true if the ticker is producing ticks.
    pub fn is_armed(&self) -> bool {
        self.last_ms.is_some()
    }

    /// Starts counting from `now_ms`. Has no effect if already armed.
    pub fn arm(&mut self, now_ms: u64) {
        if self.last_ms.is_none() {
            self.last_ms = Some(now_ms);
            self.backlog_ms = 0;
        }
    }

    /// Stops producing ticks and drops any backlog.
    pub fn disarm(&mut self) {
        self.last_ms = None;
        self.backlog_ms = 0;
    }

    /// Returns how many ticks are due at `now_ms`.
    ///
    /// At most `max_catch_up` ticks are returned; time beyond that is
    /// dropped rather than replayed later. Clocks moving backwards produce
    /// no ticks.
    pub fn advance(&mut self, now_ms: u64) -> u32 {
        let Some(last) = self.last_ms else {
            return 0;
        };
        self.last_ms = Some(now_ms.max(last));
        self.backlog_ms += now_ms.saturating_sub(last);

        let due = self.backlog_ms / self.interval_ms;
        self.backlog_ms %= self.interval_ms;
        due.min(u64::from(self.max_catch_up)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_produces_nothing() {
        let mut ticker = FixedTicker::new(50, 10);
        assert_eq!(ticker.advance(1_000), 0);
        assert!(!ticker.is_armed());
    }

    #[test]
    fn test_accumulates_partial_frames() {
        let mut ticker = FixedTicker::new(50, 10);
        ticker.arm(0);

        // 60Hz frames
        let mut total = 0;
        let mut now = 0;
        for _ in 0..60 {
            now += 16;
            total += ticker.advance(now);
        }
        assert_eq!(total, (60 * 16) / 50);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut ticker = FixedTicker::new(50, 10);
        ticker.arm(0);
        assert_eq!(ticker.advance(60_000), 10);
        assert_eq!(ticker.advance(60_049), 0);
        assert_eq!(ticker.advance(60_050), 1);
    }

    #[test]
    fn test_zero_limits_raised() {
        let mut ticker = FixedTicker::new(0, 0);
        assert_eq!(ticker.interval_ms(), 1);
        ticker.arm(0);
        assert_eq!(ticker.advance(500), 1);
        assert_eq!(ticker.advance(501), 1);
    }

    #[test]
    fn test_disarm_drops_backlog() {
        let mut ticker = FixedTicker::new(50, 10);
        ticker.arm(0);
        ticker.advance(40);
        ticker.disarm();
        ticker.arm(1_000);
        assert_eq!(ticker.advance(1_010), 0);
        assert_eq!(ticker.advance(1_050), 1);
    }

    #[test]
    fn test_clock_going_backwards() {
        let mut ticker = FixedTicker::new(50, 10);
        ticker.arm(1_000);
        assert_eq!(ticker.advance(900), 0);
        assert_eq!(ticker.advance(1_050), 1);
    }
}
