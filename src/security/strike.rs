//! Strike counting with an inactivity reset window

pub struct StrikeCounter {
    count: u8,
    limit: u8,
    window_ms: u32,
    last_strike: u32,
}

impl StrikeCounter {
    pub fn new(limit: u8, window_ms: u32) -> Self {
        Self {
            count: 0,
            limit,
            window_ms,
            last_strike: 0,
        }
    }

    /// Record a strike and return the running count
    pub fn record(&mut self, now_ms: u32) -> u8 {
        self.expire(now_ms);
        self.count = self.count.saturating_add(1);
        self.last_strike = now_ms;
        self.count
    }

    /// Drop the count once the window has passed without a strike.
    /// Returns true when strikes were discarded.
    pub fn expire(&mut self, now_ms: u32) -> bool {
        if self.count > 0 && now_ms.wrapping_sub(self.last_strike) >= self.window_ms {
            self.count = 0;
            return true;
        }
        false
    }

    #[inline]
    pub fn is_tripped(&self) -> bool {
        self.count >= self.limit
    }

    #[inline]
    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }
}
