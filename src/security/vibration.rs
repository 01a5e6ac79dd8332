//! Vibration strike detection with a debounce cooldown

/// Turns raw ADC samples into debounced strikes
pub struct VibrationMonitor {
    threshold: u16,
    cooldown_ms: u32,
    last_strike: Option<u32>,
}

impl VibrationMonitor {
    pub fn new(threshold: u16, cooldown_ms: u32) -> Self {
        Self {
            threshold,
            cooldown_ms,
            last_strike: None,
        }
    }

    /// A sample equal to the threshold is not a detection
    #[inline]
    pub fn is_detected(&self, sample: u16) -> bool {
        sample > self.threshold
    }

    /// Returns true when `sample` counts as a new strike
    pub fn sample(&mut self, sample: u16, now_ms: u32) -> bool {
        if !self.is_detected(sample) {
            return false;
        }

        if let Some(last) = self.last_strike {
            if now_ms.wrapping_sub(last) < self.cooldown_ms {
                return false;
            }
        }

        self.last_strike = Some(now_ms);
        true
    }

    pub fn reset(&mut self) {
        self.last_strike = None;
    }
}
