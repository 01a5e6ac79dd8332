//! Servo-driven bolt
//!
//! A hobby servo expects a 50 Hz frame with a 544-2400 us pulse mapping
//! linearly onto 0-180 degrees.

use crate::config::{
    LOCKED_ANGLE, SERVO_MAX_PULSE_US, SERVO_MIN_PULSE_US, SERVO_PERIOD_US, UNLOCKED_ANGLE,
};
use crate::security::LockPosition;
use embedded_hal::PwmPin;

const MAX_ANGLE: u8 = 180;

/// Compare value for `angle` on a channel whose full frame is `max_duty`
pub fn duty_for_angle(angle: u8, max_duty: u16) -> u16 {
    let angle = angle.min(MAX_ANGLE) as u32;
    let pulse_us =
        SERVO_MIN_PULSE_US + (SERVO_MAX_PULSE_US - SERVO_MIN_PULSE_US) * angle / MAX_ANGLE as u32;
    (max_duty as u32 * pulse_us / SERVO_PERIOD_US) as u16
}

pub struct ServoLock<P> {
    pwm: P,
    position: Option<LockPosition>,
}

impl<P: PwmPin<Duty = u16>> ServoLock<P> {
    /// The bolt is not moved until the first `apply`
    pub fn new(mut pwm: P) -> Self {
        pwm.enable();
        Self {
            pwm,
            position: None,
        }
    }

    pub fn set_angle(&mut self, angle: u8) {
        let duty = duty_for_angle(angle, self.pwm.get_max_duty());
        self.pwm.set_duty(duty);
    }

    pub fn lock(&mut self) {
        self.set_angle(LOCKED_ANGLE);
        self.position = Some(LockPosition::Locked);
    }

    pub fn unlock(&mut self) {
        self.set_angle(UNLOCKED_ANGLE);
        self.position = Some(LockPosition::Unlocked);
    }

    /// Drive to `position`; repeated requests leave the PWM untouched
    pub fn apply(&mut self, position: LockPosition) {
        if self.position == Some(position) {
            return;
        }
        match position {
            LockPosition::Locked => self.lock(),
            LockPosition::Unlocked => self.unlock(),
        }
    }

    #[inline]
    pub fn position(&self) -> Option<LockPosition> {
        self.position
    }

    pub fn release(mut self) -> P {
        self.pwm.disable();
        self.pwm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 16 MHz / 8 prescaler at 50 Hz
    const FRAME: u16 = 40_000;

    #[derive(Default)]
    struct FakePwm {
        enabled: bool,
        duties: Vec<u16>,
    }

    impl PwmPin for FakePwm {
        type Duty = u16;

        fn disable(&mut self) {
            self.enabled = false;
        }

        fn enable(&mut self) {
            self.enabled = true;
        }

        fn get_duty(&self) -> u16 {
            self.duties.last().copied().unwrap_or(0)
        }

        fn get_max_duty(&self) -> u16 {
            FRAME
        }

        fn set_duty(&mut self, duty: u16) {
            self.duties.push(duty);
        }
    }

    #[test]
    fn angle_to_duty() {
        // 544 us of 20 ms
        assert_eq!(duty_for_angle(0, FRAME), 1088);
        // 1472 us
        assert_eq!(duty_for_angle(90, FRAME), 2944);
        // 2400 us
        assert_eq!(duty_for_angle(180, FRAME), 4800);
        assert_eq!(duty_for_angle(255, FRAME), 4800);
    }

    #[test]
    fn apply_moves_only_on_change() {
        let mut servo = ServoLock::new(FakePwm::default());
        assert_eq!(servo.position(), None);

        servo.apply(LockPosition::Locked);
        servo.apply(LockPosition::Locked);
        servo.apply(LockPosition::Unlocked);
        servo.apply(LockPosition::Locked);
        assert_eq!(servo.position(), Some(LockPosition::Locked));

        let pwm = servo.release();
        assert!(!pwm.enabled);
        assert_eq!(pwm.duties, vec![1088, 2944, 1088]);
    }

    #[test]
    fn enabled_on_construction() {
        let servo = ServoLock::new(FakePwm::default());
        assert!(servo.pwm.enabled);
    }
}
