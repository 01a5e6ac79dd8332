//! Servo PWM on Timer1
//!
//! Fast PWM, mode 14 (ICR1 top), /8 prescaler: one 50 Hz frame is 40 000
//! counts. Channel B drives OC1B, which is header line 10.

use crate::config::{CPU_FREQ_HZ, PIN_SERVO};
use crate::hal::gpio::{Output, Pin};
use avr_device::atmega328p::TC1;
use embedded_hal::PwmPin;

const SERVO_FREQ_HZ: u32 = 50;
const PRESCALER: u32 = 8;
const FRAME_COUNTS: u32 = CPU_FREQ_HZ / PRESCALER / SERVO_FREQ_HZ;
const TOP: u16 = (FRAME_COUNTS - 1) as u16;

// TCCR1A
const COM1B1: u8 = 1 << 5;
const WGM11: u8 = 1 << 1;
// TCCR1B
const WGM13: u8 = 1 << 4;
const WGM12: u8 = 1 << 3;
const CS11: u8 = 1 << 1;

// OC1B is fixed in silicon
const _: () = assert!(PIN_SERVO == 10, "servo must sit on OC1B");

pub struct ServoPwm {
    _pin: Pin<Output>,
}

impl ServoPwm {
    /// Returns `None` if the OC1B line cannot be claimed as an output
    pub fn new() -> Option<Self> {
        let pin = Pin::<Output>::output(PIN_SERVO)?;
        unsafe {
            let p = TC1::ptr();
            (*p).tccr1a.write(|w| w.bits(WGM11));
            (*p).tccr1b.write(|w| w.bits(WGM13 | WGM12 | CS11));
            (*p).icr1.write(|w| w.bits(TOP));
            (*p).ocr1b.write(|w| w.bits(0));
        }
        Some(Self { _pin: pin })
    }
}

impl PwmPin for ServoPwm {
    type Duty = u16;

    fn disable(&mut self) {
        unsafe {
            (*TC1::ptr())
                .tccr1a
                .modify(|r, w| w.bits(r.bits() & !COM1B1));
        }
    }

    fn enable(&mut self) {
        unsafe {
            (*TC1::ptr())
                .tccr1a
                .modify(|r, w| w.bits(r.bits() | COM1B1));
        }
    }

    fn get_duty(&self) -> u16 {
        unsafe { (*TC1::ptr()).ocr1b.read().bits() }
    }

    fn get_max_duty(&self) -> u16 {
        FRAME_COUNTS as u16
    }

    fn set_duty(&mut self, duty: u16) {
        unsafe {
            (*TC1::ptr()).ocr1b.write(|w| w.bits(duty.min(TOP)));
        }
    }
}
