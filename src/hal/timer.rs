//! Millisecond system tick on Timer0

use crate::config::CPU_FREQ_HZ;
use avr_device::atmega328p::TC0;
use avr_device::interrupt::{self, Mutex};
use core::cell::Cell;

const TICK_HZ: u32 = 1000;
// 16 MHz / 64 / 1 kHz = 250 counts per tick
const COMPARE: u8 = (CPU_FREQ_HZ / 64 / TICK_HZ - 1) as u8;

// TCCR0A
const WGM01: u8 = 1 << 1;
// TCCR0B, clk/64
const CS_DIV64: u8 = 0b011;
// TIMSK0
const OCIE0A: u8 = 1 << 1;

static MILLIS: Mutex<Cell<u32>> = Mutex::new(Cell::new(0));

/// Owns Timer0 once the tick is running
pub struct SysTick {
    _private: (),
}

impl SysTick {
    /// CTC mode, compare match A every millisecond
    pub fn start() -> Self {
        unsafe {
            let p = TC0::ptr();
            (*p).tccr0a.write(|w| w.bits(WGM01));
            (*p).ocr0a.write(|w| w.bits(COMPARE));
            (*p).tcnt0.write(|w| w.bits(0));
            (*p).tccr0b.write(|w| w.bits(CS_DIV64));
            (*p).timsk0.write(|w| w.bits(OCIE0A));
        }
        interrupt::free(|cs| MILLIS.borrow(cs).set(0));
        Self { _private: () }
    }
}

/// Milliseconds since `SysTick::start`, wrapping after ~49 days
pub fn millis() -> u32 {
    interrupt::free(|cs| MILLIS.borrow(cs).get())
}

/// Spins until the tick moves past `last` and returns the new count
pub fn next_tick(last: u32) -> u32 {
    loop {
        let now = millis();
        if now != last {
            return now;
        }
    }
}

/// Busy wait on the system tick
pub fn delay_ms(ms: u32) {
    let start = millis();
    while millis().wrapping_sub(start) < ms {}
}

#[avr_device::interrupt(atmega328p)]
fn TIMER0_COMPA() {
    interrupt::free(|cs| {
        let counter = MILLIS.borrow(cs);
        counter.set(counter.get().wrapping_add(1));
    });
}
