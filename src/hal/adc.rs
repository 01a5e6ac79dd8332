use crate::config::{A0, A5};
use avr_device::atmega328p::ADC;

// ADMUX REFS bits: AVcc with external cap at AREF
const REFS_AVCC: u8 = 1 << 6;
const ADEN: u8 = 1 << 7;
const ADSC: u8 = 1 << 6;
// /128 gives 125 kHz at 16 MHz
const PRESCALER_DIV128: u8 = 0x07;

pub struct Adc {
    _private: (),
}

impl Adc {
    pub fn new() -> Self {
        unsafe {
            let p = ADC::ptr();
            (*p).adcsra.write(|w| w.bits(ADEN | PRESCALER_DIV128));
            (*p).admux.write(|w| w.bits(REFS_AVCC));
        }
        Self { _private: () }
    }

    /// Blocking 10-bit conversion of an analog header line (`A0`..`A5`)
    pub fn read_line(&mut self, line: u8) -> Option<u16> {
        if !(A0..=A5).contains(&line) {
            return None;
        }
        let channel = line - A0;

        unsafe {
            let p = ADC::ptr();

            (*p).admux.write(|w| w.bits(REFS_AVCC | channel));

            // Start conversion
            (*p).adcsra.modify(|r, w| w.bits(r.bits() | ADSC));

            // Wait for completion
            while (*p).adcsra.read().bits() & ADSC != 0 {}

            Some((*p).adc.read().bits())
        }
    }
}

impl Default for Adc {
    fn default() -> Self {
        Self::new()
    }
}
