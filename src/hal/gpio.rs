//! Digital lines addressed by their Arduino header number.
//!
//! 0-7 live on PORTD, 8-13 on PORTB, 14-19 (A0-A5) on PORTC.

use avr_device::atmega328p::{PORTB, PORTC, PORTD};
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::v2::{InputPin, OutputPin};

pub trait PinMode {}
pub struct Input;
pub struct Output;
impl PinMode for Input {}
impl PinMode for Output {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Port {
    B,
    C,
    D,
}

fn locate(line: u8) -> Option<(Port, u8)> {
    match line {
        0..=7 => Some((Port::D, line)),
        8..=13 => Some((Port::B, line - 8)),
        14..=19 => Some((Port::C, line - 14)),
        _ => None,
    }
}

// Read-modify-write one register of the selected port
macro_rules! port_modify {
    ($port:expr, $reg_b:ident, $reg_c:ident, $reg_d:ident, |$bits:ident| $body:expr) => {
        unsafe {
            match $port {
                Port::B => (*PORTB::ptr()).$reg_b.modify(|r, w| {
                    let $bits = r.bits();
                    w.bits($body)
                }),
                Port::C => (*PORTC::ptr()).$reg_c.modify(|r, w| {
                    let $bits = r.bits();
                    w.bits($body)
                }),
                Port::D => (*PORTD::ptr()).$reg_d.modify(|r, w| {
                    let $bits = r.bits();
                    w.bits($body)
                }),
            }
        }
    };
}

#[derive(Debug)]
pub struct Pin<MODE> {
    port: Port,
    mask: u8,
    _mode: PhantomData<MODE>,
}

impl<MODE: PinMode> Pin<MODE> {
    pub fn into_output(self) -> Pin<Output> {
        let mask = self.mask;
        port_modify!(self.port, ddrb, ddrc, ddrd, |bits| bits | mask);
        Pin {
            port: self.port,
            mask,
            _mode: PhantomData,
        }
    }

    pub fn into_pull_up_input(self) -> Pin<Input> {
        let mask = self.mask;
        port_modify!(self.port, ddrb, ddrc, ddrd, |bits| bits & !mask);
        port_modify!(self.port, portb, portc, portd, |bits| bits | mask);
        Pin {
            port: self.port,
            mask,
            _mode: PhantomData,
        }
    }

    fn read_pin_register(&self) -> u8 {
        unsafe {
            match self.port {
                Port::B => (*PORTB::ptr()).pinb.read().bits(),
                Port::C => (*PORTC::ptr()).pinc.read().bits(),
                Port::D => (*PORTD::ptr()).pind.read().bits(),
            }
        }
    }
}

impl Pin<Output> {
    /// Push-pull output, driven low
    pub fn output(line: u8) -> Option<Self> {
        let (port, bit) = locate(line)?;
        let pin = Pin::<Output> {
            port,
            mask: 1 << bit,
            _mode: PhantomData,
        };
        let mask = pin.mask;
        port_modify!(port, portb, portc, portd, |bits| bits & !mask);
        Some(pin.into_output())
    }
}

impl Pin<Input> {
    /// Input with the internal pull-up enabled
    pub fn input_pull_up(line: u8) -> Option<Self> {
        let (port, bit) = locate(line)?;
        let pin = Pin::<Input> {
            port,
            mask: 1 << bit,
            _mode: PhantomData,
        };
        Some(pin.into_pull_up_input())
    }
}

impl OutputPin for Pin<Output> {
    type Error = Infallible;

    fn set_high(&mut self) -> Result<(), Infallible> {
        let mask = self.mask;
        port_modify!(self.port, portb, portc, portd, |bits| bits | mask);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Infallible> {
        let mask = self.mask;
        port_modify!(self.port, portb, portc, portd, |bits| bits & !mask);
        Ok(())
    }
}

impl InputPin for Pin<Input> {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Infallible> {
        Ok(self.read_pin_register() & self.mask != 0)
    }

    fn is_low(&self) -> Result<bool, Infallible> {
        Ok(self.read_pin_register() & self.mask == 0)
    }
}
