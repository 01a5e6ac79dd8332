//! ATmega328P peripheral access. Only built for AVR targets.

pub mod adc;
pub mod gpio;
pub mod pwm;
pub mod timer;
pub mod uart;
pub mod watchdog;

// Re-export commonly used types
pub use adc::Adc;
pub use gpio::{Input, Output, Pin};
pub use pwm::ServoPwm;
pub use timer::{delay_ms, millis, next_tick, SysTick};
pub use uart::Uart;
pub use watchdog::{Watchdog, WatchdogTimeout};
