use avr_device::atmega328p::WDT;

#[derive(Clone, Copy)]
#[repr(u8)]
pub enum WatchdogTimeout {
    Ms16 = 0,
    Ms32 = 1,
    Ms64 = 2,
    Ms125 = 3,
    Ms250 = 4,
    Ms500 = 5,
    Ms1000 = 6,
    Ms2000 = 7,
}

impl WatchdogTimeout {
    /// Shortest timeout not below `ms`
    pub fn from_ms(ms: u16) -> Self {
        match ms {
            0..=16 => WatchdogTimeout::Ms16,
            17..=32 => WatchdogTimeout::Ms32,
            33..=64 => WatchdogTimeout::Ms64,
            65..=125 => WatchdogTimeout::Ms125,
            126..=250 => WatchdogTimeout::Ms250,
            251..=500 => WatchdogTimeout::Ms500,
            501..=1000 => WatchdogTimeout::Ms1000,
            _ => WatchdogTimeout::Ms2000,
        }
    }
}

// WDTCSR
const WDCE: u8 = 1 << 4;
const WDE: u8 = 1 << 3;

pub struct Watchdog {
    _private: (),
}

impl Watchdog {
    #[inline]
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// System reset mode. The change-enable write and the new value must
    /// land within four cycles, so interrupts are held off.
    pub fn start(&mut self, timeout: WatchdogTimeout) {
        avr_device::interrupt::free(|_| {
            avr_device::asm::wdr();
            unsafe {
                let p = WDT::ptr();
                (*p).wdtcsr.write(|w| w.bits(WDCE | WDE));
                (*p).wdtcsr.write(|w| w.bits(WDE | timeout as u8));
            }
        });
    }

    #[inline]
    pub fn feed(&mut self) {
        avr_device::asm::wdr();
    }
}

impl Default for Watchdog {
    fn default() -> Self {
        Self::new()
    }
}
