//! Error codes and fault bookkeeping

use crate::config::ConfigError;
use crate::logger::{Level, Logger};
use ufmt::derive::uDebug;
use ufmt::uWrite;

#[derive(Debug, Clone, Copy, PartialEq, Eq, uDebug)]
#[repr(u16)]
pub enum ErrorCode {
    Config = 0x1000,
    Sensor = 0x2000,
    Actuator = 0x3000,
    Keypad = 0x4000,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Error {
    pub code: ErrorCode,
    pub subcode: u16,
    pub timestamp: u32,
}

impl Error {
    /// Class and subcode packed the way they are printed
    #[inline]
    pub fn raw(&self) -> u16 {
        self.code as u16 | (self.subcode & 0x0FFF)
    }
}

impl ConfigError {
    pub fn subcode(&self) -> u16 {
        match *self {
            ConfigError::InvalidLine { pin } => 0x100 | pin as u16,
            ConfigError::DuplicatePin { pin } => 0x200 | pin as u16,
            ConfigError::NotAnalogPin { pin } => 0x300 | pin as u16,
            ConfigError::ThresholdOutOfRange => 0x401,
            ConfigError::ZeroCooldown => 0x402,
            ConfigError::ZeroResetWindow => 0x403,
            ConfigError::ZeroTriggerCount => 0x404,
            ConfigError::EmptyCode => 0x501,
            ConfigError::CodesEqual => 0x502,
            ConfigError::CodeTooLong => 0x503,
            ConfigError::CodeNotOnKeypad { key } => 0x600 | key as u16,
        }
    }
}

pub struct Diagnostics {
    last_error: Option<Error>,
    error_count: u32,
}

impl Diagnostics {
    pub const fn new() -> Self {
        Self {
            last_error: None,
            error_count: 0,
        }
    }

    pub fn report_error<W: uWrite>(
        &mut self,
        code: ErrorCode,
        subcode: u16,
        timestamp: u32,
        logger: &mut Logger<W>,
    ) {
        let error = Error {
            code,
            subcode,
            timestamp,
        };

        self.last_error = Some(error);
        self.error_count = self.error_count.saturating_add(1);

        logger.log_debug(Level::Error, "fault", &code).ok();
        logger.log_value(Level::Error, "fault code", &error.raw()).ok();
    }

    pub fn report_config_error<W: uWrite>(&mut self, error: ConfigError, logger: &mut Logger<W>) {
        logger.log_debug(Level::Error, "config", &error).ok();
        self.report_error(ErrorCode::Config, error.subcode(), 0, logger);
    }

    pub fn get_last_error(&self) -> Option<Error> {
        self.last_error
    }

    pub fn get_error_count(&self) -> u32 {
        self.error_count
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}
