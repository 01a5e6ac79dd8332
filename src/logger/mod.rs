//! Levelled serial logging
//!
//! Lines look like `[INF] door unlocked` or `[WRN] strike: 3`. The writer
//! is anything implementing `ufmt::uWrite`, normally the serial console.

use ufmt::{uDebug, uDisplay, uWrite, uwriteln};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl Level {
    pub fn tag(self) -> &'static str {
        match self {
            Level::Error => "[ERR]",
            Level::Warn => "[WRN]",
            Level::Info => "[INF]",
            Level::Debug => "[DBG]",
        }
    }
}

#[cfg(feature = "debug")]
pub const DEFAULT_LEVEL: Level = Level::Debug;
#[cfg(not(feature = "debug"))]
pub const DEFAULT_LEVEL: Level = Level::Info;

pub struct Logger<W> {
    writer: W,
    max_level: Level,
}

impl<W: uWrite> Logger<W> {
    pub fn new(writer: W) -> Self {
        Self::with_level(writer, DEFAULT_LEVEL)
    }

    pub fn with_level(writer: W, max_level: Level) -> Self {
        Self { writer, max_level }
    }

    pub fn set_level(&mut self, level: Level) {
        self.max_level = level;
    }

    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.max_level
    }

    pub fn log(&mut self, level: Level, msg: &str) -> Result<(), W::Error> {
        if !self.enabled(level) {
            return Ok(());
        }
        uwriteln!(&mut self.writer, "{} {}", level.tag(), msg)
    }

    /// `[LVL] msg: value`
    pub fn log_value<V: uDisplay + ?Sized>(
        &mut self,
        level: Level,
        msg: &str,
        value: &V,
    ) -> Result<(), W::Error> {
        if !self.enabled(level) {
            return Ok(());
        }
        uwriteln!(&mut self.writer, "{} {}: {}", level.tag(), msg, value)
    }

    /// `[LVL] msg: value` using the value's debug form
    pub fn log_debug<V: uDebug + ?Sized>(
        &mut self,
        level: Level,
        msg: &str,
        value: &V,
    ) -> Result<(), W::Error> {
        if !self.enabled(level) {
            return Ok(());
        }
        uwriteln!(&mut self.writer, "{} {}: {:?}", level.tag(), msg, value)
    }

    pub fn error(&mut self, msg: &str) -> Result<(), W::Error> {
        self.log(Level::Error, msg)
    }

    pub fn warn(&mut self, msg: &str) -> Result<(), W::Error> {
        self.log(Level::Warn, msg)
    }

    pub fn info(&mut self, msg: &str) -> Result<(), W::Error> {
        self.log(Level::Info, msg)
    }

    pub fn debug(&mut self, msg: &str) -> Result<(), W::Error> {
        self.log(Level::Debug, msg)
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
