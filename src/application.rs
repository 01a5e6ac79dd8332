//! Application layer for the vault controller
//! Ties the security state machine to logging and fault reporting.

use crate::config::{Config, ConfigError};
use crate::diagnostics::{Diagnostics, ErrorCode};
use crate::logger::{Level, Logger};
use crate::security::{Event, Inputs, Outputs, SecuritySystem, State};
use ufmt::uWrite;

pub struct Application<W> {
    system: SecuritySystem,
    logger: Logger<W>,
    diagnostics: Diagnostics,
}

impl<W: uWrite> Application<W> {
    /// Refuses to start on a configuration that fails validation; the
    /// failure is logged before returning.
    pub fn new(config: &Config, mut logger: Logger<W>) -> Result<Self, (ConfigError, Logger<W>)> {
        let mut diagnostics = Diagnostics::new();
        if let Err(e) = config.validate() {
            diagnostics.report_config_error(e, &mut logger);
            return Err((e, logger));
        }

        logger.info("vault guard firmware v0.1.0").ok();
        logger.log_value(Level::Info, "vibration threshold", &config.vib_threshold).ok();
        logger.log_value(Level::Info, "cooldown ms", &config.cooldown_ms).ok();
        logger.log_value(Level::Info, "reset window ms", &config.reset_window_ms).ok();
        logger.log_value(Level::Info, "strikes to alarm", &config.alarm_trigger_count).ok();

        Ok(Self {
            system: SecuritySystem::new(config),
            logger,
            diagnostics,
        })
    }

    pub fn tick(&mut self, inputs: Inputs) -> Outputs {
        if inputs.key.is_some() {
            // Never log the key itself
            self.logger.debug("key").ok();
        }
        let logger = &mut self.logger;
        self.system.tick(inputs, |event| log_event(logger, event))
    }

    /// Record a driver fault
    pub fn report(&mut self, code: ErrorCode, subcode: u16, now_ms: u32) {
        self.diagnostics
            .report_error(code, subcode, now_ms, &mut self.logger);
    }

    #[inline]
    pub fn state(&self) -> State {
        self.system.state()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn logger(&self) -> &Logger<W> {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut Logger<W> {
        &mut self.logger
    }
}

fn log_event<W: uWrite>(logger: &mut Logger<W>, event: Event) {
    match event {
        Event::Unlocked => {
            logger.info("unlocked").ok();
        }
        Event::Locked(reason) => {
            logger.log_debug(Level::Info, "locked", &reason).ok();
        }
        Event::CodeRejected => {
            logger.warn("code rejected").ok();
        }
        Event::Strike { source, count } => {
            logger.log_debug(Level::Warn, "strike", &source).ok();
            logger.log_value(Level::Warn, "strike count", &count).ok();
        }
        Event::StrikesExpired => {
            logger.info("strikes expired").ok();
        }
        Event::AlarmTriggered(cause) => {
            logger.log_debug(Level::Error, "ALARM", &cause).ok();
        }
        Event::AlarmSilenced => {
            logger.info("alarm silenced").ok();
        }
    }
}
