//! Lock, strike and alarm state machine
//!
//! The system starts `Locked`. The master code unlocks it; wrong codes and
//! vibration hits count as strikes, and enough strikes inside the reset
//! window sound the alarm. Opening the door while locked sounds the alarm
//! immediately. Only the reset code silences it.
//!
//! ```text
//!  Locked --master--> Unlocked --door closed / master / hold timeout--> Locked
//!  Locked --strikes tripped / door opened--> Alarm --reset code--> Locked
//! ```

pub mod code_entry;
pub mod strike;
pub mod vibration;

pub use code_entry::{CodeEntry, CodeMatch};
pub use strike::StrikeCounter;
pub use vibration::VibrationMonitor;

use crate::config::{Config, ALARM_BLINK_MS, UNLOCK_HOLD_MS};
use crate::drivers::DoorEvent;
use ufmt::derive::uDebug;

#[derive(Copy, Clone, Debug, PartialEq, Eq, uDebug)]
pub enum State {
    Locked,
    Unlocked,
    Alarm,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, uDebug)]
pub enum LockPosition {
    Locked,
    Unlocked,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, uDebug)]
pub enum StrikeSource {
    Vibration,
    WrongCode,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, uDebug)]
pub enum LockReason {
    DoorClosed,
    Manual,
    Timeout,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, uDebug)]
pub enum AlarmCause {
    Strikes,
    ForcedEntry,
}

/// Something worth logging happened during a tick
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Unlocked,
    Locked(LockReason),
    CodeRejected,
    Strike { source: StrikeSource, count: u8 },
    StrikesExpired,
    AlarmTriggered(AlarmCause),
    AlarmSilenced,
}

/// Everything sampled from the hardware in one pass of the main loop
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Inputs {
    pub now_ms: u32,
    pub key: Option<u8>,
    pub door: Option<DoorEvent>,
    pub vibration: Option<u16>,
}

/// Line levels the drivers should drive after a tick
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Outputs {
    pub lock: LockPosition,
    pub red_led: bool,
    pub green_led: bool,
    pub buzzer: bool,
}

pub struct SecuritySystem {
    state: State,
    entry: CodeEntry,
    strikes: StrikeCounter,
    vibration: VibrationMonitor,
    // Set when the state was last entered
    since_ms: u32,
    door_opened: bool,
}

impl SecuritySystem {
    pub fn new(config: &Config) -> Self {
        Self {
            state: State::Locked,
            entry: CodeEntry::new(config.master_code, config.reset_code),
            strikes: StrikeCounter::new(config.alarm_trigger_count, config.reset_window_ms),
            vibration: VibrationMonitor::new(config.vib_threshold, config.cooldown_ms),
            since_ms: 0,
            door_opened: false,
        }
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    #[inline]
    pub fn strike_count(&self) -> u8 {
        self.strikes.count()
    }

    /// Advance the state machine by one loop pass
    pub fn tick<F: FnMut(Event)>(&mut self, inputs: Inputs, mut emit: F) -> Outputs {
        let now = inputs.now_ms;

        if self.state == State::Locked && self.strikes.expire(now) {
            emit(Event::StrikesExpired);
        }

        if let Some(door) = inputs.door {
            self.on_door(door, now, &mut emit);
        }

        if let Some(key) = inputs.key {
            if let Some(result) = self.entry.press(key) {
                self.on_code(result, now, &mut emit);
            }
        }

        if let Some(sample) = inputs.vibration {
            // Sampled in every state so the cooldown tracks real hits
            if self.vibration.sample(sample, now) && self.state == State::Locked {
                self.strike(StrikeSource::Vibration, now, &mut emit);
            }
        }

        if self.state == State::Unlocked
            && !self.door_opened
            && now.wrapping_sub(self.since_ms) >= UNLOCK_HOLD_MS
        {
            self.lock(LockReason::Timeout, now, &mut emit);
        }

        self.outputs(now)
    }

    /// Line levels for the current state
    pub fn outputs(&self, now_ms: u32) -> Outputs {
        match self.state {
            State::Locked => Outputs {
                lock: LockPosition::Locked,
                red_led: true,
                green_led: false,
                buzzer: false,
            },
            State::Unlocked => Outputs {
                lock: LockPosition::Unlocked,
                red_led: false,
                green_led: true,
                buzzer: false,
            },
            State::Alarm => Outputs {
                lock: LockPosition::Locked,
                red_led: (now_ms.wrapping_sub(self.since_ms) / ALARM_BLINK_MS) % 2 == 0,
                green_led: false,
                buzzer: true,
            },
        }
    }

    fn on_door<F: FnMut(Event)>(&mut self, door: DoorEvent, now: u32, emit: &mut F) {
        match (self.state, door) {
            (State::Locked, DoorEvent::Opened) => {
                self.enter_alarm(AlarmCause::ForcedEntry, now, emit);
            }
            (State::Unlocked, DoorEvent::Opened) => {
                self.door_opened = true;
            }
            (State::Unlocked, DoorEvent::Closed) => {
                self.lock(LockReason::DoorClosed, now, emit);
            }
            _ => {}
        }
    }

    fn on_code<F: FnMut(Event)>(&mut self, result: CodeMatch, now: u32, emit: &mut F) {
        match (self.state, result) {
            (State::Locked, CodeMatch::Master) => {
                self.strikes.clear();
                self.enter(State::Unlocked, now);
                self.door_opened = false;
                emit(Event::Unlocked);
            }
            (State::Locked, _) => {
                emit(Event::CodeRejected);
                self.strike(StrikeSource::WrongCode, now, emit);
            }
            (State::Unlocked, CodeMatch::Master) => {
                self.lock(LockReason::Manual, now, emit);
            }
            (State::Alarm, CodeMatch::Reset) => {
                self.strikes.clear();
                self.vibration.reset();
                self.enter(State::Locked, now);
                emit(Event::AlarmSilenced);
            }
            _ => emit(Event::CodeRejected),
        }
    }

    fn strike<F: FnMut(Event)>(&mut self, source: StrikeSource, now: u32, emit: &mut F) {
        let count = self.strikes.record(now);
        emit(Event::Strike { source, count });
        if self.strikes.is_tripped() {
            self.enter_alarm(AlarmCause::Strikes, now, emit);
        }
    }

    fn lock<F: FnMut(Event)>(&mut self, reason: LockReason, now: u32, emit: &mut F) {
        self.strikes.clear();
        self.entry.clear();
        self.enter(State::Locked, now);
        emit(Event::Locked(reason));
    }

    fn enter_alarm<F: FnMut(Event)>(&mut self, cause: AlarmCause, now: u32, emit: &mut F) {
        self.entry.clear();
        self.enter(State::Alarm, now);
        emit(Event::AlarmTriggered(cause));
    }

    fn enter(&mut self, state: State, now: u32) {
        self.state = state;
        self.since_ms = now;
    }
}
