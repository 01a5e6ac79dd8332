use crate::config::DOOR_DEBOUNCE_TICKS;
use embedded_hal::digital::v2::InputPin;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DoorEvent {
    Opened,
    Closed,
}

/// Reed switch on a pulled-up input. The magnet closes the switch and
/// pulls the line low while the door is shut.
pub struct DoorSensor<P> {
    pin: P,
    open: bool,
    debounce_counter: u8,
}

impl<P: InputPin> DoorSensor<P> {
    /// Takes the current level as the starting state, so a door that is
    /// already open at boot does not produce an event.
    pub fn new(pin: P) -> Result<Self, P::Error> {
        let open = pin.is_high()?;
        Ok(Self {
            pin,
            open,
            debounce_counter: 0,
        })
    }

    pub fn poll(&mut self) -> Result<Option<DoorEvent>, P::Error> {
        let raw_open = self.pin.is_high()?;

        if raw_open != self.open {
            self.debounce_counter = self.debounce_counter.saturating_add(1);
            if self.debounce_counter >= DOOR_DEBOUNCE_TICKS {
                self.open = raw_open;
                self.debounce_counter = 0;

                return Ok(Some(if raw_open {
                    DoorEvent::Opened
                } else {
                    DoorEvent::Closed
                }));
            }
        } else {
            self.debounce_counter = 0;
        }
        Ok(None)
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn release(self) -> P {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh0::digital::{Mock as PinMock, State, Transaction};

    fn levels(states: &[State]) -> Vec<Transaction> {
        states.iter().map(|s| Transaction::get(s.clone())).collect()
    }

    #[test]
    fn opening_is_reported_after_debounce() {
        let mut expected = vec![State::Low];
        expected.extend(core::iter::repeat(State::High).take(DOOR_DEBOUNCE_TICKS as usize));
        let pin = PinMock::new(&levels(&expected));

        let mut door = DoorSensor::new(pin).unwrap();
        assert!(!door.is_open());
        for _ in 1..DOOR_DEBOUNCE_TICKS {
            assert_eq!(door.poll().unwrap(), None);
        }
        assert_eq!(door.poll().unwrap(), Some(DoorEvent::Opened));
        assert!(door.is_open());

        door.release().done();
    }

    #[test]
    fn glitch_restarts_debounce() {
        let mut expected = vec![State::Low, State::High, State::Low];
        expected.extend(core::iter::repeat(State::High).take(DOOR_DEBOUNCE_TICKS as usize));
        let pin = PinMock::new(&levels(&expected));

        let mut door = DoorSensor::new(pin).unwrap();
        assert_eq!(door.poll().unwrap(), None);
        assert_eq!(door.poll().unwrap(), None);
        for _ in 1..DOOR_DEBOUNCE_TICKS {
            assert_eq!(door.poll().unwrap(), None);
        }
        assert_eq!(door.poll().unwrap(), Some(DoorEvent::Opened));

        door.release().done();
    }

    #[test]
    fn open_at_boot_then_closed() {
        let mut expected = vec![State::High];
        expected.extend(core::iter::repeat(State::Low).take(DOOR_DEBOUNCE_TICKS as usize));
        let pin = PinMock::new(&levels(&expected));

        let mut door = DoorSensor::new(pin).unwrap();
        assert!(door.is_open());
        let mut event = None;
        for _ in 0..DOOR_DEBOUNCE_TICKS {
            event = door.poll().unwrap();
        }
        assert_eq!(event, Some(DoorEvent::Closed));

        door.release().done();
    }
}
