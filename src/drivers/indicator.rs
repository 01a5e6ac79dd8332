use crate::security::Outputs;
use embedded_hal::digital::v2::{OutputPin, PinState};

/// Status LEDs and the piezo buzzer
pub struct Indicators<R, G, B> {
    red: R,
    green: G,
    buzzer: B,
}

impl<R, G, B, E> Indicators<R, G, B>
where
    R: OutputPin<Error = E>,
    G: OutputPin<Error = E>,
    B: OutputPin<Error = E>,
{
    pub fn new(red: R, green: G, buzzer: B) -> Self {
        Self { red, green, buzzer }
    }

    pub fn apply(&mut self, outputs: &Outputs) -> Result<(), E> {
        self.red.set_state(PinState::from(outputs.red_led))?;
        self.green.set_state(PinState::from(outputs.green_led))?;
        self.buzzer.set_state(PinState::from(outputs.buzzer))?;
        Ok(())
    }

    pub fn set_all(&mut self, state: bool) -> Result<(), E> {
        let state = PinState::from(state);
        self.red.set_state(state)?;
        self.green.set_state(state)?;
        self.buzzer.set_state(state)?;
        Ok(())
    }

    pub fn release(self) -> (R, G, B) {
        (self.red, self.green, self.buzzer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::LockPosition;
    use embedded_hal_mock::eh0::digital::{Mock as PinMock, State, Transaction};

    #[test]
    fn apply_drives_each_line() {
        let red = PinMock::new(&[
            Transaction::set(State::High),
            Transaction::set(State::Low),
        ]);
        let green = PinMock::new(&[
            Transaction::set(State::Low),
            Transaction::set(State::High),
        ]);
        let buzzer = PinMock::new(&[
            Transaction::set(State::Low),
            Transaction::set(State::Low),
        ]);
        let mut indicators = Indicators::new(red, green, buzzer);

        indicators
            .apply(&Outputs {
                lock: LockPosition::Locked,
                red_led: true,
                green_led: false,
                buzzer: false,
            })
            .unwrap();
        indicators
            .apply(&Outputs {
                lock: LockPosition::Unlocked,
                red_led: false,
                green_led: true,
                buzzer: false,
            })
            .unwrap();

        let (mut red, mut green, mut buzzer) = indicators.release();
        red.done();
        green.done();
        buzzer.done();
    }

    #[test]
    fn set_all_for_lamp_test() {
        let expected = [Transaction::set(State::High), Transaction::set(State::Low)];
        let mut indicators = Indicators::new(
            PinMock::new(&expected),
            PinMock::new(&expected),
            PinMock::new(&expected),
        );
        indicators.set_all(true).unwrap();
        indicators.set_all(false).unwrap();

        let (mut red, mut green, mut buzzer) = indicators.release();
        red.done();
        green.done();
        buzzer.done();
    }
}
