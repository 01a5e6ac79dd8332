//! 4x4 matrix keypad scanner
//!
//! Rows are driven outputs, columns are pulled-up inputs. A row is pulled
//! low while its columns are read; a column that reads low has its key
//! held down.

use crate::config::{KEYMAP, KEYPAD_COLS, KEYPAD_ROWS, KEY_DEBOUNCE_TICKS};
use embedded_hal::digital::v2::{InputPin, OutputPin};

pub struct Keypad<R, C> {
    rows: [R; KEYPAD_ROWS],
    cols: [C; KEYPAD_COLS],
    candidate: Option<u8>,
    stable_ticks: u8,
    idle_ticks: u8,
    reported: bool,
}

impl<R, C, E> Keypad<R, C>
where
    R: OutputPin<Error = E>,
    C: InputPin<Error = E>,
{
    pub fn new(mut rows: [R; KEYPAD_ROWS], cols: [C; KEYPAD_COLS]) -> Result<Self, E> {
        // Idle rows sit high so no column is pulled down
        for row in rows.iter_mut() {
            row.set_high()?;
        }
        Ok(Self {
            rows,
            cols,
            candidate: None,
            stable_ticks: 0,
            idle_ticks: 0,
            reported: false,
        })
    }

    /// Raw scan. Returns the first held key in row-major order.
    pub fn scan(&mut self) -> Result<Option<u8>, E> {
        for (r, row) in self.rows.iter_mut().enumerate() {
            row.set_low()?;

            let mut found = None;
            for (c, col) in self.cols.iter().enumerate() {
                if col.is_low()? && found.is_none() {
                    found = Some(KEYMAP[r][c]);
                }
            }

            row.set_high()?;
            if found.is_some() {
                return Ok(found);
            }
        }
        Ok(None)
    }

    /// Debounced scan, called once per millisecond tick. A key is reported
    /// once per press, after it has been seen on `KEY_DEBOUNCE_TICKS`
    /// consecutive polls. The keypad re-arms only after as many empty polls.
    pub fn poll(&mut self) -> Result<Option<u8>, E> {
        let key = self.scan()?;

        match key {
            None => {
                self.idle_ticks = self.idle_ticks.saturating_add(1);
                if self.idle_ticks >= KEY_DEBOUNCE_TICKS {
                    self.candidate = None;
                    self.stable_ticks = 0;
                    self.reported = false;
                }
                return Ok(None);
            }
            Some(k) if self.candidate == Some(k) => {
                self.idle_ticks = 0;
                self.stable_ticks = self.stable_ticks.saturating_add(1);
            }
            Some(k) => {
                self.idle_ticks = 0;
                self.candidate = Some(k);
                self.stable_ticks = 1;
                self.reported = false;
            }
        }

        if !self.reported && self.stable_ticks >= KEY_DEBOUNCE_TICKS {
            self.reported = true;
            return Ok(key);
        }
        Ok(None)
    }

    pub fn release(self) -> ([R; KEYPAD_ROWS], [C; KEYPAD_COLS]) {
        (self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh0::digital::{Mock as PinMock, State, Transaction};

    type Expectations = (Vec<Vec<Transaction>>, Vec<Vec<Transaction>>);

    // Builds per-pin transaction lists for keypad construction followed by
    // one scan per entry in `held`
    fn expect_scans(held: &[Option<(usize, usize)>]) -> Expectations {
        let mut rows: Vec<Vec<Transaction>> = (0..KEYPAD_ROWS)
            .map(|_| vec![Transaction::set(State::High)])
            .collect();
        let mut cols: Vec<Vec<Transaction>> = (0..KEYPAD_COLS).map(|_| Vec::new()).collect();

        for key in held {
            for r in 0..KEYPAD_ROWS {
                rows[r].push(Transaction::set(State::Low));
                for c in 0..KEYPAD_COLS {
                    let level = if *key == Some((r, c)) {
                        State::Low
                    } else {
                        State::High
                    };
                    cols[c].push(Transaction::get(level));
                }
                rows[r].push(Transaction::set(State::High));
                if matches!(key, Some((held_row, _)) if *held_row == r) {
                    break;
                }
            }
        }
        (rows, cols)
    }

    fn build(held: &[Option<(usize, usize)>]) -> Keypad<PinMock, PinMock> {
        let (rows, cols) = expect_scans(held);
        let rows = [
            PinMock::new(&rows[0]),
            PinMock::new(&rows[1]),
            PinMock::new(&rows[2]),
            PinMock::new(&rows[3]),
        ];
        let cols = [
            PinMock::new(&cols[0]),
            PinMock::new(&cols[1]),
            PinMock::new(&cols[2]),
            PinMock::new(&cols[3]),
        ];
        Keypad::new(rows, cols).unwrap()
    }

    fn finish(keypad: Keypad<PinMock, PinMock>) {
        let (rows, cols) = keypad.release();
        for mut pin in rows.into_iter().chain(cols) {
            pin.done();
        }
    }

    #[test]
    fn scan_finds_key_and_stops() {
        let mut keypad = build(&[Some((1, 2)), None]);
        assert_eq!(keypad.scan().unwrap(), Some(b'6'));
        assert_eq!(keypad.scan().unwrap(), None);
        finish(keypad);
    }

    #[test]
    fn scan_maps_bottom_row() {
        let mut keypad = build(&[Some((3, 0)), Some((3, 2)), Some((3, 3))]);
        assert_eq!(keypad.scan().unwrap(), Some(b'*'));
        assert_eq!(keypad.scan().unwrap(), Some(b'#'));
        assert_eq!(keypad.scan().unwrap(), Some(b'D'));
        finish(keypad);
    }

    #[test]
    fn held_key_reported_once_after_debounce() {
        let held = Some((0, 0));
        let mut keypad = build(&[held, held, held, held, held]);
        assert_eq!(keypad.poll().unwrap(), None);
        assert_eq!(keypad.poll().unwrap(), None);
        assert_eq!(keypad.poll().unwrap(), Some(b'1'));
        assert_eq!(keypad.poll().unwrap(), None);
        assert_eq!(keypad.poll().unwrap(), None);
        finish(keypad);
    }

    #[test]
    fn release_rearms_same_key() {
        let held = Some((2, 3));
        let mut keypad = build(&[held, held, held, None, None, None, held, held, held]);
        let reported: Vec<_> = (0..9).filter_map(|_| keypad.poll().unwrap()).collect();
        assert_eq!(reported, vec![b'C', b'C']);
        finish(keypad);
    }

    #[test]
    fn contact_chatter_reports_key_once() {
        let held = Some((2, 3));
        let mut keypad = build(&[held, held, held, None, held, None, None, held, held]);
        let reported: Vec<_> = (0..9).filter_map(|_| keypad.poll().unwrap()).collect();
        assert_eq!(reported, vec![b'C']);
        finish(keypad);
    }

    #[test]
    fn bounce_to_other_key_restarts_debounce() {
        let mut keypad = build(&[
            Some((0, 1)),
            Some((0, 1)),
            Some((1, 1)),
            Some((1, 1)),
            Some((1, 1)),
        ]);
        let reported: Vec<_> = (0..5).filter_map(|_| keypad.poll().unwrap()).collect();
        assert_eq!(reported, vec![b'5']);
        finish(keypad);
    }
}
