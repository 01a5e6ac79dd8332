//! Keypad code accumulation and matching

use crate::config::{CLEAR_KEY, CODE_CAPACITY, SUBMIT_KEY};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CodeMatch {
    Master,
    Reset,
    Invalid,
}

pub struct CodeEntry {
    buffer: [u8; CODE_CAPACITY],
    len: usize,
    // A key arrived at a full buffer; the entry can no longer match
    overflowed: bool,
    master: &'static str,
    reset: &'static str,
}

impl CodeEntry {
    pub fn new(master: &'static str, reset: &'static str) -> Self {
        Self {
            buffer: [0; CODE_CAPACITY],
            len: 0,
            overflowed: false,
            master,
            reset,
        }
    }

    /// Feed one key. Returns a match result when the key submits a code.
    pub fn press(&mut self, key: u8) -> Option<CodeMatch> {
        match key {
            CLEAR_KEY => {
                self.clear();
                None
            }
            SUBMIT_KEY => self.submit(),
            _ => {
                if self.len < CODE_CAPACITY {
                    self.buffer[self.len] = key;
                    self.len += 1;
                } else {
                    self.overflowed = true;
                }
                None
            }
        }
    }

    /// Compare what was typed against both codes and empty the buffer
    pub fn submit(&mut self) -> Option<CodeMatch> {
        if self.len == 0 {
            return None;
        }

        let entered = &self.buffer[..self.len];
        let is_master = codes_match(entered, self.master.as_bytes()) && !self.overflowed;
        let is_reset = codes_match(entered, self.reset.as_bytes()) && !self.overflowed;
        self.clear();

        Some(if is_master {
            CodeMatch::Master
        } else if is_reset {
            CodeMatch::Reset
        } else {
            CodeMatch::Invalid
        })
    }

    pub fn clear(&mut self) {
        self.buffer = [0; CODE_CAPACITY];
        self.len = 0;
        self.overflowed = false;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Equality whose running time depends only on the buffer capacity
pub fn codes_match(entered: &[u8], code: &[u8]) -> bool {
    let mut diff = (entered.len() != code.len()) as u8;
    let span = CODE_CAPACITY.max(entered.len()).max(code.len());
    for i in 0..span {
        let a = entered.get(i).copied().unwrap_or(0);
        let b = code.get(i).copied().unwrap_or(0);
        diff |= a ^ b;
    }
    diff == 0
}
