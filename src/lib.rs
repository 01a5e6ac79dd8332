//! Keypad vault firmware
//!
//! A 4x4 keypad unlocks a servo bolt. Vibration hits and wrong codes count
//! as strikes; enough of them inside the reset window, or the door opening
//! while locked, sounds the alarm until the reset code is entered.
//!
//! Everything above `hal` is written against `embedded-hal` traits and
//! builds on the host for testing.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

pub mod application;
pub mod config;
pub mod diagnostics;
pub mod drivers;
pub mod logger;
pub mod security;

#[cfg(all(target_arch = "avr", feature = "atmega328p"))]
pub mod hal;
