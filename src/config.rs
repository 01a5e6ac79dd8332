//! Configuration constants for the vault controller
//!
//! Pin map, secret codes and tuning parameters live here and nowhere else.
//! Line ids follow the Arduino Uno numbering: 0-13 are the digital header,
//! `A0`..`A5` are 14-19.
//!
//! The default configuration is checked at compile time, so aliased pins,
//! an out-of-range threshold or unusable codes fail the build.

use ufmt::derive::uDebug;

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 16_000_000;

/// UART baud rate
pub const UART_BAUD: u32 = 9600;

/// Watchdog timeout period in milliseconds
pub const WDT_TIMEOUT_MS: u16 = 1000;

// Analog header aliases
pub const A0: u8 = 14;
pub const A1: u8 = 15;
pub const A2: u8 = 16;
pub const A3: u8 = 17;
pub const A4: u8 = 18;
pub const A5: u8 = 19;

/// Highest line id the board exposes
pub const LAST_LINE: u8 = A5;

// --- Hardware pins ---
pub const PIN_SERVO: u8 = 10;
pub const PIN_BUZZER: u8 = 11;
/// Door reed switch, closed pulls the line low
pub const PIN_BTN: u8 = 12;
pub const PIN_LED_RED: u8 = 13;
pub const PIN_LED_GRN: u8 = A1;
/// Vibration sensor, analog
pub const PIN_VIB: u8 = A0;

// --- Keypad ---
pub const KEYPAD_ROWS: usize = 4;
pub const KEYPAD_COLS: usize = 4;
pub const ROW_PINS: [u8; KEYPAD_ROWS] = [9, 8, 7, 6];
pub const COL_PINS: [u8; KEYPAD_COLS] = [5, 4, 3, 2];

/// Key legends, indexed `[row][col]`
pub const KEYMAP: [[u8; KEYPAD_COLS]; KEYPAD_ROWS] = [
    *b"123A",
    *b"456B",
    *b"789C",
    *b"*0#D",
];

/// Discards the code typed so far
pub const CLEAR_KEY: u8 = b'*';
/// Submits the code typed so far
pub const SUBMIT_KEY: u8 = b'#';

/// Consecutive 1 ms polls a key must be held, or released, before it counts
pub const KEY_DEBOUNCE_TICKS: u8 = 3;

/// Consecutive 1 ms polls the reed switch must hold a new level
pub const DOOR_DEBOUNCE_TICKS: u8 = 5;

// --- Security secrets ---
/// Unlocks the door
pub const MASTER_CODE: &str = "1234";
/// Silences a running alarm
pub const ALARM_RESET_CODE: &str = "A";

/// Longest code the entry buffer holds
pub const CODE_CAPACITY: usize = 8;

// --- Tuning parameters ---
/// Vibration sensitivity, compared against a 10-bit ADC sample
pub const VIB_THRESHOLD: u16 = 900;
/// Minimum gap between accepted vibration strikes
pub const COOLDOWN_MS: u32 = 300;
/// Idle time after which the strike count starts over
pub const RESET_WINDOW_MS: u32 = 10_000;
/// Strikes needed to trigger the alarm
pub const ALARM_TRIGGER_COUNT: u8 = 5;

/// Largest value the 10-bit ADC returns
pub const ADC_MAX: u16 = 1023;

// --- Lock actuation ---
pub const SERVO_PERIOD_US: u32 = 20_000;
pub const SERVO_MIN_PULSE_US: u32 = 544;
pub const SERVO_MAX_PULSE_US: u32 = 2400;
pub const LOCKED_ANGLE: u8 = 0;
pub const UNLOCKED_ANGLE: u8 = 90;

/// Unlocked door that is never opened relocks after this long
pub const UNLOCK_HOLD_MS: u32 = 5_000;

/// Half period of the red LED while the alarm sounds
pub const ALARM_BLINK_MS: u32 = 250;

/// Every line the pin map assigns: six discrete lines plus the keypad
pub const PIN_COUNT: usize = 6 + KEYPAD_ROWS + KEYPAD_COLS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, uDebug)]
pub enum ConfigError {
    InvalidLine { pin: u8 },
    DuplicatePin { pin: u8 },
    NotAnalogPin { pin: u8 },
    ThresholdOutOfRange,
    ZeroCooldown,
    ZeroResetWindow,
    ZeroTriggerCount,
    EmptyCode,
    CodesEqual,
    CodeTooLong,
    CodeNotOnKeypad { key: u8 },
}

/// Hardware line assignments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinMap {
    pub servo: u8,
    pub buzzer: u8,
    pub door: u8,
    pub led_red: u8,
    pub led_green: u8,
    pub vibration: u8,
    pub rows: [u8; KEYPAD_ROWS],
    pub cols: [u8; KEYPAD_COLS],
}

impl PinMap {
    pub const DEFAULT: PinMap = PinMap {
        servo: PIN_SERVO,
        buzzer: PIN_BUZZER,
        door: PIN_BTN,
        led_red: PIN_LED_RED,
        led_green: PIN_LED_GRN,
        vibration: PIN_VIB,
        rows: ROW_PINS,
        cols: COL_PINS,
    };

    /// All assigned lines, discrete pins first, then rows, then columns
    pub const fn lines(&self) -> [u8; PIN_COUNT] {
        let mut out = [0u8; PIN_COUNT];
        out[0] = self.servo;
        out[1] = self.buzzer;
        out[2] = self.door;
        out[3] = self.led_red;
        out[4] = self.led_green;
        out[5] = self.vibration;
        let mut i = 0;
        while i < KEYPAD_ROWS {
            out[6 + i] = self.rows[i];
            i += 1;
        }
        let mut j = 0;
        while j < KEYPAD_COLS {
            out[6 + KEYPAD_ROWS + j] = self.cols[j];
            j += 1;
        }
        out
    }

    pub const fn validate(&self) -> Result<(), ConfigError> {
        let lines = self.lines();
        let mut i = 0;
        while i < PIN_COUNT {
            if lines[i] > LAST_LINE {
                return Err(ConfigError::InvalidLine { pin: lines[i] });
            }
            let mut j = i + 1;
            while j < PIN_COUNT {
                if lines[i] == lines[j] {
                    return Err(ConfigError::DuplicatePin { pin: lines[i] });
                }
                j += 1;
            }
            i += 1;
        }
        if self.vibration < A0 || self.vibration > A5 {
            return Err(ConfigError::NotAnalogPin { pin: self.vibration });
        }
        Ok(())
    }
}

/// Frozen configuration the security runtime is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub pins: PinMap,
    pub master_code: &'static str,
    pub reset_code: &'static str,
    pub vib_threshold: u16,
    pub cooldown_ms: u32,
    pub reset_window_ms: u32,
    pub alarm_trigger_count: u8,
}

impl Config {
    pub const DEFAULT: Config = Config {
        pins: PinMap::DEFAULT,
        master_code: MASTER_CODE,
        reset_code: ALARM_RESET_CODE,
        vib_threshold: VIB_THRESHOLD,
        cooldown_ms: COOLDOWN_MS,
        reset_window_ms: RESET_WINDOW_MS,
        alarm_trigger_count: ALARM_TRIGGER_COUNT,
    };

    pub const fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = self.pins.validate() {
            return Err(e);
        }
        if self.vib_threshold > ADC_MAX {
            return Err(ConfigError::ThresholdOutOfRange);
        }
        if self.cooldown_ms == 0 {
            return Err(ConfigError::ZeroCooldown);
        }
        if self.reset_window_ms == 0 {
            return Err(ConfigError::ZeroResetWindow);
        }
        if self.alarm_trigger_count == 0 {
            return Err(ConfigError::ZeroTriggerCount);
        }
        if let Err(e) = validate_code(self.master_code) {
            return Err(e);
        }
        if let Err(e) = validate_code(self.reset_code) {
            return Err(e);
        }
        if same_bytes(self.master_code.as_bytes(), self.reset_code.as_bytes()) {
            return Err(ConfigError::CodesEqual);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const _: () = assert!(
    Config::DEFAULT.validate().is_ok(),
    "default configuration is invalid"
);

/// True when `key` is printed on the keypad
pub const fn is_keypad_key(key: u8) -> bool {
    let mut r = 0;
    while r < KEYPAD_ROWS {
        let mut c = 0;
        while c < KEYPAD_COLS {
            if KEYMAP[r][c] == key {
                return true;
            }
            c += 1;
        }
        r += 1;
    }
    false
}

// A code must be typeable and must not contain the clear/submit keys
const fn validate_code(code: &str) -> Result<(), ConfigError> {
    let bytes = code.as_bytes();
    if bytes.is_empty() {
        return Err(ConfigError::EmptyCode);
    }
    if bytes.len() > CODE_CAPACITY {
        return Err(ConfigError::CodeTooLong);
    }
    let mut i = 0;
    while i < bytes.len() {
        let key = bytes[i];
        if !is_keypad_key(key) || key == CLEAR_KEY || key == SUBMIT_KEY {
            return Err(ConfigError::CodeNotOnKeypad { key });
        }
        i += 1;
    }
    Ok(())
}

const fn same_bytes(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(Config::DEFAULT.validate(), Ok(()));
        assert_eq!(Config::default(), Config::DEFAULT);
    }

    #[test]
    fn all_pins_are_distinct() {
        let lines = PinMap::DEFAULT.lines();
        for (i, a) in lines.iter().enumerate() {
            for b in &lines[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn pin_map_matches_wiring() {
        assert_eq!(
            PinMap::DEFAULT.lines(),
            [10, 11, 12, 13, 15, 14, 9, 8, 7, 6, 5, 4, 3, 2]
        );
    }

    #[test]
    fn tuning_parameters_in_range() {
        assert!(VIB_THRESHOLD <= ADC_MAX);
        assert!(COOLDOWN_MS > 0);
        assert!(RESET_WINDOW_MS > 0);
        assert!(ALARM_TRIGGER_COUNT >= 1);
    }

    #[test]
    fn codes_non_empty_and_distinct() {
        assert!(!MASTER_CODE.is_empty());
        assert!(!ALARM_RESET_CODE.is_empty());
        assert_ne!(MASTER_CODE, ALARM_RESET_CODE);
    }

    #[test]
    fn rejects_aliased_keypad_pin() {
        let mut config = Config::DEFAULT;
        config.pins.rows[2] = PIN_SERVO;
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicatePin { pin: PIN_SERVO })
        );
    }

    #[test]
    fn rejects_line_off_the_header() {
        let mut config = Config::DEFAULT;
        config.pins.buzzer = 20;
        assert_eq!(config.validate(), Err(ConfigError::InvalidLine { pin: 20 }));
    }

    #[test]
    fn rejects_digital_vibration_pin() {
        let mut config = Config::DEFAULT;
        config.pins.vibration = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotAnalogPin { pin: 0 })
        );
    }

    #[test]
    fn rejects_bad_tuning() {
        let mut config = Config::DEFAULT;
        config.vib_threshold = 1024;
        assert_eq!(config.validate(), Err(ConfigError::ThresholdOutOfRange));

        let mut config = Config::DEFAULT;
        config.cooldown_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroCooldown));

        let mut config = Config::DEFAULT;
        config.reset_window_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroResetWindow));

        let mut config = Config::DEFAULT;
        config.alarm_trigger_count = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTriggerCount));
    }

    #[test]
    fn rejects_bad_codes() {
        let mut config = Config::DEFAULT;
        config.master_code = "";
        assert_eq!(config.validate(), Err(ConfigError::EmptyCode));

        let mut config = Config::DEFAULT;
        config.reset_code = MASTER_CODE;
        assert_eq!(config.validate(), Err(ConfigError::CodesEqual));

        let mut config = Config::DEFAULT;
        config.master_code = "123456789";
        assert_eq!(config.validate(), Err(ConfigError::CodeTooLong));

        let mut config = Config::DEFAULT;
        config.master_code = "12#4";
        assert_eq!(
            config.validate(),
            Err(ConfigError::CodeNotOnKeypad { key: b'#' })
        );

        let mut config = Config::DEFAULT;
        config.reset_code = "E";
        assert_eq!(
            config.validate(),
            Err(ConfigError::CodeNotOnKeypad { key: b'E' })
        );
    }

    #[test]
    fn keymap_lookup() {
        assert!(is_keypad_key(b'0'));
        assert!(is_keypad_key(b'D'));
        assert!(!is_keypad_key(b'E'));
    }
}
