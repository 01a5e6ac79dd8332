pub mod door_sensor;
pub mod indicator;
pub mod keypad;
pub mod serial_console;
pub mod servo_lock;

pub use door_sensor::{DoorEvent, DoorSensor};
pub use indicator::Indicators;
pub use keypad::Keypad;
pub use serial_console::SerialConsole;
pub use servo_lock::ServoLock;
