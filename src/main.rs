#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(target_arch = "avr")]
mod firmware {
    use avr_device::atmega328p::Peripherals;
    use core::convert::Infallible;
    use panic_halt as _;
    use vault_guard_firmware::application::Application;
    use vault_guard_firmware::config::{Config, PinMap, WDT_TIMEOUT_MS};
    use vault_guard_firmware::diagnostics::ErrorCode;
    use vault_guard_firmware::drivers::{
        DoorSensor, Indicators, Keypad, SerialConsole, ServoLock,
    };
    use vault_guard_firmware::hal::gpio::{Input, Output};
    use vault_guard_firmware::hal::{
        delay_ms, millis, next_tick, Adc, Pin, ServoPwm, SysTick, Uart, Watchdog, WatchdogTimeout,
    };
    use vault_guard_firmware::logger::Logger;
    use vault_guard_firmware::security::Inputs;

    const LAMP_TEST_MS: u32 = 200;

    fn halt() -> ! {
        loop {
            avr_device::asm::sleep();
        }
    }

    fn infallible<T>(result: Result<T, Infallible>) -> T {
        match result {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    // Lines are range-checked at compile time by the config module
    fn output(line: u8) -> Pin<Output> {
        match Pin::<Output>::output(line) {
            Some(pin) => pin,
            None => halt(),
        }
    }

    fn input(line: u8) -> Pin<Input> {
        match Pin::<Input>::input_pull_up(line) {
            Some(pin) => pin,
            None => halt(),
        }
    }

    #[avr_device::entry]
    fn main() -> ! {
        let _dp = Peripherals::take().unwrap();
        let pins = PinMap::DEFAULT;

        let _tick = SysTick::start();
        let logger = Logger::new(SerialConsole::new(Uart::new()));

        // Enable interrupts globally
        unsafe { avr_device::interrupt::enable() };

        let mut app = match Application::new(&Config::DEFAULT, logger) {
            Ok(app) => app,
            Err(_) => halt(),
        };

        let mut keypad = infallible(Keypad::new(pins.rows.map(output), pins.cols.map(input)));
        let mut door = infallible(DoorSensor::new(input(pins.door)));
        let mut indicators = Indicators::new(
            output(pins.led_red),
            output(pins.led_green),
            output(pins.buzzer),
        );
        let mut servo = match ServoPwm::new() {
            Some(pwm) => ServoLock::new(pwm),
            None => halt(),
        };
        let mut adc = Adc::new();

        // Lamp test
        infallible(indicators.set_all(true));
        delay_ms(LAMP_TEST_MS);
        infallible(indicators.set_all(false));

        let mut watchdog = Watchdog::new();
        watchdog.start(WatchdogTimeout::from_ms(WDT_TIMEOUT_MS));
        app.logger_mut().info("armed").ok();

        // Debounce counters advance once per pass, so each pass waits for a fresh tick
        let mut now_ms = millis();
        loop {
            now_ms = next_tick(now_ms);
            watchdog.feed();

            let key = match keypad.poll() {
                Ok(key) => key,
                Err(_) => {
                    app.report(ErrorCode::Keypad, 1, now_ms);
                    None
                }
            };

            let door_event = match door.poll() {
                Ok(event) => event,
                Err(_) => {
                    app.report(ErrorCode::Sensor, 1, now_ms);
                    None
                }
            };

            let vibration = adc.read_line(pins.vibration);
            if vibration.is_none() {
                app.report(ErrorCode::Sensor, 2, now_ms);
            }

            let outputs = app.tick(Inputs {
                now_ms,
                key,
                door: door_event,
                vibration,
            });

            servo.apply(outputs.lock);
            if indicators.apply(&outputs).is_err() {
                app.report(ErrorCode::Actuator, 1, now_ms);
            }
        }
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {
    use vault_guard_firmware::config::Config;

    let config = Config::DEFAULT;
    println!("vault_guard_firmware targets the ATmega328P.");
    println!("Build with: cargo build --release --target avr-unknown-gnu-atmega328");
    println!("pins: {:?}", config.pins);
    println!(
        "vibration threshold {} / cooldown {} ms / reset window {} ms / {} strikes to alarm",
        config.vib_threshold, config.cooldown_ms, config.reset_window_ms, config.alarm_trigger_count
    );
}
