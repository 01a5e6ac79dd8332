use std::env;

const MCU: &str = "atmega328p";
const MCU_FREQ_HZ: u32 = 16_000_000;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let target = env::var("TARGET").unwrap_or_default();
    if !target.contains("avr") {
        // Host builds only run the hardware-independent layers and tests
        return;
    }

    println!("cargo:rustc-link-arg=-mmcu={}", MCU);
    println!("cargo:warning=Building for {} at {}Hz", MCU, MCU_FREQ_HZ);
}
