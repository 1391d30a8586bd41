//! Board and timing configuration
//!
//! The firmware has no runtime configuration store; these are fixed at build time.

/// Crystal on the Pico board
pub const XTAL_FREQ_HZ: u32 = 12_000_000;

/// SPI clock to the MAX7219
pub const SPI_BAUD_HZ: u32 = 2_000_000;

/// Period of the timekeeping tick in microseconds (1 ms)
pub const TICK_PERIOD_US: u32 = 1_000;

/// Ticks between heartbeat LED toggles
pub const HEARTBEAT_TICKS: u16 = 500;

/// Number of chained MAX7219 devices
pub const DISPLAY_DEVICES: usize = 1;

/// MAX7219 brightness, 0x0..=0xF
pub const DISPLAY_INTENSITY: u8 = 0x4;
