//! Pico peripherals behind the stopwatch collaborator traits

use embedded_hal::digital::v2::{OutputPin, PinState};
use max7219::{connectors::SpiConnectorSW, DataError, MAX7219};
use rp_pico::hal::gpio::{
    bank0::{Gpio16, Gpio17, Gpio18, Gpio19},
    DynPinId, FunctionSioInput, FunctionSioOutput, FunctionSpi, Interrupt, Pin, PullDown,
};
use rp_pico::hal::{pac, spi};
use wokwi_stopwatch::config::{DISPLAY_DEVICES, DISPLAY_INTENSITY};
use wokwi_stopwatch::display::DOTS;
use wokwi_stopwatch::{prepare_buffer, Digits, Display, EdgeInput, Status, StatusIndicator};

pub type ButtonPin = Pin<DynPinId, FunctionSioInput, PullDown>;
pub type LedPin = Pin<DynPinId, FunctionSioOutput, PullDown>;

// Type definition for the MAX7219 display
pub type Spi0 = spi::Spi<
    spi::Enabled,
    pac::SPI0,
    (
        Pin<Gpio19, FunctionSpi, PullDown>,
        Pin<Gpio16, FunctionSpi, PullDown>,
        Pin<Gpio18, FunctionSpi, PullDown>,
    ),
>;
pub type CsPin = Pin<Gpio17, FunctionSioOutput, PullDown>;
pub type DisplayDriver = MAX7219<SpiConnectorSW<Spi0, CsPin>>;

/// Active-high push button latching rising edges in the GPIO bank
pub struct Button(ButtonPin);

impl Button {
    pub fn new(pin: ButtonPin) -> Self {
        Self(pin)
    }
}

impl EdgeInput for Button {
    fn listen(&mut self) {
        self.0.clear_interrupt(Interrupt::EdgeHigh);
        self.0.set_interrupt_enabled(Interrupt::EdgeHigh, true);
    }

    fn rising_edge_pending(&self) -> bool {
        self.0.interrupt_status(Interrupt::EdgeHigh)
    }

    fn acknowledge(&mut self) {
        self.0.clear_interrupt(Interrupt::EdgeHigh);
    }
}

/// Red/green legs of the status LED
pub struct RgbStatus {
    red: LedPin,
    green: LedPin,
}

impl RgbStatus {
    pub fn new(red: LedPin, green: LedPin) -> Self {
        Self { red, green }
    }
}

impl StatusIndicator for RgbStatus {
    fn set(&mut self, status: Status) {
        let (red, green) = match status {
            Status::Go => (false, true),
            Status::Stop => (true, false),
            Status::Neutral => (false, false),
        };
        self.red.set_state(PinState::from(red)).ok();
        self.green.set_state(PinState::from(green)).ok();
    }
}

/// 8-digit seven-segment module on a MAX7219
pub struct SegmentDisplay(DisplayDriver);

impl SegmentDisplay {
    pub fn new(mut driver: DisplayDriver) -> Result<Self, DataError> {
        driver.power_on()?;
        for addr in 0..DISPLAY_DEVICES {
            driver.set_intensity(addr, DISPLAY_INTENSITY)?;
            driver.clear_display(addr)?;
        }
        Ok(Self(driver))
    }
}

impl Display for SegmentDisplay {
    fn show_digits(&mut self, digits: Digits) {
        // A failed frame is redrawn on the next pass of the render loop
        self.0.write_str(0, &prepare_buffer(digits), DOTS).ok();
    }
}
