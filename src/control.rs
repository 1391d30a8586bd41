//! Button event handlers
//!
//! Event codes are the bit of the button that fired. Codes a handler does not
//! know are ignored and leave all state untouched.

use crate::clock::Stopwatch;

/// Transport-control buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlEvent {
    Start,
    Stop,
    Reset,
    /// Wired but has no function
    Unused,
}

impl ControlEvent {
    pub const ALL: [ControlEvent; 4] = [
        ControlEvent::Start,
        ControlEvent::Stop,
        ControlEvent::Reset,
        ControlEvent::Unused,
    ];

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0x04 => Some(ControlEvent::Start),
            0x08 => Some(ControlEvent::Stop),
            0x10 => Some(ControlEvent::Reset),
            0x20 => Some(ControlEvent::Unused),
            _ => None,
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            ControlEvent::Start => 0x04,
            ControlEvent::Stop => 0x08,
            ControlEvent::Reset => 0x10,
            ControlEvent::Unused => 0x20,
        }
    }
}

/// What the status LED shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Green
    Go,
    /// Red
    Stop,
    /// Off
    Neutral,
}

/// Visual run/stop indicator. Fire-and-forget.
pub trait StatusIndicator {
    fn set(&mut self, status: Status);
}

/// Applies a transport-control event to the stopwatch flags.
///
/// Returns the recognized event, or `None` if the code was ignored.
pub fn handle_control<S: StatusIndicator>(
    stopwatch: &mut Stopwatch,
    indicator: &mut S,
    code: u8,
) -> Option<ControlEvent> {
    let event = ControlEvent::from_code(code)?;
    match event {
        ControlEvent::Start => {
            indicator.set(Status::Go);
            stopwatch.start();
        }
        ControlEvent::Stop => {
            indicator.set(Status::Stop);
            stopwatch.stop();
        }
        ControlEvent::Reset => {
            indicator.set(Status::Neutral);
            stopwatch.request_reset();
        }
        ControlEvent::Unused => {}
    }
    Some(event)
}

/// Adjustment buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdjustEvent {
    Increment,
    Decrement,
}

impl AdjustEvent {
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0x08 => Some(AdjustEvent::Increment),
            0x04 => Some(AdjustEvent::Decrement),
            _ => None,
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            AdjustEvent::Increment => 0x08,
            AdjustEvent::Decrement => 0x04,
        }
    }
}

/// Counter in `0..=15` that wraps in both directions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdjustmentCounter(u8);

impl AdjustmentCounter {
    pub const MAX: u8 = 15;

    /// Creates a counter, clamping `value` to `MAX`.
    pub const fn new(value: u8) -> Self {
        if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub fn increment(&mut self) {
        // Bound is checked before the add, so the value never reaches 16
        if self.0 >= Self::MAX {
            self.0 = 0;
        } else {
            self.0 += 1;
        }
    }

    pub fn decrement(&mut self) {
        if self.0 == 0 {
            self.0 = Self::MAX;
        } else {
            self.0 -= 1;
        }
    }
}

/// Applies an adjustment event to the counter.
///
/// Returns the recognized event, or `None` if the code was ignored.
pub fn handle_adjust(counter: &mut AdjustmentCounter, code: u8) -> Option<AdjustEvent> {
    let event = AdjustEvent::from_code(code)?;
    match event {
        AdjustEvent::Increment => counter.increment(),
        AdjustEvent::Decrement => counter.decrement(),
    }
    Some(event)
}
