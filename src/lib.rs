//! Board-agnostic stopwatch logic
//!
//! Everything here runs without hardware so it can be tested on the host:
//!
//! - Timekeeping state machine driven by a 1 ms tick
//! - Edge-triggered input routing for the two button groups
//! - Transport-control and adjustment handlers
//! - Display collaborator trait and digit formatting
//!
//! The RTIC application in `main.rs` binds these to the Pico's peripherals.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod control;
pub mod display;
pub mod input;

pub use clock::{Digits, RunState, Stopwatch, StopwatchTime};
pub use control::{
    handle_adjust, handle_control, AdjustEvent, AdjustmentCounter, ControlEvent, Status,
    StatusIndicator,
};
pub use display::{prepare_buffer, Display};
pub use input::{EdgeInput, InputGroup};
