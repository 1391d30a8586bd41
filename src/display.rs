use core::fmt::Write;

use heapless::String;

use crate::clock::Digits;

/// Digits on one MAX7219 seven-segment module
pub const DISPLAY_WIDTH: usize = 8;

/// Decimal points after the minutes and the seconds ones digit (bit 7 is the leftmost digit)
pub const DOTS: u8 = 0b0000_1010;

/// Renders stopwatch digits. Must not block.
pub trait Display {
    fn show_digits(&mut self, digits: Digits);
}

/// Lays the stopwatch digits out as one row of text for the seven-segment module.
///
/// The row reads `"    MSST"`, right-aligned: minutes, seconds tens, seconds ones,
/// tenths. Out-of-range digits give a blank row.
pub fn prepare_buffer(digits: Digits) -> [u8; DISPLAY_WIDTH] {
    let [tenths, sec_ones, sec_tens, minutes] = digits;

    let mut row = [b' '; DISPLAY_WIDTH];
    if digits.iter().any(|&d| d > 9) {
        return row;
    }

    let mut text: String<DISPLAY_WIDTH> = String::new();
    let written = write!(text, "{:>5}{}{}{}", minutes, sec_tens, sec_ones, tenths);

    if written.is_ok() && text.len() == DISPLAY_WIDTH {
        row.copy_from_slice(text.as_bytes());
    }
    row
}
