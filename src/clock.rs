//! Timekeeping state machine
//!
//! Advances one raw tick at a time and carries tenths into seconds into minutes.
//! Minutes wrap from 9 back to 0 with no hours field.

/// Raw 1 ms ticks per tenth of a second
pub const TICKS_PER_TENTH: u8 = 100;
/// Tenths per second
pub const TENTHS_PER_SECOND: u8 = 10;
/// Seconds per minute
pub const SECONDS_PER_MINUTE: u8 = 60;
/// Minutes wrap to zero at this value
pub const MINUTES_WRAP: u8 = 10;

/// Display-ready decomposition: `[tenths, seconds_ones, seconds_tens, minutes]`
pub type Digits = [u8; 4];

/// Elapsed stopwatch time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StopwatchTime {
    /// Tenths of a second, 0-9
    pub tenths: u8,
    /// 0-59
    pub seconds: u8,
    /// 0-9
    pub minutes: u8,
}

impl StopwatchTime {
    pub const ZERO: Self = Self {
        tenths: 0,
        seconds: 0,
        minutes: 0,
    };

    pub const fn new(tenths: u8, seconds: u8, minutes: u8) -> Self {
        Self {
            tenths,
            seconds,
            minutes,
        }
    }

    /// Splits the time into the four display digits.
    pub fn digits(&self) -> Digits {
        [
            self.tenths,
            self.seconds % 10,
            self.seconds / 10,
            self.minutes,
        ]
    }
}

/// Run/reset flags set by the control handler and consumed by the tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunState {
    pub running: bool,
    pub reset_requested: bool,
}

/// Stopwatch state shared between the tick, input and render contexts
#[derive(Debug, Default)]
pub struct Stopwatch {
    time: StopwatchTime,
    run: RunState,
    /// Raw ticks since the last tenth, 0-99
    sub_ticks: u8,
}

impl Stopwatch {
    pub const fn new() -> Self {
        Self {
            time: StopwatchTime::ZERO,
            run: RunState {
                running: false,
                reset_requested: false,
            },
            sub_ticks: 0,
        }
    }

    /// Advances the stopwatch by one raw tick.
    ///
    /// Does nothing while stopped. A pending reset is applied at the end of a
    /// running tick, so a reset requested while stopped waits for the next start.
    pub fn on_tick(&mut self) {
        if !self.run.running {
            return;
        }

        self.sub_ticks += 1;
        if self.sub_ticks >= TICKS_PER_TENTH {
            self.sub_ticks = 0;
            self.add_tenth();
        }

        if self.run.reset_requested {
            self.run = RunState::default();
            self.sub_ticks = 0;
            self.time = StopwatchTime::ZERO;
        }
    }

    /// Increments the tenths. Handles rollover to seconds.
    fn add_tenth(&mut self) {
        self.time.tenths += 1;
        if self.time.tenths >= TENTHS_PER_SECOND {
            self.time.tenths = 0;
            self.add_second();
        }
    }

    /// Increments the second. Handles rollover to minutes.
    fn add_second(&mut self) {
        self.time.seconds += 1;
        if self.time.seconds >= SECONDS_PER_MINUTE {
            self.time.seconds = 0;
            self.add_minute();
        }
    }

    /// Increments the minute, wrapping at the top without further carry.
    fn add_minute(&mut self) {
        self.time.minutes += 1;
        if self.time.minutes >= MINUTES_WRAP {
            self.time.minutes = 0;
        }
    }

    pub fn start(&mut self) {
        self.run.running = true;
    }

    pub fn stop(&mut self) {
        self.run.running = false;
    }

    /// Flags a reset for the next running tick.
    pub fn request_reset(&mut self) {
        self.run.reset_requested = true;
    }

    pub fn time(&self) -> StopwatchTime {
        self.time
    }

    pub fn run_state(&self) -> RunState {
        self.run
    }

    /// Current time as display digits. Pure read.
    pub fn snapshot(&self) -> Digits {
        self.time.digits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread;

    fn running() -> Stopwatch {
        let mut sw = Stopwatch::new();
        sw.start();
        sw
    }

    fn tick_n(sw: &mut Stopwatch, n: u32) {
        for _ in 0..n {
            sw.on_tick();
        }
    }

    #[test]
    fn test_hundred_ticks_make_one_tenth() {
        let mut sw = running();
        tick_n(&mut sw, 99);
        assert_eq!(sw.time(), StopwatchTime::ZERO);
        assert_eq!(sw.sub_ticks, 99);

        sw.on_tick();
        assert_eq!(sw.time(), StopwatchTime::new(1, 0, 0));
        assert_eq!(sw.sub_ticks, 0);
    }

    #[test]
    fn test_thousand_ticks_make_one_second() {
        let mut sw = running();
        tick_n(&mut sw, 1_000);
        assert_eq!(sw.time(), StopwatchTime::new(0, 1, 0));
    }

    #[test]
    fn test_sixty_seconds_make_one_minute() {
        let mut sw = running();
        tick_n(&mut sw, 60_000);
        assert_eq!(sw.time(), StopwatchTime::new(0, 0, 1));
    }

    #[test]
    fn test_minutes_wrap_without_carry() {
        let mut sw = running();
        tick_n(&mut sw, 599_999);
        assert_eq!(sw.time(), StopwatchTime::new(9, 59, 9));

        sw.on_tick();
        assert_eq!(sw.time(), StopwatchTime::ZERO);
        assert!(sw.run_state().running);
    }

    #[test]
    fn test_stopped_ticks_change_nothing() {
        let mut sw = running();
        tick_n(&mut sw, 1_250);
        sw.stop();
        tick_n(&mut sw, 5_000);
        assert_eq!(sw.time(), StopwatchTime::new(2, 1, 0));
        assert_eq!(sw.sub_ticks, 50);
    }

    #[test]
    fn test_reset_applies_on_next_running_tick() {
        let mut sw = running();
        tick_n(&mut sw, 12_345);
        sw.request_reset();
        assert_eq!(sw.time(), StopwatchTime::new(3, 12, 0));

        sw.on_tick();
        assert_eq!(sw.time(), StopwatchTime::ZERO);
        assert_eq!(sw.sub_ticks, 0);
        assert_eq!(sw.run_state(), RunState::default());

        // Reset also stops the count
        tick_n(&mut sw, 1_000);
        assert_eq!(sw.time(), StopwatchTime::ZERO);
    }

    #[test]
    fn test_reset_while_stopped_is_deferred() {
        let mut sw = running();
        tick_n(&mut sw, 2_000);
        sw.stop();
        sw.request_reset();
        tick_n(&mut sw, 500);

        assert_eq!(sw.time(), StopwatchTime::new(0, 2, 0));
        assert!(sw.run_state().reset_requested);

        // The pending reset fires on the first tick after a restart
        sw.start();
        sw.on_tick();
        assert_eq!(sw.time(), StopwatchTime::ZERO);
        assert!(!sw.run_state().running);
        assert!(!sw.run_state().reset_requested);
    }

    #[test]
    fn test_snapshot_digit_order() {
        let mut sw = running();
        // 7 min 42.5 s
        tick_n(&mut sw, 7 * 60_000 + 42_000 + 500);
        assert_eq!(sw.snapshot(), [5, 2, 4, 7]);
    }

    #[test]
    fn test_snapshot_is_pure() {
        let mut sw = running();
        tick_n(&mut sw, 3_300);
        let first = sw.snapshot();
        assert_eq!(sw.snapshot(), first);
        assert_eq!(sw.sub_ticks, 0);
    }

    #[test]
    fn test_concurrent_snapshots_stay_in_range() {
        let sw = Arc::new(Mutex::new(running()));
        let done = Arc::new(AtomicBool::new(false));

        let ticker = {
            let sw = Arc::clone(&sw);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                for _ in 0..200_000 {
                    sw.lock().unwrap().on_tick();
                }
                done.store(true, Ordering::Release);
            })
        };

        let mut samples = 0u32;
        while !done.load(Ordering::Acquire) || samples == 0 {
            let [tenths, sec_ones, sec_tens, minutes] = sw.lock().unwrap().snapshot();
            assert!(tenths <= 9);
            assert!(sec_ones <= 9);
            assert!(sec_tens <= 5);
            assert!(minutes <= 9);
            samples += 1;
        }

        ticker.join().unwrap();
        assert_eq!(sw.lock().unwrap().time(), StopwatchTime::new(0, 20, 3));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_time_matches_tick_count(n in 0u32..700_000) {
            let mut sw = running();
            tick_n(&mut sw, n);

            let tenths_total = n / TICKS_PER_TENTH as u32;
            let expected = StopwatchTime::new(
                (tenths_total % 10) as u8,
                ((tenths_total / 10) % 60) as u8,
                ((tenths_total / 600) % 10) as u8,
            );
            prop_assert_eq!(sw.time(), expected);
            prop_assert_eq!(sw.sub_ticks as u32, n % TICKS_PER_TENTH as u32);
        }

        #[test]
        fn prop_fields_stay_in_range(n in 0u32..700_000) {
            let mut sw = running();
            tick_n(&mut sw, n);

            let t = sw.time();
            prop_assert!(t.tenths < TENTHS_PER_SECOND);
            prop_assert!(t.seconds < SECONDS_PER_MINUTE);
            prop_assert!(t.minutes < MINUTES_WRAP);
            prop_assert!(sw.sub_ticks < TICKS_PER_TENTH);
        }
    }
}
