#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;
use rtic::app;

mod board;

#[app(device = rp_pico::hal::pac, peripherals = true, dispatchers = [I2C0_IRQ])]
mod app {
    use crate::board::{Button, LedPin, RgbStatus, SegmentDisplay};
    use defmt::{debug, info, trace, unwrap, warn};
    use embedded_hal::digital::v2::ToggleableOutputPin;
    use max7219::MAX7219;
    use rp_pico::hal::{
        clocks::{init_clocks_and_plls, Clock},
        fugit::{ExtU32, RateExtU32},
        sio::Sio,
        spi::Spi,
        timer::{Alarm, Alarm0, Timer},
        watchdog::Watchdog,
    };
    use wokwi_stopwatch::config::{
        DISPLAY_DEVICES, HEARTBEAT_TICKS, SPI_BAUD_HZ, TICK_PERIOD_US, XTAL_FREQ_HZ,
    };
    use wokwi_stopwatch::{
        handle_adjust, handle_control, AdjustEvent, AdjustmentCounter, ControlEvent, Display,
        InputGroup, Status, StatusIndicator, Stopwatch,
    };

    // Shared resources (accessed by multiple tasks)
    #[shared]
    struct Shared {
        stopwatch: Stopwatch,
    }

    // Local resources (accessed by single tasks)
    #[local]
    struct Local {
        alarm: Alarm0,
        heartbeat_led: LedPin,
        control_inputs: InputGroup<Button, 4>,
        adjust_inputs: InputGroup<Button, 2>,
        status: RgbStatus,
        display: SegmentDisplay,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        info!("stopwatch booting");

        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let clocks = unwrap!(init_clocks_and_plls(
            XTAL_FREQ_HZ,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok());

        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
        let mut alarm = unwrap!(timer.alarm_0());
        unwrap!(alarm.schedule(TICK_PERIOD_US.micros()).ok());
        alarm.enable_interrupt();

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let heartbeat_led = pins.led.into_push_pull_output().into_dyn_pin();

        // Buttons are active high; each one reports its own code on a rising edge
        let mut control_inputs = InputGroup::new([
            (
                ControlEvent::Start.code(),
                Button::new(pins.gpio2.into_pull_down_input().into_dyn_pin()),
            ),
            (
                ControlEvent::Stop.code(),
                Button::new(pins.gpio3.into_pull_down_input().into_dyn_pin()),
            ),
            (
                ControlEvent::Reset.code(),
                Button::new(pins.gpio4.into_pull_down_input().into_dyn_pin()),
            ),
            (
                ControlEvent::Unused.code(),
                Button::new(pins.gpio5.into_pull_down_input().into_dyn_pin()),
            ),
        ]);
        let mut adjust_inputs = InputGroup::new([
            (
                AdjustEvent::Decrement.code(),
                Button::new(pins.gpio6.into_pull_down_input().into_dyn_pin()),
            ),
            (
                AdjustEvent::Increment.code(),
                Button::new(pins.gpio7.into_pull_down_input().into_dyn_pin()),
            ),
        ]);
        control_inputs.listen();
        adjust_inputs.listen();

        let mut status = RgbStatus::new(
            pins.gpio10.into_push_pull_output().into_dyn_pin(),
            pins.gpio11.into_push_pull_output().into_dyn_pin(),
        );
        status.set(Status::Neutral);

        let mosi = pins.gpio19.into_function::<rp_pico::hal::gpio::FunctionSpi>();
        let sck = pins.gpio18.into_function::<rp_pico::hal::gpio::FunctionSpi>();
        let miso = pins.gpio16.into_function::<rp_pico::hal::gpio::FunctionSpi>();
        let cs = pins.gpio17.into_push_pull_output();

        let spi = Spi::<_, _, _, 8>::new(pac.SPI0, (mosi, miso, sck));
        let spi = spi.init(
            &mut pac.RESETS,
            clocks.peripheral_clock.freq(),
            SPI_BAUD_HZ.Hz(),
            &embedded_hal::spi::MODE_0,
        );

        let driver = unwrap!(MAX7219::from_spi_cs(DISPLAY_DEVICES, spi, cs).ok());
        let display = unwrap!(SegmentDisplay::new(driver).ok());

        info!(
            "init done, control codes {=[u8]:#x}, adjust codes {=[u8]:#x}",
            &control_inputs.codes()[..],
            &adjust_inputs.codes()[..]
        );

        (
            Shared {
                stopwatch: Stopwatch::new(),
            },
            Local {
                alarm,
                heartbeat_led,
                control_inputs,
                adjust_inputs,
                status,
                display,
            },
            init::Monotonics(),
        )
    }

    // Render loop: runs whenever no interrupt is active
    #[idle(shared = [stopwatch], local = [display])]
    fn idle(mut ctx: idle::Context) -> ! {
        loop {
            let digits = ctx.shared.stopwatch.lock(|sw| sw.snapshot());
            ctx.local.display.show_digits(digits);
        }
    }

    // Hardware Task: Timer Interrupt (1 kHz)
    #[task(
        binds = TIMER_IRQ_0,
        priority = 3,
        shared = [stopwatch],
        local = [alarm, heartbeat_led, heartbeat: u16 = 0]
    )]
    fn tick(mut ctx: tick::Context) {
        // Clear interrupt and schedule next
        ctx.local.alarm.clear_interrupt();
        ctx.local.alarm.schedule(TICK_PERIOD_US.micros()).ok();

        ctx.shared.stopwatch.lock(|sw| sw.on_tick());

        *ctx.local.heartbeat += 1;
        if *ctx.local.heartbeat >= HEARTBEAT_TICKS {
            *ctx.local.heartbeat = 0;
            ctx.local.heartbeat_led.toggle().ok();
        }
    }

    // Hardware Task: GPIO Interrupt (Button Press)
    #[task(
        binds = IO_IRQ_BANK0,
        priority = 2,
        shared = [stopwatch],
        local = [control_inputs, adjust_inputs, status]
    )]
    fn buttons(mut ctx: buttons::Context) {
        let status = ctx.local.status;
        let stopwatch = &mut ctx.shared.stopwatch;

        ctx.local.control_inputs.service(|code| {
            match stopwatch.lock(|sw| handle_control(sw, &mut *status, code)) {
                Some(event) => debug!("control {}", event),
                None => trace!("ignored control code {=u8:#x}", code),
            }
        });

        // Adjustments run at priority 1 through the task queue
        ctx.local.adjust_inputs.service(|code| {
            if adjust::spawn(code).is_err() {
                warn!("adjust queue full, dropped code {=u8:#x}", code);
            }
        });
    }

    // Software Task: Adjustment counter
    #[task(
        priority = 1,
        capacity = 4,
        local = [counter: AdjustmentCounter = AdjustmentCounter::new(0)]
    )]
    fn adjust(ctx: adjust::Context, code: u8) {
        let counter = ctx.local.counter;
        match handle_adjust(counter, code) {
            Some(event) => debug!("adjust {}, counter {=u8}", event, counter.value()),
            None => trace!("ignored adjust code {=u8:#x}", code),
        }
    }
}
