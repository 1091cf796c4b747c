//! # PressWatch Firmware
//!
//! Button press monitor for the Nucleo-F411RE.
//!
//! | Signal | Pin | Notes |
//! |--------|-----|-------|
//! | Button | PC13 | Active-LOW, pull-up |
//! | Green LED | PA5 | Short press (< 500 ms) |
//! | Red LED | PA6 | Long press (>= 500 ms) |
//! | Yellow LED | PA7 | Activity blink |
//! | Console | PA2 (USART2 TX) | 9600 baud, via the ST-LINK VCP |
//!
//! Build with `cargo build --release --features firmware --target
//! thumbv7em-none-eabihf`.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt_rtt as _;
use panic_halt as _;
use stm32f4xx_hal::{pac, prelude::*};

use presswatch::arch::cortex_m4::SysTickClock;
use presswatch::button::ButtonTask;
use presswatch::config::{
    BlinkConfig, ButtonConfig, REPORT_TASK_PERIOD_MS, SERIAL_BAUD, SHORT_PRESS_THRESHOLD_MS,
    SYSTEM_CLOCK_HZ,
};
use presswatch::kernel::{self, Shared};
use presswatch::report::{self, ReportTask};
use presswatch::stats::StatsTask;

/// Firmware entry point. Brings up the board, prints the banner and
/// hands control to the scheduler. Does not return.
#[entry]
fn main() -> ! {
    let mut cp = cortex_m::Peripherals::take().unwrap();
    let dp = pac::Peripherals::take().unwrap();

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.sysclk(SYSTEM_CLOCK_HZ.Hz()).freeze();

    let gpioa = dp.GPIOA.split();
    let gpioc = dp.GPIOC.split();

    // --- Pins: all LEDs off before the first task runs ---
    let button = gpioc.pc13.into_pull_up_input();
    let mut green = gpioa.pa5.into_push_pull_output();
    let mut red = gpioa.pa6.into_push_pull_output();
    let mut yellow = gpioa.pa7.into_push_pull_output();
    green.set_low();
    red.set_low();
    yellow.set_low();

    let mut console = dp
        .USART2
        .tx(gpioa.pa2, SERIAL_BAUD.bps(), &clocks)
        .expect("USART2 configuration rejected");

    if report::write_banner(&mut console).is_err() {
        defmt::warn!("console rejected the banner");
    }

    let clock = SysTickClock::start(cp.SYST, &mut cp.SCB, clocks.sysclk().raw());

    // --- Tasks ---
    let mut button_task = ButtonTask::new(button, green, red, ButtonConfig::DEFAULT);
    let mut stats_task = StatsTask::new(yellow, BlinkConfig::DEFAULT);
    let mut report_task = ReportTask::new(console, REPORT_TASK_PERIOD_MS, SHORT_PRESS_THRESHOLD_MS);

    let mut shared = Shared::new();
    let mut scheduler = kernel::init(
        &clock,
        kernel::task_table(&mut button_task, &mut stats_task, &mut report_task),
    );

    kernel::run(&clock, &mut scheduler, &mut shared, cortex_m::asm::wfi)
}
