#![no_std]
#![no_main]

use core::fmt::Write;
use core::sync::atomic::{AtomicU32, Ordering};

use embassy_executor::Spawner;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::Pull;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use embassy_futures::select::{select, Either};

use embassy_time::{Duration, Instant, Timer};

use static_cell::StaticCell;

use {defmt_rtt as _, panic_probe as _};
use cortex_m_semihosting::hprintln;

use serial_tx::stm32::{ConsoleSync, Usart3Tx};
use serial_tx::{setup_usart_developer_console, uart_printf, Transmitter};

type ButtonSignal = Signal<CriticalSectionRawMutex, ()>;

static STATUS_INTERVAL_MS: AtomicU32 = AtomicU32::new(10000);
static BUTTON_PRESSES: AtomicU32 = AtomicU32::new(0);

static BUTTON_SIGNAL: ButtonSignal = ButtonSignal::new();

static CONSOLE: StaticCell<ConsoleSync> = StaticCell::new();

#[embassy_executor::task]
async fn uart_status_report_transmitter(console: &'static ConsoleSync, button: &'static ButtonSignal) {
    let mut report: u32 = 0;
    loop {
        let interval: u64 = STATUS_INTERVAL_MS.load(Ordering::Relaxed).into();
        let woken_by = select(Timer::after(Duration::from_millis(interval)), button.wait()).await;

        let mut tx = console.lock().await;
        let uptime = Instant::now().as_millis() as u32;
        uart_printf!(tx, "#%05u up %u ms", report, uptime);
        if let Either::Second(()) = woken_by {
            uart_printf!(tx, " - button pressed %u times", BUTTON_PRESSES.load(Ordering::Relaxed));
        }
        tx.send_string("\r\n");

        report = report.wrapping_add(1);
    }
}

#[embassy_executor::task]
async fn uart_raw_dump(console: &'static ConsoleSync) {
    let samples: [u16; 4] = [0x0102, 0x0304, 0xA0B0, 0xC0D0];
    loop {
        Timer::after(Duration::from_millis(2500)).await;

        let mut tx = console.lock().await;
        tx.send_string("raw:");
        tx.send_word_array(&samples, samples.len() as u16);
        tx.send_string("\r\n");
        // core::fmt works alongside printf
        core::write!(tx, "temperature {}.{} C\r\n", 21, 5).unwrap();
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_stm32::init(Default::default());
    let mut button = ExtiInput::new(p.PC13, p.EXTI13, Pull::Down);

    hprintln!("Hello, embedded world!");

    // start developer usart
    let usart = setup_usart_developer_console!(p);
    let mut tx = Transmitter::new(Usart3Tx::new(usart));
    tx.send_string("UART transmitter started\r\n");
    tx.send_signed_ascii(-42, 4);
    tx.send_string(" ");
    tx.send_unsigned_ascii(0xBEEF, 16, 8);
    tx.send_string("\r\n");

    let console: &'static ConsoleSync = CONSOLE.init(ConsoleSync::new(tx));

    spawner.spawn(uart_status_report_transmitter(console, &BUTTON_SIGNAL)).unwrap();
    spawner.spawn(uart_raw_dump(console)).unwrap();

    loop {
        button.wait_for_rising_edge().await;
        BUTTON_PRESSES.fetch_add(1, Ordering::Relaxed);
        BUTTON_SIGNAL.signal(());
        Timer::after(Duration::from_millis(50)).await;
    }
}
