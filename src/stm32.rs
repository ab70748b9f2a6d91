//! USART3 backend for the NUCLEO-F767ZI developer console (ST-LINK virtual COM port).
//!
//! The embassy driver configures the peripheral and pins. Transmission then polls the
//! `ISR.TXE` flag and writes `TDR` directly, one byte at a time.

use embassy_stm32::mode::Blocking;
use embassy_stm32::pac;
use embassy_stm32::usart::UartTx;

use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_sync::mutex::Mutex;

use crate::backend::TxBackend;
use crate::transmit::Transmitter;

/// Transmitter on USART3 protected by Mutex
pub type ConsoleSync = Mutex<ThreadModeRawMutex, Transmitter<Usart3Tx<'static>>>;

#[macro_export]
macro_rules! setup_usart_developer_console {
    ($p:ident) => {
        // setup usart, tx only
        embassy_stm32::usart::UartTx::new_blocking(
            $p.USART3,
            $p.PD8, // tx
            embassy_stm32::usart::Config::default(),
        ).expect("USART generation failed")
    }
}

pub struct Usart3Tx<'d> {
    /// keeps the peripheral clocked and the pin in its alternate function
    _tx: UartTx<'d, Blocking>,
}

impl<'d> Usart3Tx<'d> {
    pub fn new(tx: UartTx<'d, Blocking>) -> Self {
        Usart3Tx { _tx: tx }
    }
}

impl TxBackend for Usart3Tx<'_> {
    fn transmit_ready(&mut self) -> bool {
        pac::USART3.isr().read().txe()
    }

    fn transmit_byte(&mut self, byte: u8) {
        pac::USART3.tdr().write(|w| w.set_dr(byte as u16));
    }
}
