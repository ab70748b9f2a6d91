//! Blocking UART transmit helpers for microcontrollers.
//!
//! A target supplies the two primitives of [TxBackend]: the transmit-ready flag and a one byte
//! write into the transmit holding register. [Transmitter] builds characters, raw bytes, words,
//! double words, ascii numbers, strings and arrays on top of them by busy waiting for the
//! ready flag before every byte. There is no buffering, a call returns once the hardware took
//! its last byte.
//!
//! The printf-style formatter in [printf] is behind the default `printf` feature. Build with
//! `--no-default-features` for toolchains or targets where it is not wanted, [core::fmt::Write]
//! stays available either way.
//!
//! The `stm32` feature adds a USART3 backend for the NUCLEO-F767ZI board.
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod ascii;
pub mod backend;
pub mod config;
pub mod error;
pub mod transmit;

#[cfg(feature = "printf")]
pub mod printf;

#[cfg(feature = "stm32")]
pub mod stm32;

pub use backend::TxBackend;
pub use config::{ByteOrder, Config, DigitCase};
pub use error::TxError;
pub use transmit::Transmitter;

#[cfg(feature = "printf")]
pub use printf::Arg;
