//! Blocking transmit helpers built on the two [TxBackend] primitives.
//!
//! Every sender waits for the transmit-ready flag before each byte and returns once the
//! hardware accepted the last one. Nothing is buffered: when a call returns, all of its bytes
//! have been handed to the transmit holding register.
//!
//! If the hardware never reports ready the blocking senders spin forever. The `try_` family
//! gives up after [Config::poll_limit] polls for a single byte and reports how far it got.

use core::fmt;

use crate::ascii;
use crate::backend::TxBackend;
use crate::config::{ByteOrder, Config, DigitCase};
use crate::error::TxError;

/// Polling transmitter for one UART.
///
/// All senders take `&mut self`, only one sender can be active at a time. Share it between
/// tasks by putting it behind a mutex.
pub struct Transmitter<B> {
    backend: B,
    config: Config,
}

impl<B: TxBackend> Transmitter<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, Config::default())
    }

    pub fn with_config(backend: B, config: Config) -> Self {
        Transmitter { backend, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// gives the backend back to the caller
    pub fn release(self) -> B {
        self.backend
    }

    fn wait_ready(&mut self) {
        while !self.backend.transmit_ready() {
            core::hint::spin_loop();
        }
    }

    /// Waits for the transmit-ready flag and writes `c` unchanged.
    pub fn send_char(&mut self, c: u8) {
        self.wait_ready();
        self.backend.transmit_byte(c);
    }

    pub fn send_byte(&mut self, data: u8) {
        self.send_char(data);
    }

    /// Sends both bytes of `data` in the configured [ByteOrder].
    pub fn send_word(&mut self, data: u16) {
        let bytes = match self.config.byte_order {
            ByteOrder::MsbFirst => data.to_be_bytes(),
            ByteOrder::LsbFirst => data.to_le_bytes(),
        };
        self.send_bytes(&bytes);
    }

    /// Sends all four bytes of `data` in the configured [ByteOrder].
    pub fn send_dword(&mut self, data: u32) {
        let bytes = match self.config.byte_order {
            ByteOrder::MsbFirst => data.to_be_bytes(),
            ByteOrder::LsbFirst => data.to_le_bytes(),
        };
        self.send_bytes(&bytes);
    }

    pub fn send_bytes(&mut self, data: &[u8]) {
        for &b in data {
            self.send_char(b);
        }
    }

    /// Sends `data` as digits in `base`, left padded with [Config::fill] to at least `width`
    /// characters.
    ///
    /// `base` must be within 2..=16. Debug builds assert on it, release builds clamp it.
    pub fn send_unsigned_ascii(&mut self, data: u32, base: u8, width: u8) {
        let case = self.config.digit_case;
        let fill = self.config.fill;
        self.send_number(data, base, width, case, fill);
    }

    /// Sends `data` in decimal with a leading `-` when negative.
    ///
    /// `width` counts the digits only, the sign goes in front of the padding: `-5` with width 3
    /// is sent as `-005`.
    pub fn send_signed_ascii(&mut self, data: i32, width: u8) {
        if data < 0 {
            self.send_char(b'-');
        }
        self.send_unsigned_ascii(data.unsigned_abs(), 10, width);
    }

    pub(crate) fn send_number(&mut self, data: u32, base: u8, width: u8, case: DigitCase, fill: u8) {
        let digits = ascii::to_digits(data, base, case);
        for _ in 0..ascii::padding(digits.len(), width) {
            self.send_char(fill);
        }
        self.send_bytes(&digits);
    }

    /// Sends the bytes of `s` up to, not including, the first NUL.
    pub fn send_string(&mut self, s: &str) {
        for &b in s.as_bytes().iter().take_while(|&&b| b != 0) {
            self.send_char(b);
        }
    }

    /// Sends the first `count` elements of `data` with [Self::send_byte]. A `count` beyond the
    /// slice is cut to its length.
    pub fn send_byte_array(&mut self, data: &[u8], count: u16) {
        for &b in data.iter().take(count as usize) {
            self.send_byte(b);
        }
    }

    /// Sends the first `count` elements of `data` with [Self::send_word].
    pub fn send_word_array(&mut self, data: &[u16], count: u16) {
        for &w in data.iter().take(count as usize) {
            self.send_word(w);
        }
    }

    /// Sends the first `count` elements of `data` with [Self::send_dword].
    pub fn send_dword_array(&mut self, data: &[u32], count: u16) {
        for &d in data.iter().take(count as usize) {
            self.send_dword(d);
        }
    }

    fn poll_ready(&mut self) -> bool {
        for _ in 0..self.config.poll_limit.max(1) {
            if self.backend.transmit_ready() {
                return true;
            }
            core::hint::spin_loop();
        }
        false
    }

    /// Like [Self::send_char] but gives up after [Config::poll_limit] polls.
    pub fn try_send_char(&mut self, c: u8) -> Result<(), TxError> {
        if !self.poll_ready() {
            warn!("UART not ready after {} polls", self.config.poll_limit);
            return Err(TxError::Timeout { sent: 0 });
        }
        self.backend.transmit_byte(c);
        Ok(())
    }

    /// Sends `data` with a poll budget per byte. On timeout the error carries the number of
    /// bytes already sent.
    pub fn try_send_bytes(&mut self, data: &[u8]) -> Result<(), TxError> {
        for (sent, &b) in data.iter().enumerate() {
            self.try_send_char(b)
                .map_err(|_| TxError::Timeout { sent })?;
        }
        Ok(())
    }

    /// Bounded-wait variant of [Self::send_string].
    pub fn try_send_string(&mut self, s: &str) -> Result<(), TxError> {
        let bytes = s.as_bytes();
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        self.try_send_bytes(&bytes[..end])
    }
}

impl<B: TxBackend> fmt::Write for Transmitter<B> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.send_bytes(s.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use super::*;
    use crate::config::ByteOrder;

    /// Records written bytes, reports not ready for `busy` polls before every byte.
    #[derive(Default)]
    struct Wire {
        busy: u32,
        pending: u32,
        polls: u32,
        written: Vec<u8>,
    }

    impl Wire {
        fn busy(busy: u32) -> Self {
            Wire { busy, pending: busy, ..Default::default() }
        }
    }

    impl TxBackend for Wire {
        fn transmit_ready(&mut self) -> bool {
            self.polls += 1;
            if self.pending == 0 {
                true
            } else {
                self.pending -= 1;
                false
            }
        }

        fn transmit_byte(&mut self, byte: u8) {
            assert_eq!(self.pending, 0, "byte written while not ready");
            self.written.push(byte);
            self.pending = self.busy;
        }
    }

    struct Stuck;

    impl TxBackend for Stuck {
        fn transmit_ready(&mut self) -> bool {
            false
        }

        fn transmit_byte(&mut self, _byte: u8) {
            panic!("byte written while not ready");
        }
    }

    fn sent(f: impl FnOnce(&mut Transmitter<Wire>)) -> Vec<u8> {
        let mut tx = Transmitter::new(Wire::default());
        f(&mut tx);
        tx.release().written
    }

    #[test]
    fn send_char_waits_for_ready() {
        let mut tx = Transmitter::new(Wire::busy(3));
        tx.send_char(b'x');
        tx.send_char(b'y');
        let wire = tx.release();
        assert_eq!(wire.written, b"xy");
        // 3 busy polls plus the ready one, per byte
        assert_eq!(wire.polls, 8);
    }

    #[test]
    fn word_and_dword_respect_byte_order() {
        assert_eq!(sent(|tx| tx.send_word(0x1234)), [0x12, 0x34]);
        assert_eq!(sent(|tx| tx.send_dword(0xDEAD_BEEF)), [0xDE, 0xAD, 0xBE, 0xEF]);

        let mut tx = Transmitter::with_config(
            Wire::default(),
            Config::default().with_byte_order(ByteOrder::LsbFirst),
        );
        tx.send_word(0x1234);
        tx.send_dword(0xDEAD_BEEF);
        assert_eq!(tx.release().written, [0x34, 0x12, 0xEF, 0xBE, 0xAD, 0xDE]);
    }

    #[test]
    fn unsigned_ascii_scenarios() {
        assert_eq!(sent(|tx| tx.send_unsigned_ascii(255, 16, 2)), b"FF");
        assert_eq!(sent(|tx| tx.send_unsigned_ascii(5, 10, 4)), b"0005");
        assert_eq!(sent(|tx| tx.send_unsigned_ascii(12345, 10, 2)), b"12345");
        assert_eq!(sent(|tx| tx.send_unsigned_ascii(5, 2, 0)), b"101");
    }

    #[test]
    fn fill_and_case_come_from_config() {
        let config = Config::default()
            .with_fill(b' ')
            .with_digit_case(DigitCase::Lower);
        let mut tx = Transmitter::with_config(Wire::default(), config);
        tx.send_unsigned_ascii(5, 10, 4);
        tx.send_unsigned_ascii(0xAB, 16, 3);
        assert_eq!(tx.release().written, b"   5 ab");
    }

    #[test]
    fn signed_ascii_puts_sign_before_padding() {
        assert_eq!(sent(|tx| tx.send_signed_ascii(-5, 3)), b"-005");
        assert_eq!(sent(|tx| tx.send_signed_ascii(42, 0)), b"42");
        assert_eq!(sent(|tx| tx.send_signed_ascii(0, 0)), b"0");
        assert_eq!(sent(|tx| tx.send_signed_ascii(i32::MIN, 0)), b"-2147483648");
    }

    #[test]
    #[should_panic(expected = "outside 2..=16")]
    #[cfg(debug_assertions)]
    fn invalid_base_asserts_in_debug() {
        sent(|tx| tx.send_unsigned_ascii(10, 17, 0));
    }

    #[test]
    fn string_stops_at_nul() {
        assert_eq!(sent(|tx| tx.send_string("")), b"");
        assert_eq!(sent(|tx| tx.send_string("AB")), b"AB");
        assert_eq!(sent(|tx| tx.send_string("AB\0CD")), b"AB");
    }

    #[test]
    fn arrays_send_count_elements() {
        assert_eq!(sent(|tx| tx.send_byte_array(&[1, 2, 3], 0)), b"");
        assert_eq!(sent(|tx| tx.send_byte_array(&[1, 2, 3], 2)), [1, 2]);
        assert_eq!(sent(|tx| tx.send_byte_array(&[1, 2, 3], 9)), [1, 2, 3]);
        assert_eq!(sent(|tx| tx.send_word_array(&[0x0102, 0x0304], 2)), [1, 2, 3, 4]);
        assert_eq!(sent(|tx| tx.send_dword_array(&[0x0102_0304], 1)), [1, 2, 3, 4]);
    }

    #[test]
    fn try_send_succeeds_within_budget() {
        let mut tx = Transmitter::with_config(Wire::busy(2), Config::default().with_poll_limit(3));
        assert_eq!(tx.try_send_string("hi"), Ok(()));
        assert_eq!(tx.release().written, b"hi");
    }

    #[test]
    fn zero_poll_limit_still_checks_once() {
        let mut tx = Transmitter::with_config(Wire::default(), Config::default().with_poll_limit(0));
        assert_eq!(tx.try_send_char(b'a'), Ok(()));
        let wire = tx.release();
        assert_eq!(wire.written, b"a");
        assert_eq!(wire.polls, 1);

        let mut tx = Transmitter::with_config(Stuck, Config::default().with_poll_limit(0));
        assert_eq!(tx.try_send_char(b'a'), Err(TxError::Timeout { sent: 0 }));
    }

    #[test]
    fn try_send_times_out_on_stuck_hardware() {
        let mut tx = Transmitter::with_config(Stuck, Config::default().with_poll_limit(10));
        assert_eq!(tx.try_send_char(b'a'), Err(TxError::Timeout { sent: 0 }));
        assert_eq!(tx.try_send_bytes(b"abc"), Err(TxError::Timeout { sent: 0 }));
    }

    #[test]
    fn try_send_reports_progress_before_timeout() {
        let mut tx = Transmitter::with_config(Wire::busy(5), Config::default().with_poll_limit(4));
        // the first byte finds the line ready, the second exhausts the budget
        tx.backend_mut().pending = 0;
        assert_eq!(tx.try_send_bytes(b"abc"), Err(TxError::Timeout { sent: 1 }));
        assert_eq!(tx.release().written, b"a");
    }

    #[test]
    fn core_fmt_write_goes_through_the_wire() {
        use core::fmt::Write;

        let mut tx = Transmitter::new(Wire::default());
        write!(tx, "t={} {:02X}", 7, 10).unwrap();
        assert_eq!(tx.release().written, b"t=7 0A");
    }
}
