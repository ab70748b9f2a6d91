//! A minimal printf for the transmitter. Only built with the `printf` feature.
//!
//! Supported conversions: `%c %s %d %i %u %x %X %%`, each optionally preceded by a `0` flag and
//! a decimal width, e.g. `%08X` or `%4d`. Without the `0` flag the padding is spaces. Unknown
//! conversions are sent as written. A conversion without a matching argument sends nothing,
//! surplus arguments are ignored.
//!
//! ```
//! use serial_tx::backend::FnBackend;
//! use serial_tx::{uart_printf, Transmitter};
//!
//! let mut out = heapless::Vec::<u8, 32>::new();
//! let mut tx = Transmitter::new(FnBackend::new(|| true, |b| { let _ = out.push(b); }));
//! uart_printf!(tx, "adc%u=%04X\r\n", 3u8, 0x1fu16);
//! drop(tx);
//! assert_eq!(out.as_slice(), b"adc3=001F\r\n");
//! ```

use crate::backend::TxBackend;
use crate::config::DigitCase;
use crate::transmit::Transmitter;

/// One printf argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arg<'a> {
    Char(char),
    Str(&'a str),
    Int(i32),
    Uint(u32),
}

impl Arg<'_> {
    /// bit pattern of the argument as C would reinterpret it for `%u` and `%x`
    fn as_u32(&self) -> Option<u32> {
        match *self {
            Arg::Char(c) => Some(c as u32),
            Arg::Int(v) => Some(v as u32),
            Arg::Uint(v) => Some(v),
            Arg::Str(_) => None,
        }
    }

    fn as_i32(&self) -> Option<i32> {
        match *self {
            Arg::Char(c) => Some(c as i32),
            Arg::Int(v) => Some(v),
            Arg::Uint(v) => Some(v as i32),
            Arg::Str(_) => None,
        }
    }
}

macro_rules! arg_from {
    ($variant:ident: $($t:ty),*) => {
        $(
            impl From<$t> for Arg<'_> {
                fn from(v: $t) -> Self {
                    Arg::$variant(v as _)
                }
            }
        )*
    };
}

arg_from!(Int: i8, i16, i32, isize);
arg_from!(Uint: u8, u16, u32, usize);

impl From<char> for Arg<'_> {
    fn from(c: char) -> Self {
        Arg::Char(c)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Arg::Str(s)
    }
}

/// Flags and width collected between `%` and the conversion character.
#[derive(Clone, Copy, Default)]
struct Spec {
    zero: bool,
    width: u8,
}

impl Spec {
    fn fill(&self) -> u8 {
        if self.zero {
            b'0'
        } else {
            b' '
        }
    }
}

impl<B: TxBackend> Transmitter<B> {
    /// Formats `args` into `format` and sends the result byte by byte.
    pub fn printf(&mut self, format: &str, args: &[Arg<'_>]) {
        let bytes = format.as_bytes();
        let mut args = args.iter();
        let mut i = 0;

        while i < bytes.len() {
            let b = bytes[i];
            i += 1;
            if b != b'%' {
                self.send_char(b);
                continue;
            }

            let start = i - 1;
            let mut spec = Spec::default();
            if bytes.get(i) == Some(&b'0') {
                spec.zero = true;
                i += 1;
            }
            while let Some(d) = bytes.get(i).filter(|d| d.is_ascii_digit()) {
                spec.width = spec.width.saturating_mul(10).saturating_add(d - b'0');
                i += 1;
            }

            let Some(&conv) = bytes.get(i) else {
                // dangling '%' or width at the end of the format
                self.send_bytes(&bytes[start..]);
                break;
            };
            i += 1;

            match conv {
                b'%' => self.send_char(b'%'),
                b'c' => {
                    if let Some(arg) = args.next() {
                        self.send_arg_char(arg, spec);
                    }
                }
                b's' => {
                    if let Some(arg) = args.next() {
                        self.send_arg_str(arg, spec);
                    }
                }
                b'd' | b'i' => {
                    if let Some(v) = args.next().and_then(Arg::as_i32) {
                        self.send_signed(v, spec);
                    }
                }
                b'u' => {
                    if let Some(v) = args.next().and_then(Arg::as_u32) {
                        self.send_number(v, 10, spec.width, DigitCase::Upper, spec.fill());
                    }
                }
                b'x' | b'X' => {
                    let case = if conv == b'x' { DigitCase::Lower } else { DigitCase::Upper };
                    if let Some(v) = args.next().and_then(Arg::as_u32) {
                        self.send_number(v, 16, spec.width, case, spec.fill());
                    }
                }
                _ => {
                    trace!("printf: unknown conversion {}", conv);
                    self.send_bytes(&bytes[start..i]);
                }
            }
        }
    }

    fn send_pad(&mut self, len: usize, spec: Spec) {
        for _ in 0..(spec.width as usize).saturating_sub(len) {
            self.send_char(b' ');
        }
    }

    fn send_arg_char(&mut self, arg: &Arg<'_>, spec: Spec) {
        let c = match *arg {
            Arg::Char(c) => c,
            Arg::Int(v) => v as u8 as char,
            Arg::Uint(v) => v as u8 as char,
            Arg::Str(s) => s.chars().next().unwrap_or(' '),
        };
        let mut buf = [0u8; 4];
        let encoded = c.encode_utf8(&mut buf);
        self.send_pad(1, spec);
        self.send_bytes(encoded.as_bytes());
    }

    fn send_arg_str(&mut self, arg: &Arg<'_>, spec: Spec) {
        match *arg {
            Arg::Str(s) => {
                let s = s.split('\0').next().unwrap_or("");
                self.send_pad(s.chars().count(), spec);
                self.send_string(s);
            }
            Arg::Char(_) => self.send_arg_char(arg, spec),
            Arg::Int(v) => self.send_signed(v, Spec { zero: false, ..spec }),
            Arg::Uint(v) => self.send_number(v, 10, spec.width, DigitCase::Upper, b' '),
        }
    }

    /// C style signed output: the width includes the sign, zero padding goes after it.
    fn send_signed(&mut self, v: i32, spec: Spec) {
        let digits = crate::ascii::to_digits(v.unsigned_abs(), 10, DigitCase::Upper);
        let len = digits.len() + usize::from(v < 0);
        let pad = (spec.width as usize).saturating_sub(len);

        if !spec.zero {
            for _ in 0..pad {
                self.send_char(b' ');
            }
        }
        if v < 0 {
            self.send_char(b'-');
        }
        if spec.zero {
            for _ in 0..pad {
                self.send_char(b'0');
            }
        }
        self.send_bytes(&digits);
    }
}

/// Formats into a [Transmitter] with printf conversions.
///
/// `uart_printf!(tx, "x=%d\r\n", x)` calls [Transmitter::printf] with every argument converted
/// through [Arg::from].
#[macro_export]
macro_rules! uart_printf {
    ($tx:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $tx.printf($fmt, &[$($crate::printf::Arg::from($arg)),*])
    };
}
