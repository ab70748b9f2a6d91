//! Output conventions of a [crate::Transmitter].

/// Order in which multi-byte values leave the transmitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteOrder {
    /// most significant byte first
    #[default]
    MsbFirst,

    /// least significant byte first
    LsbFirst,
}

/// Letter case of the digits above 9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitCase {
    #[default]
    Upper,
    Lower,
}

impl DigitCase {
    pub(crate) fn digits(self) -> &'static [u8; 16] {
        match self {
            DigitCase::Upper => b"0123456789ABCDEF",
            DigitCase::Lower => b"0123456789abcdef",
        }
    }
}

pub const DEFAULT_FILL: u8 = b'0';
pub const DEFAULT_POLL_LIMIT: u32 = 100_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub byte_order: ByteOrder,

    /// case used by the ascii senders, `%X` and `%x` in printf override it
    pub digit_case: DigitCase,

    /// pad character for numbers shorter than the requested width
    pub fill: u8,

    /// ready polls per byte before a `try_` sender gives up, 0 still polls once
    pub poll_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            byte_order: ByteOrder::default(),
            digit_case: DigitCase::default(),
            fill: DEFAULT_FILL,
            poll_limit: DEFAULT_POLL_LIMIT,
        }
    }
}

impl Config {
    pub const fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub const fn with_digit_case(mut self, digit_case: DigitCase) -> Self {
        self.digit_case = digit_case;
        self
    }

    pub const fn with_fill(mut self, fill: u8) -> Self {
        self.fill = fill;
        self
    }

    pub const fn with_poll_limit(mut self, poll_limit: u32) -> Self {
        self.poll_limit = poll_limit;
        self
    }
}
