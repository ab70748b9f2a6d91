//! The hardware boundary of the transmit helper.
//!
//! A target provides exactly two primitives: a read of the transmit-ready flag and a write of
//! one byte into the transmit holding register. Everything in [crate::transmit] is built from
//! these two calls.

/// Register level access to one UART transmitter.
pub trait TxBackend {
    /// true when the transmit holding register can accept a new byte
    fn transmit_ready(&mut self) -> bool;

    /// writes one byte into the transmit holding register, the hardware clears the ready flag
    /// until the byte has moved on
    fn transmit_byte(&mut self, byte: u8);
}

impl<B: TxBackend + ?Sized> TxBackend for &mut B {
    fn transmit_ready(&mut self) -> bool {
        (**self).transmit_ready()
    }

    fn transmit_byte(&mut self, byte: u8) {
        (**self).transmit_byte(byte)
    }
}

/// A backend assembled from two closures, one per primitive.
///
/// ```
/// use serial_tx::backend::FnBackend;
/// use serial_tx::Transmitter;
///
/// let mut line = [0u8; 2];
/// let mut pos = 0;
/// let backend = FnBackend::new(|| true, |b| { line[pos] = b; pos += 1; });
/// Transmitter::new(backend).send_string("ok");
/// assert_eq!(&line, b"ok");
/// ```
pub struct FnBackend<R, W> {
    ready: R,
    write: W,
}

impl<R, W> FnBackend<R, W>
where
    R: FnMut() -> bool,
    W: FnMut(u8),
{
    pub fn new(ready: R, write: W) -> Self {
        FnBackend { ready, write }
    }
}

impl<R, W> TxBackend for FnBackend<R, W>
where
    R: FnMut() -> bool,
    W: FnMut(u8),
{
    fn transmit_ready(&mut self) -> bool {
        (self.ready)()
    }

    fn transmit_byte(&mut self, byte: u8) {
        (self.write)(byte)
    }
}
