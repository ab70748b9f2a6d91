use thiserror::Error;

/// Errors of the bounded-wait send family. The blocking senders never fail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxError {
    /// the transmit-ready flag stayed low for the whole poll budget
    #[error("UART transmitter not ready after the poll limit, {sent} bytes sent")]
    Timeout {
        /// bytes the hardware accepted before the timeout
        sent: usize,
    },
}
