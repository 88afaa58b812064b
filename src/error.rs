use core::fmt;

/// Errors returned by sensor operations.
///
/// All variants are terminal for the single operation that raised them; the
/// session stays usable and the next operation proceeds normally. Retry
/// policy, if any, belongs to the caller.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error<E: fmt::Debug> {
    /// The underlying bus transaction failed.
    #[error("error while {operation}: {cause:?}")]
    Transport {
        /// What the failed command was trying to do.
        operation: &'static str,
        /// Error reported by the bus implementation.
        cause: E,
    },

    /// A response field's checksum did not match its value bytes.
    ///
    /// The whole measurement is discarded; no partial reading is produced.
    #[error("checksum mismatch in field {field}: sensor sent {received:#04x}, computed {computed:#04x}")]
    Checksum {
        /// Zero-based index of the failing field within the response.
        field: usize,
        /// Checksum byte the sensor sent.
        received: u8,
        /// Checksum computed over the field's value bytes.
        computed: u8,
    },

    /// The response buffer does not hold the expected number of whole fields.
    #[error("malformed response: expected {expected} bytes, got {actual}")]
    Framing {
        /// Bytes the command's catalog entry calls for.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },
}
