use byteorder::{BigEndian, ByteOrder};
use core::fmt;

/// Reads a big-endian `u16` from the first two bytes of `bytes`.
pub(crate) fn read_u16_be(bytes: &[u8]) -> u16 {
    BigEndian::read_u16(bytes)
}

/// Writes `value` big-endian into the first two bytes of `bytes`.
pub(crate) fn write_u16_be(bytes: &mut [u8], value: u16) {
    BigEndian::write_u16(bytes, value);
}

/// Typed views over the data span of an acknowledgement frame.
pub trait FromPayload: Sized {
    fn from_payload(payload: &[u8]) -> Result<Self, Error>;
}

/// Failures the transport engine can report. These are distinct from the
/// status codes the sensor itself returns: a [`StatusCode`](crate::StatusCode)
/// means the module answered, an `Error` means no trustworthy answer was
/// produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An append would exceed the parameter buffer's fixed capacity, or a
    /// reply declares a frame larger than the receive buffer.
    Overflow,

    /// An empty or otherwise unusable argument was handed to an encode call.
    InvalidArgument,

    /// Fewer bytes than a complete frame arrived within the retry budget.
    Truncated,

    /// The reply's header or device id does not match the request's; the
    /// frame is malformed or meant for someone else.
    PrefixMismatch,

    /// A reply arrived but its checksum does not hold; nothing in the frame,
    /// including the status code, can be trusted.
    ChecksumMismatch {
        /// Checksum carried in the frame.
        expected: u16,
        /// Checksum recomputed over the flag-through-data span.
        computed: u16,
    },

    /// The transport accepted fewer bytes than the encoded frame.
    WriteFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Overflow => write!(f, "fixed buffer capacity exceeded"),
            Error::InvalidArgument => write!(f, "invalid argument"),
            Error::Truncated => write!(f, "reply truncated within the retry budget"),
            Error::PrefixMismatch => write!(f, "reply header or device id mismatch"),
            Error::ChecksumMismatch { expected, computed } => write!(
                f,
                "reply checksum mismatch (frame {:#06x}, computed {:#06x})",
                expected, computed
            ),
            Error::WriteFailed => write!(f, "transport accepted a short write"),
        }
    }
}
