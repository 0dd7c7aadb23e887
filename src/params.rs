use arrayvec::ArrayVec;

use crate::frame::BROADCAST_DEVICE_ID;
use crate::utils::{write_u16_be, Error};

/// Maximum number of parameter bytes a single command can carry.
///
/// Protocol payloads are short, so a fixed backing array keeps the buffer off
/// the heap on a resource-constrained target.
pub const MAX_PARAMS_LEN: usize = 20;

/// Bounded, appendable byte sequence used to assemble a command's variable
/// payload before framing.
///
/// A `Params` also carries the device id the command is addressed to; the
/// default is the broadcast id `0xFFFFFFFF`. The buffer may be [`clear`]ed and
/// reused across commands without losing the device id.
///
/// [`clear`]: Params::clear
#[derive(Debug, Clone)]
pub struct Params {
    device_id: u32,
    buf: ArrayVec<[u8; MAX_PARAMS_LEN]>,
}

impl Params {
    /// Creates an empty buffer addressed to the broadcast device id.
    pub fn new() -> Self {
        Self::with_device_id(BROADCAST_DEVICE_ID)
    }

    /// Creates an empty buffer addressed to a specific device.
    pub fn with_device_id(device_id: u32) -> Self {
        Self {
            device_id,
            buf: ArrayVec::new(),
        }
    }

    /// Appends one byte. Fails with [`Error::Overflow`] when the buffer is
    /// full, leaving the contents untouched.
    pub fn append_u8(&mut self, value: u8) -> Result<(), Error> {
        self.buf.try_push(value).map_err(|_| Error::Overflow)
    }

    /// Appends the big-endian encoding of a 16-bit value. Fails with
    /// [`Error::Overflow`] when fewer than two bytes remain, leaving the
    /// contents untouched.
    pub fn append_u16(&mut self, value: u16) -> Result<(), Error> {
        let mut bytes = [0u8; 2];
        write_u16_be(&mut bytes, value);
        self.append_bytes(&bytes)
    }

    /// Appends a raw byte range. Fails with [`Error::Overflow`] when fewer
    /// than `data.len()` bytes remain, leaving the contents untouched.
    pub fn append_bytes(&mut self, data: &[u8]) -> Result<(), Error> {
        self.buf
            .try_extend_from_slice(data)
            .map_err(|_| Error::Overflow)
    }

    /// Resets the length to zero. Capacity and device id are retained.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn device_id(&self) -> u32 {
        self.device_id
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_u16_is_big_endian() {
        let mut params = Params::new();
        params.append_u16(0x1234).unwrap();
        assert_eq!(params.as_bytes(), &[0x12, 0x34]);
    }

    #[test]
    fn appends_accumulate_in_order() {
        let mut params = Params::new();
        params.append_u8(0x01).unwrap();
        params.append_u16(0x0000).unwrap();
        params.append_u16(0x0063).unwrap();
        assert_eq!(params.as_bytes(), &[0x01, 0x00, 0x00, 0x00, 0x63]);
        assert_eq!(params.len(), 5);
    }

    #[test]
    fn overflow_leaves_contents_untouched() {
        let mut params = Params::new();
        params.append_bytes(&[0xAA; MAX_PARAMS_LEN - 1]).unwrap();

        assert_eq!(params.append_u16(0x1234), Err(Error::Overflow));
        assert_eq!(params.append_bytes(&[0x01, 0x02]), Err(Error::Overflow));
        assert_eq!(params.len(), MAX_PARAMS_LEN - 1);
        assert!(params.as_bytes().iter().all(|&b| b == 0xAA));

        // One byte of room is still usable.
        params.append_u8(0xBB).unwrap();
        assert_eq!(params.append_u8(0xCC), Err(Error::Overflow));
    }

    #[test]
    fn exact_fit_is_accepted() {
        let mut params = Params::new();
        params.append_bytes(&[0u8; MAX_PARAMS_LEN]).unwrap();
        assert_eq!(params.len(), MAX_PARAMS_LEN);
    }

    #[test]
    fn clear_retains_device_id() {
        let mut params = Params::with_device_id(0x0102_0304);
        params.append_u8(0xFF).unwrap();
        params.clear();

        assert!(params.is_empty());
        assert_eq!(params.device_id(), 0x0102_0304);
        params.append_bytes(&[0u8; MAX_PARAMS_LEN]).unwrap();
    }
}
