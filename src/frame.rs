//! Framing and validation for the AD013 wire protocol.
//!
//! Every frame, command or acknowledgement, has the same shape (all
//! multi-byte integers big-endian):
//!
//! ```text
//! headr  | 0xEF 0x01             [2]
//! devid  | device id             [4]
//! flag   | 0x01 cmd / 0x07 ack   [1]
//! length | code..checksum incl.  [2]
//! code   | command/status code   [1]
//! data   | parameters/payload    [N = length - 3]
//! chksum | sum(bytes[6..10+N])   [2]
//! ```

use arrayvec::ArrayVec;

use crate::params::{Params, MAX_PARAMS_LEN};
use crate::responses::StatusCode;
use crate::utils::{read_u16_be, write_u16_be, Error};

/// Magic bytes opening every frame.
pub const HEADER: [u8; 2] = [0xEF, 0x01];
/// Device id used when the module's actual id is unknown.
pub const BROADCAST_DEVICE_ID: u32 = 0xFFFF_FFFF;
/// Flag byte of a host-to-module command frame.
pub const FLAG_COMMAND: u8 = 0x01;
/// Flag byte of a module-to-host acknowledgement frame.
pub const FLAG_ACK: u8 = 0x07;

pub(crate) const OFFSET_DEVICE_ID: usize = 2;
pub(crate) const OFFSET_FLAG: usize = 6;
pub(crate) const OFFSET_LENGTH: usize = 7;
pub(crate) const OFFSET_CODE: usize = 9;
pub(crate) const OFFSET_DATA: usize = 10;

/// Fixed bytes of a frame: header, device id, flag, length, code, checksum.
const FIXED_FRAME_LEN: usize = 12;
/// Header through code: the smallest prefix a frame can be sized from.
pub(crate) const MIN_DECODE_LEN: usize = 10;
/// The shortest complete acknowledgement (empty data span).
pub const MIN_ACK_LEN: usize = FIXED_FRAME_LEN;
/// Capacity of the receive buffer one exchange accumulates into.
pub const ACK_BUF_LEN: usize = 20;
/// Largest data span an acknowledgement can carry within the receive buffer.
pub const MAX_ACK_PAYLOAD: usize = ACK_BUF_LEN - MIN_ACK_LEN;
/// Largest outbound frame: the fixed bytes plus a full parameter buffer.
pub const MAX_FRAME_LEN: usize = FIXED_FRAME_LEN + MAX_PARAMS_LEN;

/// A validated acknowledgement: the module's status code plus whatever data
/// span the frame carried, copied out into an owned buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub status: StatusCode,
    pub payload: ArrayVec<[u8; MAX_ACK_PAYLOAD]>,
}

/// Additive checksum over the flag-through-data span, modulo 65536.
pub fn checksum(span: &[u8]) -> u16 {
    span.iter().fold(0u16, |sum, &b| sum.wrapping_add(u16::from(b)))
}

/// Encodes a command frame.
///
/// The device id comes from `params` when a buffer is supplied, otherwise
/// `device_id` is used. Supplying an empty `params` buffer is rejected with
/// [`Error::InvalidArgument`]; pass `None` for a parameterless command.
pub fn encode(
    code: u8,
    params: Option<&Params>,
    device_id: u32,
) -> Result<ArrayVec<[u8; MAX_FRAME_LEN]>, Error> {
    if let Some(p) = params {
        if p.is_empty() {
            return Err(Error::InvalidArgument);
        }
    }
    let (device_id, data) = match params {
        Some(p) => (p.device_id(), p.as_bytes()),
        None => (device_id, &[][..]),
    };

    let total = FIXED_FRAME_LEN + data.len();
    let mut buf = [0u8; MAX_FRAME_LEN];
    buf[..OFFSET_DEVICE_ID].copy_from_slice(&HEADER);
    buf[OFFSET_DEVICE_ID..OFFSET_FLAG].copy_from_slice(&device_id.to_be_bytes());
    buf[OFFSET_FLAG] = FLAG_COMMAND;
    write_u16_be(&mut buf[OFFSET_LENGTH..OFFSET_CODE], (3 + data.len()) as u16);
    buf[OFFSET_CODE] = code;
    buf[OFFSET_DATA..OFFSET_DATA + data.len()].copy_from_slice(data);

    let sum = checksum(&buf[OFFSET_FLAG..total - 2]);
    write_u16_be(&mut buf[total - 2..total], sum);

    let mut frame = ArrayVec::new();
    frame
        .try_extend_from_slice(&buf[..total])
        .map_err(|_| Error::Overflow)?;
    Ok(frame)
}

/// Validates a complete acknowledgement frame and extracts its status code
/// and data span.
///
/// `raw` must hold exactly one frame addressed from `expected_device_id`;
/// the declared length field must account for every byte after the code
/// offset. A checksum mismatch is terminal for the exchange: the status code
/// must not be trusted and is not returned.
pub fn decode(raw: &[u8], expected_device_id: u32) -> Result<Ack, Error> {
    if raw.len() < MIN_DECODE_LEN {
        return Err(Error::Truncated);
    }
    if raw[..OFFSET_DEVICE_ID] != HEADER[..]
        || raw[OFFSET_DEVICE_ID..OFFSET_FLAG] != expected_device_id.to_be_bytes()[..]
    {
        return Err(Error::PrefixMismatch);
    }

    // Length covers code + data + checksum, so it can never be below 3 and
    // the frame must end exactly where it says it does.
    let declared = usize::from(read_u16_be(&raw[OFFSET_LENGTH..OFFSET_CODE]));
    if declared < 3 || raw.len() != OFFSET_CODE + declared {
        return Err(Error::Truncated);
    }

    let expected = read_u16_be(&raw[raw.len() - 2..]);
    let computed = checksum(&raw[OFFSET_FLAG..raw.len() - 2]);
    if expected != computed {
        return Err(Error::ChecksumMismatch { expected, computed });
    }

    let mut payload = ArrayVec::new();
    payload
        .try_extend_from_slice(&raw[OFFSET_DATA..OFFSET_DATA + (declared - 3)])
        .map_err(|_| Error::Overflow)?;
    Ok(Ack {
        status: StatusCode::from_byte(raw[OFFSET_CODE]),
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ack_frame(device_id: u32, status: u8, data: &[u8]) -> Vec<u8> {
        let mut frame = Vec::from(&HEADER[..]);
        frame.extend_from_slice(&device_id.to_be_bytes());
        frame.push(FLAG_ACK);
        frame.extend_from_slice(&((3 + data.len()) as u16).to_be_bytes());
        frame.push(status);
        frame.extend_from_slice(data);
        let sum = checksum(&frame[OFFSET_FLAG..]);
        frame.extend_from_slice(&sum.to_be_bytes());
        frame
    }

    #[test]
    fn encode_matches_known_vector() {
        // GetImage (0x01), no parameters: length 0x0003, checksum
        // 0x01 + 0x00 + 0x03 + 0x01 = 0x0005.
        let frame = encode(0x01, None, BROADCAST_DEVICE_ID).unwrap();
        assert_eq!(
            &frame[..],
            &[0xEF, 0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0x01, 0x00, 0x03, 0x01, 0x00, 0x05]
        );
    }

    #[test]
    fn encode_appends_params_after_code() {
        let mut params = Params::new();
        params.append_bytes(&[0x00, 0x00, 0x00, 0x00]).unwrap();

        // VfyPwd (0x13) with the default password.
        let frame = encode(0x13, Some(&params), BROADCAST_DEVICE_ID).unwrap();
        assert_eq!(
            &frame[..],
            &[
                0xEF, 0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0x01, 0x00, 0x07, 0x13, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x1B
            ]
        );
    }

    #[test]
    fn encode_uses_device_id_from_params() {
        let mut params = Params::with_device_id(0x0102_0304);
        params.append_u8(0x01).unwrap();

        let frame = encode(0x02, Some(&params), BROADCAST_DEVICE_ID).unwrap();
        assert_eq!(&frame[OFFSET_DEVICE_ID..OFFSET_FLAG], &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn encode_rejects_empty_params() {
        let params = Params::new();
        assert_eq!(
            encode(0x01, Some(&params), BROADCAST_DEVICE_ID),
            Err(Error::InvalidArgument)
        );
    }

    #[test]
    fn decode_round_trips_encoded_frames() {
        let mut params = Params::new();
        params.append_u8(0x01).unwrap();
        params.append_u16(0x0000).unwrap();
        params.append_u16(0x0063).unwrap();

        let frame = encode(0x04, Some(&params), BROADCAST_DEVICE_ID).unwrap();
        let ack = decode(&frame, BROADCAST_DEVICE_ID).unwrap();
        assert_eq!(ack.status.as_byte(), 0x04);
        assert_eq!(&ack.payload[..], params.as_bytes());
    }

    #[test]
    fn decode_extracts_status_and_payload() {
        let raw = ack_frame(BROADCAST_DEVICE_ID, 0x00, &[0x00, 0x07, 0x00, 0x45]);
        let ack = decode(&raw, BROADCAST_DEVICE_ID).unwrap();
        assert_eq!(ack.status, StatusCode::Success);
        assert_eq!(&ack.payload[..], &[0x00, 0x07, 0x00, 0x45]);
    }

    #[test]
    fn decode_rejects_short_input() {
        let raw = ack_frame(BROADCAST_DEVICE_ID, 0x00, &[]);
        assert_eq!(decode(&raw[..9], BROADCAST_DEVICE_ID), Err(Error::Truncated));
        assert_eq!(decode(&[], BROADCAST_DEVICE_ID), Err(Error::Truncated));
    }

    #[test]
    fn decode_rejects_foreign_device_id() {
        let raw = ack_frame(0x0000_0001, 0x00, &[]);
        assert_eq!(
            decode(&raw, BROADCAST_DEVICE_ID),
            Err(Error::PrefixMismatch)
        );
    }

    #[test]
    fn decode_rejects_bad_magic() {
        let mut raw = ack_frame(BROADCAST_DEVICE_ID, 0x00, &[]);
        raw[0] = 0xEE;
        assert_eq!(
            decode(&raw, BROADCAST_DEVICE_ID),
            Err(Error::PrefixMismatch)
        );
    }

    #[test]
    fn decode_rejects_length_not_matching_frame() {
        let mut raw = ack_frame(BROADCAST_DEVICE_ID, 0x00, &[0xAA, 0xBB]);
        // Declare one more byte than the frame holds.
        raw[OFFSET_CODE - 1] += 1;
        assert_eq!(decode(&raw, BROADCAST_DEVICE_ID), Err(Error::Truncated));
    }

    #[test]
    fn single_bit_flips_fail_the_checksum() {
        let raw = ack_frame(BROADCAST_DEVICE_ID, 0x00, &[0x12, 0x34]);

        // Any single-bit flip in the flag, code, or data bytes shifts the sum
        // by a power of two well below 65536, so it can never collide.
        let mutable = [OFFSET_FLAG, OFFSET_CODE, OFFSET_DATA, OFFSET_DATA + 1];
        for &offset in &mutable {
            for bit in 0..8 {
                let mut corrupted = raw.clone();
                corrupted[offset] ^= 1 << bit;
                match decode(&corrupted, BROADCAST_DEVICE_ID) {
                    Err(Error::ChecksumMismatch { .. }) => (),
                    other => panic!(
                        "offset {} bit {}: expected checksum failure, got {:?}",
                        offset, bit, other
                    ),
                }
            }
        }
    }

    #[test]
    fn checksum_matches_hand_computed_sum() {
        assert_eq!(checksum(&[0x01, 0x00, 0x03, 0x01]), 0x0005);
        assert_eq!(checksum(&[]), 0);
        // 258 * 0xFF = 65790, which wraps to 254 modulo 65536.
        assert_eq!(checksum(&[0xFF; 258][..]), 254);
    }
}
