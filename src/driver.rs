use core::time::Duration;

use crate::commands::Command;
use crate::frame::{
    self, Ack, ACK_BUF_LEN, MIN_ACK_LEN, MIN_DECODE_LEN, OFFSET_CODE, OFFSET_LENGTH,
};
use crate::params::Params;
use crate::transport::Transport;
use crate::utils::{read_u16_be, Error};

/// Read attempts per exchange before a stalled link is reported as
/// [`Error::Truncated`]. Bounds how long a call can block on a dead sensor.
pub const RETRY_BUDGET: usize = 5;

/// Represents an AD013 sensor on the far end of a [`Transport`].
///
/// The driver is synchronous and carries one exchange at a time: a command
/// frame goes out, then the acknowledgement is accumulated under the retry
/// budget, validated, and its status code and payload handed back.
#[derive(Debug)]
pub struct Ad013<T> {
    transport: T,
    device_id: u32,
}

impl<T: Transport> Ad013<T> {
    /// Creates a driver for the sensor at `device_id`. Use
    /// [`BROADCAST_DEVICE_ID`](crate::BROADCAST_DEVICE_ID) when the id is
    /// unknown.
    pub fn new(transport: T, device_id: u32) -> Self {
        Self { transport, device_id }
    }

    /// Adjusts the transport's per-read timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.transport.set_timeout(timeout);
    }

    /// Gives the transport back.
    pub fn release(self) -> T {
        self.transport
    }

    /// Issues a high-level [`Command`] and waits for its acknowledgement.
    pub fn send_command(&mut self, command: Command) -> Result<Ack, Error> {
        let params = command.params(self.device_id)?;
        self.send(command.code(), params.as_ref())
    }

    /// Sends a raw instruction `code` with an optional parameter buffer and
    /// waits for the acknowledgement.
    ///
    /// The returned [`Ack`] carries the module's status code and an owned
    /// copy of the reply's data span. All errors mean no trustworthy reply
    /// was obtained; in particular [`Error::ChecksumMismatch`] means bytes
    /// did arrive but their status code must not be believed, which is a
    /// different situation from [`Error::Truncated`].
    pub fn send(&mut self, code: u8, params: Option<&Params>) -> Result<Ack, Error> {
        let packet = frame::encode(code, params, self.device_id)?;
        if self.transport.write(&packet) != packet.len() {
            return Err(Error::WriteFailed);
        }

        // Accumulate the reply. The loop first waits for the minimum
        // acknowledgement, then, once the declared length is visible,
        // stretches the target to the full frame so a longer reply is read
        // to completion rather than decoded short.
        let mut recv = [0u8; ACK_BUF_LEN];
        let mut len = 0usize;
        let mut wanted = MIN_ACK_LEN;
        for _ in 0..RETRY_BUDGET {
            if len >= wanted {
                break;
            }
            len += self.transport.read(&mut recv[len..]);
            if len >= MIN_DECODE_LEN {
                let declared = usize::from(read_u16_be(&recv[OFFSET_LENGTH..OFFSET_CODE]));
                wanted = OFFSET_CODE + declared;
                if wanted > ACK_BUF_LEN {
                    return Err(Error::Overflow);
                }
            }
        }
        if len < MIN_ACK_LEN || len < wanted {
            return Err(Error::Truncated);
        }

        let device_id = match params {
            Some(p) => p.device_id(),
            None => self.device_id,
        };
        frame::decode(&recv[..wanted], device_id)
    }
}
