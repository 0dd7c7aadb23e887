use core::time::Duration;

use embedded_hal::serial::{Read, Write};
use nb::block;

/// The byte-stream link the engine talks over.
///
/// One transport carries one in-flight exchange at a time; callers sharing a
/// transport across threads must serialize access themselves.
pub trait Transport {
    /// Writes `bytes` to the link, returning how many were accepted.
    fn write(&mut self, bytes: &[u8]) -> usize;

    /// Reads up to `buf.len()` bytes, returning how many arrived. Returns 0
    /// when nothing arrived before the link's timeout.
    fn read(&mut self, buf: &mut [u8]) -> usize;

    /// Adjusts how long a single [`read`](Transport::read) may wait for the
    /// first byte.
    fn set_timeout(&mut self, timeout: Duration);
}

// embedded-hal 0.2 serial reads have no clock to time out against, so the
// adapter polls: waiting for the first byte of a read burns poll iterations,
// one per microsecond of the configured timeout.
const DEFAULT_TIMEOUT_MICROS: u64 = 50_000;

/// [`Transport`] over a pair of `embedded-hal` serial halves.
#[derive(Debug)]
pub struct SerialLink<TX, RX> {
    tx: TX,
    rx: RX,
    poll_budget: u64,
}

impl<TX, RX> SerialLink<TX, RX>
where
    TX: Write<u8>,
    RX: Read<u8>,
{
    pub fn new(tx: TX, rx: RX) -> Self {
        Self {
            tx,
            rx,
            poll_budget: DEFAULT_TIMEOUT_MICROS,
        }
    }

    /// Gives the serial halves back.
    pub fn release(self) -> (TX, RX) {
        (self.tx, self.rx)
    }
}

impl<TX, RX> Transport for SerialLink<TX, RX>
where
    TX: Write<u8>,
    RX: Read<u8>,
{
    fn write(&mut self, bytes: &[u8]) -> usize {
        let mut written = 0;
        for &byte in bytes {
            if block!(self.tx.write(byte)).is_err() {
                return written;
            }
            written += 1;
        }
        let _ = block!(self.tx.flush());
        written
    }

    fn read(&mut self, buf: &mut [u8]) -> usize {
        let mut count = 0;
        let mut polls = self.poll_budget;
        while count < buf.len() {
            match self.rx.read() {
                Ok(byte) => {
                    buf[count] = byte;
                    count += 1;
                }
                Err(nb::Error::WouldBlock) => {
                    // Drain whatever is in flight; only the first byte is
                    // worth waiting for.
                    if count > 0 || polls == 0 {
                        break;
                    }
                    polls -= 1;
                }
                Err(nb::Error::Other(_)) => break,
            }
        }
        count
    }

    fn set_timeout(&mut self, timeout: Duration) {
        self.poll_budget = timeout.as_micros().min(u128::from(u64::max_value())) as u64;
    }
}
