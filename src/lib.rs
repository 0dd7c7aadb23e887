//! **ad013** is a transport-engine driver for the AD013 capacitive
//! fingerprint sensor module, which talks a request/response binary protocol
//! over a U(S)ART byte stream. The same `0xEF 0x01` frame layout is used by a
//! number of similar modules, so the crate may work for those too.
//!
//! The crate covers the packet transport: assembling parameter buffers,
//! framing and checksumming command packets, accumulating the acknowledgement
//! under a bounded retry budget, validating it, and handing the status code
//! and payload back. What a status code *means* biometrically is the caller's
//! business; the driver only guarantees it came out of a frame whose checksum
//! held.
//!
//! ## Example
//!
//! Handshake with a sensor over any [`Transport`]:
//! ```
//! use core::time::Duration;
//! use ad013::{Ad013, Command, StatusCode, Transport, BROADCAST_DEVICE_ID};
//! #
//! # // A canned acknowledgement: status 0x00, empty data span.
//! # const ACK: &[u8] = &[
//! #     0xEF, 0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0x07, 0x00, 0x03, 0x00, 0x00, 0x0A,
//! # ];
//! #
//! # struct TestLink(usize);
//! #
//! # impl Transport for TestLink {
//! #     fn write(&mut self, bytes: &[u8]) -> usize {
//! #         bytes.len()
//! #     }
//! #     fn read(&mut self, buf: &mut [u8]) -> usize {
//! #         let n = (ACK.len() - self.0).min(buf.len());
//! #         buf[..n].copy_from_slice(&ACK[self.0..self.0 + n]);
//! #         self.0 += n;
//! #         n
//! #     }
//! #     fn set_timeout(&mut self, _timeout: Duration) {}
//! # }
//! # let link = TestLink(0);
//!
//! // Obtain `link` from a serial port implementation, e.g. `SerialLink`
//! // over a pair of embedded-hal serial halves.
//! let mut sensor = Ad013::new(link, BROADCAST_DEVICE_ID);
//! match sensor.send_command(Command::VerifyPassword { password: 0x00000000 }) {
//!     Ok(ack) => assert_eq!(ack.status, StatusCode::Success),
//!     Err(error) => panic!("Error: {:#?}", error),
//! }
//! ```
#![warn(missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(not(test), no_std)]

mod commands;
mod driver;
mod frame;
mod params;
mod responses;
mod transport;
mod utils;

pub use crate::commands::Command;
pub use crate::driver::{Ad013, RETRY_BUDGET};
pub use crate::frame::{
    checksum, decode, encode, Ack, ACK_BUF_LEN, BROADCAST_DEVICE_ID, FLAG_ACK, FLAG_COMMAND,
    HEADER, MAX_ACK_PAYLOAD, MAX_FRAME_LEN, MIN_ACK_LEN,
};
pub use crate::params::{Params, MAX_PARAMS_LEN};
pub use crate::responses::{SearchMatch, StatusCode};
pub use crate::transport::{SerialLink, Transport};
pub use crate::utils::{Error, FromPayload};
