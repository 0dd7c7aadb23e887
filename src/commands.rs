use crate::params::Params;
use crate::utils::Error;

//# Instruction codes and parameter layouts follow the AD013 datasheet; the
//# same codes are shared by the R30x/R50x family of modules.

/// Commands the driver can issue. Each variant knows its instruction code
/// and how to lay its arguments out in a parameter buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Handshake verifying the device password. The factory default password
    /// is `0x00000000`.
    VerifyPassword {
        /// The device password, sent as four big-endian bytes.
        password: u32,
    },

    /// Captures a fingerprint image into the module's image buffer.
    GetImage,

    /// Processes the captured image into a character file.
    GenChar {
        /// Which character buffer to fill (the module has two, named 1 and 2;
        /// other values are treated as 2 by the module).
        buffer: u8,
    },

    /// Searches the template database for the character file in `buffer`.
    Search {
        /// Character buffer holding the probe.
        buffer: u8,
        /// First template index to consider.
        start: u16,
        /// Last template index to consider.
        end: u16,
    },
}

impl Command {
    /// The instruction code carried in the frame's code byte.
    pub fn code(&self) -> u8 {
        match self {
            Self::GetImage => 0x01,
            Self::GenChar { .. } => 0x02,
            Self::Search { .. } => 0x04,
            Self::VerifyPassword { .. } => 0x13,
        }
    }

    /// Builds the parameter buffer for this command, addressed to
    /// `device_id`. Parameterless commands yield `None`.
    pub fn params(&self, device_id: u32) -> Result<Option<Params>, Error> {
        match *self {
            Self::GetImage => Ok(None),
            Self::GenChar { buffer } => {
                let mut params = Params::with_device_id(device_id);
                params.append_u8(buffer)?;
                Ok(Some(params))
            }
            Self::Search { buffer, start, end } => {
                let mut params = Params::with_device_id(device_id);
                params.append_u8(buffer)?;
                params.append_u16(start)?;
                params.append_u16(end)?;
                Ok(Some(params))
            }
            Self::VerifyPassword { password } => {
                let mut params = Params::with_device_id(device_id);
                params.append_bytes(&password.to_be_bytes())?;
                Ok(Some(params))
            }
        }
    }
}
