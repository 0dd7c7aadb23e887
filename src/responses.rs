use crate::utils::{read_u16_be, Error, FromPayload};

/// Status codes the module can return in an acknowledgement frame.
///
/// The transport engine treats these as opaque data: it never branches on
/// them, it only guarantees the byte it hands back came out of a frame whose
/// checksum held. Interpretation belongs to the caller. Values in the
/// reserved `0x20..=0xEF` gap are preserved as [`StatusCode::Reserved`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// Command executed, `0x00`.
    Success,
    /// Error receiving the command packet, `0x01`.
    PacketError,
    /// No finger on the sensor, `0x02`.
    NoFinger,
    /// Failed to capture an image, `0x03`.
    ImageCaptureFailed,
    /// Image too light or finger too dry to extract features, `0x04`.
    ImageTooDry,
    /// Image too dark or finger too wet to extract features, `0x05`.
    ImageTooWet,
    /// Image too chaotic to extract features, `0x06`.
    ImageTooChaotic,
    /// Too few minutiae in the image, `0x07`.
    TooFewFeatures,
    /// Fingers do not match, `0x08`.
    NoMatch,
    /// No matching template found, `0x09`.
    NotFound,
    /// Failed to merge character files, `0x0A`.
    MergeFailed,
    /// Template index outside the database range, `0x0B`.
    TemplateIndexOutOfRange,
    /// Failed to read a template from the database, `0x0C`.
    TemplateReadFailed,
    /// Failed to upload features, `0x0D`.
    FeatureUploadFailed,
    /// Failed to receive follow-up data packets, `0x0E`.
    DataReceiveFailed,
    /// Failed to upload the image, `0x0F`.
    ImageUploadFailed,
    /// Failed to delete a template, `0x10`.
    DeleteFailed,
    /// Failed to clear the template database, `0x11`.
    DatabaseClearFailed,
    /// Could not enter low-power mode, `0x12`.
    LowPowerFailed,
    /// Wrong device password, `0x13`.
    WrongPassword,
    /// Reset failed, `0x14`.
    ResetFailed,
    /// No valid primary image in the buffer, `0x15`.
    ImageIncomplete,
    /// Online upgrade failed, `0x16`.
    UpgradeFailed,
    /// Residual fingerprint data left in the image buffer, `0x17`.
    ResidualImage,
    /// Flash read/write error, `0x18`.
    FlashReadWriteFailed,
    /// Undefined error, `0x19`.
    GenericFailure,
    /// Invalid register number, `0x1A`.
    RegisterNumberError,
    /// Wrong distribution number for the register, `0x1B`.
    DistributionNumberError,
    /// Wrong notepad page number, `0x1C`.
    NotepadPageError,
    /// Failed to operate the communication port, `0x1D`.
    PortOperationFailed,
    /// Automatic enroll failed, `0x1E`.
    AutoEnrollFailed,
    /// Template database full, `0x1F`.
    DatabaseFull,
    /// Data received correctly, `0xF0`.
    DataReceivedOk,
    /// Acknowledgement asking for the next data packet, `0xF1`.
    ContinueAck,
    /// Flash burn checksum error, `0xF2`.
    FlashChecksumError,
    /// Flash burn flag error, `0xF3`.
    FlashFlagError,
    /// Flash burn packet length error, `0xF4`.
    FlashLengthError,
    /// Flash burn code too long, `0xF5`.
    FlashCodeTooLong,
    /// Flash burn failed, `0xF6`.
    FlashFailed,
    /// A value the protocol reserves (`0x20..=0xEF` and unassigned bytes).
    Reserved(u8),
}

impl StatusCode {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x00 => Self::Success,
            0x01 => Self::PacketError,
            0x02 => Self::NoFinger,
            0x03 => Self::ImageCaptureFailed,
            0x04 => Self::ImageTooDry,
            0x05 => Self::ImageTooWet,
            0x06 => Self::ImageTooChaotic,
            0x07 => Self::TooFewFeatures,
            0x08 => Self::NoMatch,
            0x09 => Self::NotFound,
            0x0A => Self::MergeFailed,
            0x0B => Self::TemplateIndexOutOfRange,
            0x0C => Self::TemplateReadFailed,
            0x0D => Self::FeatureUploadFailed,
            0x0E => Self::DataReceiveFailed,
            0x0F => Self::ImageUploadFailed,
            0x10 => Self::DeleteFailed,
            0x11 => Self::DatabaseClearFailed,
            0x12 => Self::LowPowerFailed,
            0x13 => Self::WrongPassword,
            0x14 => Self::ResetFailed,
            0x15 => Self::ImageIncomplete,
            0x16 => Self::UpgradeFailed,
            0x17 => Self::ResidualImage,
            0x18 => Self::FlashReadWriteFailed,
            0x19 => Self::GenericFailure,
            0x1A => Self::RegisterNumberError,
            0x1B => Self::DistributionNumberError,
            0x1C => Self::NotepadPageError,
            0x1D => Self::PortOperationFailed,
            0x1E => Self::AutoEnrollFailed,
            0x1F => Self::DatabaseFull,
            0xF0 => Self::DataReceivedOk,
            0xF1 => Self::ContinueAck,
            0xF2 => Self::FlashChecksumError,
            0xF3 => Self::FlashFlagError,
            0xF4 => Self::FlashLengthError,
            0xF5 => Self::FlashCodeTooLong,
            0xF6 => Self::FlashFailed,
            other => Self::Reserved(other),
        }
    }

    /// The raw byte as it appeared on the wire.
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Success => 0x00,
            Self::PacketError => 0x01,
            Self::NoFinger => 0x02,
            Self::ImageCaptureFailed => 0x03,
            Self::ImageTooDry => 0x04,
            Self::ImageTooWet => 0x05,
            Self::ImageTooChaotic => 0x06,
            Self::TooFewFeatures => 0x07,
            Self::NoMatch => 0x08,
            Self::NotFound => 0x09,
            Self::MergeFailed => 0x0A,
            Self::TemplateIndexOutOfRange => 0x0B,
            Self::TemplateReadFailed => 0x0C,
            Self::FeatureUploadFailed => 0x0D,
            Self::DataReceiveFailed => 0x0E,
            Self::ImageUploadFailed => 0x0F,
            Self::DeleteFailed => 0x10,
            Self::DatabaseClearFailed => 0x11,
            Self::LowPowerFailed => 0x12,
            Self::WrongPassword => 0x13,
            Self::ResetFailed => 0x14,
            Self::ImageIncomplete => 0x15,
            Self::UpgradeFailed => 0x16,
            Self::ResidualImage => 0x17,
            Self::FlashReadWriteFailed => 0x18,
            Self::GenericFailure => 0x19,
            Self::RegisterNumberError => 0x1A,
            Self::DistributionNumberError => 0x1B,
            Self::NotepadPageError => 0x1C,
            Self::PortOperationFailed => 0x1D,
            Self::AutoEnrollFailed => 0x1E,
            Self::DatabaseFull => 0x1F,
            Self::DataReceivedOk => 0xF0,
            Self::ContinueAck => 0xF1,
            Self::FlashChecksumError => 0xF2,
            Self::FlashFlagError => 0xF3,
            Self::FlashLengthError => 0xF4,
            Self::FlashCodeTooLong => 0xF5,
            Self::FlashFailed => 0xF6,
            Self::Reserved(other) => other,
        }
    }
}

/// Outcome of a template search, carried in the data span of the Search
/// acknowledgement as two big-endian words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// Index of the matched template in the database.
    pub template_id: u16,
    /// Matching score reported by the module.
    pub score: u16,
}

impl FromPayload for SearchMatch {
    fn from_payload(payload: &[u8]) -> Result<Self, Error> {
        if payload.len() < 4 {
            return Err(Error::Truncated);
        }
        Ok(SearchMatch {
            template_id: read_u16_be(&payload[0..2]),
            score: read_u16_be(&payload[2..4]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip_every_byte() {
        for byte in 0x00u8..=0xFF {
            assert_eq!(StatusCode::from_byte(byte).as_byte(), byte);
        }
    }

    #[test]
    fn reserved_gap_is_preserved_not_collapsed() {
        assert_eq!(StatusCode::from_byte(0x42), StatusCode::Reserved(0x42));
        assert_eq!(StatusCode::from_byte(0xFF), StatusCode::Reserved(0xFF));
        assert_ne!(StatusCode::from_byte(0x20), StatusCode::from_byte(0x21));
    }

    #[test]
    fn search_match_reads_big_endian_words() {
        let m = SearchMatch::from_payload(&[0x00, 0x07, 0x00, 0x45]).unwrap();
        assert_eq!(m.template_id, 7);
        assert_eq!(m.score, 69);
    }

    #[test]
    fn search_match_rejects_short_payload() {
        assert_eq!(
            SearchMatch::from_payload(&[0x00, 0x07]),
            Err(Error::Truncated)
        );
    }
}
