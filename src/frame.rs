//! Structural decomposition of raw responses into checksummed fields.

use crate::crc::crc8;

/// Bytes per response field: a 16-bit big-endian value plus its CRC-8.
pub(crate) const FIELD_BYTES: usize = 3;

/// One 3-byte group out of a raw response, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResponseField {
    pub(crate) data: [u8; 2],
    pub(crate) checksum: u8,
}

impl ResponseField {
    pub(crate) fn value(self) -> u16 {
        u16::from_be_bytes(self.data)
    }

    /// The same 16 bits reinterpreted as two's complement.
    pub(crate) fn signed(self) -> i16 {
        self.value() as i16
    }

    pub(crate) fn computed_checksum(self) -> u8 {
        crc8(&self.data)
    }
}

/// Splits a raw response into `count` consecutive fields.
///
/// Purely structural; checksums are checked later, during decoding. Returns
/// `None` when the buffer does not hold exactly `count` whole fields so the
/// caller can report a framing error instead of reading out of bounds.
pub(crate) fn split_fields(raw: &[u8], count: usize) -> Option<Vec<ResponseField>> {
    if raw.len() != count * FIELD_BYTES {
        return None;
    }
    Some(
        raw.chunks_exact(FIELD_BYTES)
            .map(|chunk| ResponseField {
                data: [chunk[0], chunk[1]],
                checksum: chunk[2],
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::{split_fields, ResponseField};

    #[test]
    fn splits_into_value_and_checksum_bytes() {
        let raw = [0x12, 0x34, 0xAA, 0x56, 0x78, 0xBB];
        let fields = split_fields(&raw, 2).unwrap();
        assert_eq!(
            fields,
            vec![
                ResponseField {
                    data: [0x12, 0x34],
                    checksum: 0xAA,
                },
                ResponseField {
                    data: [0x56, 0x78],
                    checksum: 0xBB,
                },
            ]
        );
    }

    #[test]
    fn value_is_big_endian() {
        let field = ResponseField {
            data: [0x12, 0x34],
            checksum: 0x00,
        };
        assert_eq!(field.value(), 0x1234);
    }

    #[test]
    fn signed_reinterprets_twos_complement() {
        let field = ResponseField {
            data: (-2000i16 as u16).to_be_bytes(),
            checksum: 0x00,
        };
        assert_eq!(field.signed(), -2000);
        assert_eq!(field.value(), 0xF830);
    }

    #[test]
    fn rejects_length_mismatch() {
        assert!(split_fields(&[0u8; 23], 8).is_none());
        assert!(split_fields(&[0u8; 24], 7).is_none());
        assert!(split_fields(&[], 1).is_none());
    }

    #[test]
    fn empty_response_has_no_fields() {
        assert_eq!(split_fields(&[], 0).unwrap(), vec![]);
    }
}
