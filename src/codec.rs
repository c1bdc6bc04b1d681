// ABOUTME: Shared encoding contract and error type for every wire structure in the crate
// ABOUTME: SMS, WSP and WBXML layers all write through Encodable and report PduError

use crate::datatypes::Alphabet;
use crate::wap::SecurityMethod;
use bytes::{Bytes, BytesMut};
use thiserror::Error;

/// Largest value a single length or count octet can carry.
pub const MAX_OCTET_VALUE: usize = u8::MAX as usize;

/// Trait for wire structures that serialize into a byte buffer
pub trait Encodable {
    /// Append the encoded form of this value to `buf`
    fn encode(&self, buf: &mut BytesMut) -> Result<(), PduError>;

    /// Calculate the encoded size without keeping the encoded bytes
    fn encoded_size(&self) -> Result<usize, PduError> {
        let mut buf = BytesMut::new();
        self.encode(&mut buf)?;
        Ok(buf.len())
    }

    /// Encode into a fresh buffer and freeze it
    fn to_bytes(&self) -> Result<Bytes, PduError> {
        let mut buf = BytesMut::new();
        self.encode(&mut buf)?;
        Ok(buf.freeze())
    }
}

/// Encoding errors with enough context to tell which field was at fault
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PduError {
    #[error("Invalid phone number: {0:?}")]
    InvalidPhoneNumber(String),

    #[error("Security method {0:?} is not supported")]
    UnsupportedSecurityMethod(SecurityMethod),

    #[error("Submission has no message content")]
    MissingContent,

    #[error("Security method requires a {0} but none was set")]
    MissingPin(&'static str),

    #[error("IMSI contains non-numeric characters: {0:?}")]
    InvalidImsi(String),

    #[error("MAC key of {0} bytes was rejected")]
    InvalidMacKey(usize),

    #[error("{0} user data cannot carry a content user data header")]
    UnsupportedAlphabet(Alphabet),

    #[error("Field '{field}' value {value} exceeds wire maximum {max}")]
    EncodingOverflow {
        field: &'static str,
        value: usize,
        max: usize,
    },
}

impl PduError {
    pub(crate) fn overflow(field: &'static str, value: usize, max: usize) -> Self {
        PduError::EncodingOverflow { field, value, max }
    }
}

/// Narrow a length or count to one octet, failing instead of truncating
pub fn checked_octet(field: &'static str, value: usize) -> Result<u8, PduError> {
    u8::try_from(value).map_err(|_| PduError::overflow(field, value, MAX_OCTET_VALUE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BufMut;

    struct Fixed(&'static [u8]);

    impl Encodable for Fixed {
        fn encode(&self, buf: &mut BytesMut) -> Result<(), PduError> {
            buf.put_slice(self.0);
            Ok(())
        }
    }

    #[test]
    fn test_encoded_size_matches_to_bytes() {
        let value = Fixed(&[0x01, 0x02, 0x03]);
        assert_eq!(value.encoded_size().unwrap(), 3);
        assert_eq!(value.to_bytes().unwrap().as_ref(), &[0x01, 0x02, 0x03]);
    }

    #[test]
    fn test_checked_octet_bounds() {
        assert_eq!(checked_octet("udl", 255).unwrap(), 255);
        assert_eq!(
            checked_octet("udl", 256),
            Err(PduError::EncodingOverflow {
                field: "udl",
                value: 256,
                max: 255
            })
        );
    }

    #[test]
    fn test_error_display() {
        let err = PduError::overflow("total_parts", 300, 255);
        assert_eq!(
            err.to_string(),
            "Field 'total_parts' value 300 exceeds wire maximum 255"
        );
        assert_eq!(
            PduError::MissingPin("user PIN").to_string(),
            "Security method requires a user PIN but none was set"
        );
    }
}
