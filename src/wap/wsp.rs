// ABOUTME: WSP (WAP-230) value encoders and the push header field writers built on them
// ABOUTME: Covers short/long integers, uintvar, value-length, text strings and security/MAC headers

use crate::codec::PduError;
use crate::wap::tokens::{application_id_token, content_type_token};
use bytes::{BufMut, BytesMut};

/// Connectionless transaction id written at the start of every push
pub const TRANSACTION_ID_CONNECTIONLESS: u8 = 0x01;
pub const PDU_TYPE_PUSH: u8 = 0x06;

pub const HEADER_X_WAP_APPLICATION_ID: u8 = 0x2F;
pub const HEADER_X_WAP_CONTENT_URI: u8 = 0x30;
pub const HEADER_X_WAP_INITIATOR_URI: u8 = 0x31;
pub const HEADER_PUSH_FLAG: u8 = 0x34;
pub const HEADER_SEC: u8 = 0x11;
pub const HEADER_MAC: u8 = 0x12;

const SHORT_INTEGER_MAX: u8 = 0x7F;
const SHORT_LENGTH_MAX: usize = 30;
const LENGTH_QUOTE: u8 = 31;
const TEXT_QUOTE: u8 = 0x7F;

/// Push signing method carried in the SEC header
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SecurityMethod {
    #[default]
    None,
    /// Network PIN, keyed by the subscriber IMSI
    NetworkPin,
    /// Shared user PIN
    UserPin,
    /// Network key followed by the user PIN
    UserAndNetworkPin,
    /// User PIN with MAC, which cannot be produced here
    UserPinMac,
}

impl SecurityMethod {
    /// SEC header value, or `None` when the push is unsigned
    pub fn code(&self) -> Option<u8> {
        match self {
            SecurityMethod::None => None,
            SecurityMethod::NetworkPin => Some(0x00),
            SecurityMethod::UserPin => Some(0x01),
            SecurityMethod::UserAndNetworkPin => Some(0x02),
            SecurityMethod::UserPinMac => Some(0x03),
        }
    }
}

/// Short-integer: the value with the top bit set, for 0..=127 only
pub fn write_short_integer(buf: &mut BytesMut, value: u8) -> Result<(), PduError> {
    if value > SHORT_INTEGER_MAX {
        return Err(PduError::overflow(
            "short_integer",
            value as usize,
            SHORT_INTEGER_MAX as usize,
        ));
    }
    buf.put_u8(value | 0x80);
    Ok(())
}

/// Long-integer: octet count followed by the minimal big-endian value.
///
/// Zero is written as a single `0x00` octet so the value is never empty.
pub fn write_long_integer(buf: &mut BytesMut, value: u64) {
    let octets = (8 - value.leading_zeros() as usize / 8).max(1);
    buf.put_u8(octets as u8);
    buf.put_slice(&value.to_be_bytes()[8 - octets..]);
}

/// Integer-value: short-integer below 128, long-integer otherwise
pub fn write_integer(buf: &mut BytesMut, value: u64) {
    match u8::try_from(value) {
        Ok(short) if short <= SHORT_INTEGER_MAX => buf.put_u8(short | 0x80),
        _ => write_long_integer(buf, value),
    }
}

/// Uintvar: 7-bit groups, most significant first, continuation bit on all but the last
pub fn write_uintvar(buf: &mut BytesMut, value: u64) {
    let mut groups = 1;
    while groups < 10 && value >> (7 * groups) > 0 {
        groups += 1;
    }

    for i in (0..groups).rev() {
        let mut octet = ((value >> (7 * i)) & 0x7F) as u8;
        if i > 0 {
            octet |= 0x80;
        }
        buf.put_u8(octet);
    }
}

/// Value-length: the length itself up to 30, otherwise `31` and a uintvar
pub fn write_value_length(buf: &mut BytesMut, length: usize) {
    if length <= SHORT_LENGTH_MAX {
        buf.put_u8(length as u8);
    } else {
        buf.put_u8(LENGTH_QUOTE);
        write_uintvar(buf, length as u64);
    }
}

/// Null-terminated string with no quoting
pub fn write_extension_media(buf: &mut BytesMut, text: &str) {
    buf.put_slice(text.as_bytes());
    buf.put_u8(0x00);
}

/// Text-string: quoted with `0x7F` when the first octet has its top bit set
pub fn write_text_string(buf: &mut BytesMut, text: &str) {
    if text.as_bytes().first().is_some_and(|&b| b & 0x80 != 0) {
        buf.put_u8(TEXT_QUOTE);
    }
    write_extension_media(buf, text);
}

/// Content-type value: a token when well known, else a length-prefixed literal
pub fn write_content_type(buf: &mut BytesMut, content_type: &str) -> Result<(), PduError> {
    match content_type_token(content_type) {
        Some(token) => write_short_integer(buf, token)?,
        None => {
            write_value_length(buf, content_type.len() + 1);
            write_extension_media(buf, content_type);
        }
    }
    Ok(())
}

pub fn write_application_id_header(
    buf: &mut BytesMut,
    application_id: &str,
) -> Result<(), PduError> {
    write_short_integer(buf, HEADER_X_WAP_APPLICATION_ID)?;
    match application_id_token(application_id) {
        Some(token) => write_integer(buf, token.into()),
        None => write_text_string(buf, application_id),
    }
    Ok(())
}

pub fn write_initiator_uri_header(buf: &mut BytesMut, uri: &str) -> Result<(), PduError> {
    write_short_integer(buf, HEADER_X_WAP_INITIATOR_URI)?;
    write_text_string(buf, uri);
    Ok(())
}

pub fn write_content_uri_header(buf: &mut BytesMut, uri: &str) -> Result<(), PduError> {
    write_short_integer(buf, HEADER_X_WAP_CONTENT_URI)?;
    write_text_string(buf, uri);
    Ok(())
}

pub fn write_push_flag_header(buf: &mut BytesMut, push_flag: u8) -> Result<(), PduError> {
    write_short_integer(buf, HEADER_PUSH_FLAG)?;
    write_short_integer(buf, push_flag)
}

/// SEC header followed by the MAC header carrying the digest as uppercase hex text
pub fn write_security_header(
    buf: &mut BytesMut,
    method: SecurityMethod,
    mac: &[u8],
) -> Result<(), PduError> {
    let code = method
        .code()
        .ok_or(PduError::UnsupportedSecurityMethod(method))?;

    write_short_integer(buf, HEADER_SEC)?;
    write_short_integer(buf, code)?;
    write_short_integer(buf, HEADER_MAC)?;
    write_text_string(buf, &hex::encode_upper(mac));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(f: impl FnOnce(&mut BytesMut)) -> Vec<u8> {
        let mut buf = BytesMut::new();
        f(&mut buf);
        buf.to_vec()
    }

    #[test]
    fn test_short_integer() {
        assert_eq!(written(|b| write_short_integer(b, 0x34).unwrap()), vec![0xB4]);
        assert_eq!(written(|b| write_short_integer(b, 0).unwrap()), vec![0x80]);
        assert!(matches!(
            write_short_integer(&mut BytesMut::new(), 0x80),
            Err(PduError::EncodingOverflow { field: "short_integer", value: 128, max: 127 })
        ));
    }

    #[test]
    fn test_long_integer_is_minimal() {
        assert_eq!(written(|b| write_long_integer(b, 0x8001)), vec![0x02, 0x80, 0x01]);
        assert_eq!(written(|b| write_long_integer(b, 0xFF)), vec![0x01, 0xFF]);
        assert_eq!(
            written(|b| write_long_integer(b, 0x0100_0000)),
            vec![0x04, 0x01, 0x00, 0x00, 0x00]
        );
        assert_eq!(written(|b| write_long_integer(b, 0)), vec![0x01, 0x00]);
    }

    #[test]
    fn test_integer_switches_at_128() {
        assert_eq!(written(|b| write_integer(b, 0x7F)), vec![0xFF]);
        assert_eq!(written(|b| write_integer(b, 0x80)), vec![0x01, 0x80]);
    }

    #[test]
    fn test_uintvar() {
        assert_eq!(written(|b| write_uintvar(b, 0)), vec![0x00]);
        assert_eq!(written(|b| write_uintvar(b, 0x7F)), vec![0x7F]);
        assert_eq!(written(|b| write_uintvar(b, 128)), vec![0x81, 0x00]);
        assert_eq!(written(|b| write_uintvar(b, 0x3FFF)), vec![0xFF, 0x7F]);
        assert_eq!(written(|b| write_uintvar(b, 0x4000)), vec![0x81, 0x80, 0x00]);
    }

    #[test]
    fn test_uintvar_full_width() {
        let bytes = written(|b| write_uintvar(b, u64::MAX));
        assert_eq!(bytes.len(), 10);
        assert_eq!(bytes[0], 0x81);
        assert_eq!(*bytes.last().unwrap(), 0x7F);
    }

    #[test]
    fn test_value_length() {
        assert_eq!(written(|b| write_value_length(b, 0)), vec![0x00]);
        assert_eq!(written(|b| write_value_length(b, 30)), vec![30]);
        assert_eq!(written(|b| write_value_length(b, 31)), vec![31, 31]);
        assert_eq!(written(|b| write_value_length(b, 45)), vec![31, 45]);
        assert_eq!(written(|b| write_value_length(b, 200)), vec![31, 0x81, 0x48]);
    }

    #[test]
    fn test_text_string_quoting() {
        assert_eq!(written(|b| write_text_string(b, "ab")), vec![b'a', b'b', 0x00]);
        assert_eq!(
            written(|b| write_text_string(b, "é")),
            vec![0x7F, 0xC3, 0xA9, 0x00]
        );
        assert_eq!(written(|b| write_text_string(b, "")), vec![0x00]);
    }

    #[test]
    fn test_content_type_token_and_literal() {
        assert_eq!(
            written(|b| write_content_type(b, "application/vnd.wap.sic").unwrap()),
            vec![0xAE]
        );

        let literal = written(|b| write_content_type(b, "application/x-foo").unwrap());
        assert_eq!(literal[0], 18);
        assert_eq!(&literal[1..18], b"application/x-foo");
        assert_eq!(literal[18], 0x00);
        assert_eq!(literal.len(), 19);
    }

    #[test]
    fn test_application_id_header() {
        assert_eq!(
            written(|b| write_application_id_header(b, "x-wap-application:wml.ua").unwrap()),
            vec![0xAF, 0x82]
        );
        assert_eq!(
            written(|b| write_application_id_header(b, "x-wap-microsoft:localcontent.ua").unwrap()),
            vec![0xAF, 0x02, 0x80, 0x00]
        );
        assert_eq!(
            written(|b| write_application_id_header(b, "x-a:b").unwrap()),
            vec![0xAF, b'x', b'-', b'a', b':', b'b', 0x00]
        );
    }

    #[test]
    fn test_uri_and_flag_headers() {
        assert_eq!(
            written(|b| write_initiator_uri_header(b, "x").unwrap()),
            vec![0xB1, b'x', 0x00]
        );
        assert_eq!(
            written(|b| write_content_uri_header(b, "y").unwrap()),
            vec![0xB0, b'y', 0x00]
        );
        assert_eq!(written(|b| write_push_flag_header(b, 2).unwrap()), vec![0xB4, 0x82]);
    }

    #[test]
    fn test_security_header() {
        let bytes = written(|b| {
            write_security_header(b, SecurityMethod::UserPin, &[0xAB, 0x01]).unwrap()
        });
        assert_eq!(bytes, vec![0x91, 0x81, 0x92, b'A', b'B', b'0', b'1', 0x00]);
    }

    #[test]
    fn test_security_header_requires_method() {
        assert_eq!(
            write_security_header(&mut BytesMut::new(), SecurityMethod::None, &[]),
            Err(PduError::UnsupportedSecurityMethod(SecurityMethod::None))
        );
    }
}
