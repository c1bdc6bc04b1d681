// ABOUTME: TP-DA destination address encoder producing semi-octet (swapped BCD) digits
// ABOUTME: Handles international '+' prefix detection and odd-length 0xF padding

use crate::codec::{PduError, checked_octet};
use bytes::{BufMut, BytesMut};
use num_enum::TryFromPrimitive;

/// Type-of-address octet written after the digit count
#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NumberFormat {
    /// Unknown type of number, ISDN numbering plan
    Unknown = 0x81,
    /// International number, ISDN numbering plan
    International = 0x91,
}

/// Destination address of an SMS-SUBMIT
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhoneNumber {
    format: NumberFormat,
    digits: String,
}

impl PhoneNumber {
    /// Parse a dialled number, stripping a leading `+` into the international format
    pub fn parse(number: &str) -> Result<Self, PduError> {
        let (format, digits) = match number.strip_prefix('+') {
            Some(rest) => (NumberFormat::International, rest),
            None => (NumberFormat::Unknown, number),
        };

        if digits.is_empty() || !digits.chars().all(|c| semi_octet(c).is_some()) {
            return Err(PduError::InvalidPhoneNumber(number.to_string()));
        }
        checked_octet("address_length", digits.len())?;

        Ok(Self {
            format,
            digits: digits.to_string(),
        })
    }

    pub fn format(&self) -> NumberFormat {
        self.format
    }

    /// Number of digits, which is what the address-length octet records
    pub fn digit_count(&self) -> u8 {
        // bounded in parse
        self.digits.len() as u8
    }

    /// Digits packed low nibble first, an odd last digit padded with 0xF
    pub fn semi_octets(&self) -> Vec<u8> {
        let nibbles: Vec<u8> = self.digits.chars().filter_map(semi_octet).collect();
        nibbles
            .chunks(2)
            .map(|pair| pair.get(1).map_or(0xF0, |high| high << 4) | pair[0])
            .collect()
    }

    /// Write `[digit count][type of address][semi-octets]`
    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u8(self.digit_count());
        buf.put_u8(self.format as u8);
        buf.put_slice(&self.semi_octets());
    }
}

/// Encode a number into its type-of-address octet and semi-octet digits
pub fn encode_number(number: &str) -> Result<(u8, Vec<u8>), PduError> {
    let number = PhoneNumber::parse(number)?;
    Ok((number.format as u8, number.semi_octets()))
}

fn semi_octet(c: char) -> Option<u8> {
    match c {
        '0'..='9' => Some(c as u8 - b'0'),
        '*' => Some(0x0A),
        '#' => Some(0x0B),
        'a' => Some(0x0C),
        'b' => Some(0x0E),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_international_number() {
        let number = PhoneNumber::parse("+420123456789").unwrap();
        assert_eq!(number.format(), NumberFormat::International);
        assert_eq!(number.digit_count(), 12);
        assert_eq!(
            number.semi_octets(),
            vec![0x24, 0x10, 0x32, 0x54, 0x76, 0x98]
        );
    }

    #[test]
    fn test_national_number() {
        let (format, digits) = encode_number("420123456789").unwrap();
        assert_eq!(format, 0x81);
        assert_eq!(digits.len(), 6);
    }

    #[test]
    fn test_odd_length_padding() {
        let (_, digits) = encode_number("12345").unwrap();
        assert_eq!(digits, vec![0x21, 0x43, 0xF5]);
    }

    #[test]
    fn test_special_digits() {
        let (_, digits) = encode_number("*#ab").unwrap();
        assert_eq!(digits, vec![0xBA, 0xEC]);
    }

    #[test]
    fn test_address_block_layout() {
        let mut buf = BytesMut::new();
        PhoneNumber::parse("+4412").unwrap().encode(&mut buf);
        assert_eq!(buf.as_ref(), &[0x04, 0x91, 0x44, 0x21]);
    }

    #[test]
    fn test_rejects_empty_and_garbage() {
        assert!(matches!(
            PhoneNumber::parse(""),
            Err(PduError::InvalidPhoneNumber(_))
        ));
        assert!(matches!(
            PhoneNumber::parse("+"),
            Err(PduError::InvalidPhoneNumber(_))
        ));
        assert!(matches!(
            PhoneNumber::parse("555-0100"),
            Err(PduError::InvalidPhoneNumber(_))
        ));
    }
}
