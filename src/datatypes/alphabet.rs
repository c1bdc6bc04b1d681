// ABOUTME: User-data alphabet selection for SMS-SUBMIT and the payload budget each alphabet allows
// ABOUTME: Drives both the TP-DCS alphabet bits and how the assembler encodes body slices

use std::fmt;

/// Character set of the TP-UD field
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Alphabet {
    /// GSM default alphabet, packed into septets
    #[default]
    Default7Bit,
    /// 8-bit data, sent unmodified
    Data8Bit,
    /// UCS-2 (UTF-16BE), sent unmodified
    Ucs2,
}

impl Alphabet {
    /// Payload budget of one PDU. Septets for the default alphabet, octets otherwise.
    pub fn max_octets(&self) -> usize {
        match self {
            Alphabet::Default7Bit => 160,
            Alphabet::Data8Bit | Alphabet::Ucs2 => 140,
        }
    }

    /// Alphabet bits (3..2) of a class-specified TP-DCS
    pub fn dcs_bits(&self) -> u8 {
        match self {
            Alphabet::Default7Bit => 0x00,
            Alphabet::Data8Bit => 0x04,
            Alphabet::Ucs2 => 0x08,
        }
    }

    pub fn is_7bit(&self) -> bool {
        matches!(self, Alphabet::Default7Bit)
    }

    pub fn charset_name(&self) -> &'static str {
        match self {
            Alphabet::Default7Bit => "GSM 7-bit Default",
            Alphabet::Data8Bit => "8-bit Data",
            Alphabet::Ucs2 => "UCS-2",
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.charset_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budgets() {
        assert_eq!(Alphabet::Default7Bit.max_octets(), 160);
        assert_eq!(Alphabet::Data8Bit.max_octets(), 140);
        assert_eq!(Alphabet::Ucs2.max_octets(), 140);
    }

    #[test]
    fn test_dcs_bits() {
        assert_eq!(Alphabet::Default7Bit.dcs_bits(), 0x00);
        assert_eq!(Alphabet::Data8Bit.dcs_bits(), 0x04);
        assert_eq!(Alphabet::Ucs2.dcs_bits(), 0x08);
    }

    #[test]
    fn test_default_is_gsm() {
        assert_eq!(Alphabet::default(), Alphabet::Default7Bit);
        assert!(Alphabet::default().is_7bit());
        assert_eq!(Alphabet::Ucs2.to_string(), "UCS-2");
    }
}
