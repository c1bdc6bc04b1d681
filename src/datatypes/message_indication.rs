// ABOUTME: TP-DCS calculator combining message class, alphabet and message-waiting indication
// ABOUTME: Class coding and waiting-indication coding are mutually exclusive uses of the same octet

use crate::datatypes::Alphabet;
use num_enum::TryFromPrimitive;

const DCS_CLASS_SPECIFIED: u8 = 0x10;
const DCS_INDICATION_DISCARD: u8 = 0xC0;
const DCS_INDICATION_STORE_GSM: u8 = 0xD0;
const DCS_INDICATION_STORE_UCS2: u8 = 0xE0;
const DCS_INDICATION_ACTIVE: u8 = 0x08;

/// Message class carried in bits 1..0 of a class-specified TP-DCS
#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum MessageClass {
    /// Class 0, "flash" message shown without being stored
    ImmediateDisplay = 0x00,
    /// Class 1
    #[default]
    MeSpecific = 0x01,
    /// Class 2
    SimSpecific = 0x02,
    /// Class 3
    TeSpecific = 0x03,
}

/// Waiting-indication type in bits 1..0 of an indication TP-DCS
#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum IndicationKind {
    #[default]
    Voicemail = 0x00,
    Fax = 0x01,
    Email = 0x02,
    Other = 0x03,
}

/// What the handset does with the message carrying an indication
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum IndicationOperation {
    /// No indication; the TP-DCS carries the message class instead
    #[default]
    NotSet,
    Store,
    Discard,
}

/// Message class and optional waiting indication of a submission
///
/// Once `operation` is anything other than [`IndicationOperation::NotSet`]
/// the class is ignored, since the same octet cannot carry both.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct MessageIndication {
    pub class: MessageClass,
    pub kind: IndicationKind,
    pub operation: IndicationOperation,
    pub is_active: bool,
}

impl MessageIndication {
    pub fn new(class: MessageClass) -> Self {
        Self {
            class,
            ..Self::default()
        }
    }

    /// Flash message (class 0)
    pub fn flash() -> Self {
        Self::new(MessageClass::ImmediateDisplay)
    }

    /// Message-waiting indication that the handset discards after updating its indicator
    pub fn discard(kind: IndicationKind, is_active: bool) -> Self {
        Self {
            kind,
            operation: IndicationOperation::Discard,
            is_active,
            ..Self::default()
        }
    }

    /// Message-waiting indication that the handset stores
    pub fn store(kind: IndicationKind, is_active: bool) -> Self {
        Self {
            kind,
            operation: IndicationOperation::Store,
            is_active,
            ..Self::default()
        }
    }

    /// Compute the TP-DCS octet for the given user-data alphabet
    pub fn to_dcs_byte(&self, alphabet: Alphabet) -> u8 {
        match self.operation {
            IndicationOperation::NotSet => {
                DCS_CLASS_SPECIFIED | alphabet.dcs_bits() | self.class as u8
            }
            operation => {
                // Store has no group for 8-bit data, leaving the group bits clear
                let mut dcs = match (operation, alphabet) {
                    (IndicationOperation::Discard, _) => DCS_INDICATION_DISCARD,
                    (IndicationOperation::Store, Alphabet::Default7Bit) => {
                        DCS_INDICATION_STORE_GSM
                    }
                    (IndicationOperation::Store, Alphabet::Ucs2) => DCS_INDICATION_STORE_UCS2,
                    _ => 0x00,
                };
                if self.is_active {
                    dcs |= DCS_INDICATION_ACTIVE;
                }
                dcs | self.kind as u8
            }
        }
    }
}

/// Convenience wrapper over [`MessageIndication::to_dcs_byte`]
pub fn to_dcs_byte(indication: &MessageIndication, alphabet: Alphabet) -> u8 {
    indication.to_dcs_byte(alphabet)
}
