// ABOUTME: TP-PID builder for SME-to-SME, telematic interworking, short message types and SC-specific use
// ABOUTME: Replace-type identifiers let a later message overwrite an earlier one on the handset

use num_enum::TryFromPrimitive;

const PID_SME_TO_SME: u8 = 0x00;
const PID_TELEMATIC_DEVICE: u8 = 0x20;
const PID_MESSAGE_TYPE: u8 = 0x40;
const PID_SC_SPECIFIC: u8 = 0xC0;
const PID_LOW_BITS: u8 = 0x3F;

/// Short message types (TP-PID bits 5..0 when bits 7..6 are `01`)
#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShortMessageType {
    Type0 = 0x00,
    Replace1 = 0x01,
    Replace2 = 0x02,
    Replace3 = 0x03,
    Replace4 = 0x04,
    Replace5 = 0x05,
    Replace6 = 0x06,
    Replace7 = 0x07,
    ReturnCall = 0x1F,
    MeDataDownload = 0x3D,
    MeDepersonalization = 0x3E,
    SimDataDownload = 0x3F,
}

/// Telematic device types (TP-PID bits 4..0 when telematic interworking is set)
#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TelematicDevice {
    Implicit = 0x00,
    Telex = 0x01,
    Group3Telefax = 0x02,
    Group4Telefax = 0x03,
    VoiceTelephone = 0x04,
    Ermes = 0x05,
    NationalPaging = 0x06,
    Videotex = 0x07,
    Teletex = 0x08,
    TeletexPspdn = 0x09,
    TeletexCspdn = 0x0A,
    TeletexPstn = 0x0B,
    TeletexIsdn = 0x0C,
    Uci = 0x0D,
    MessageHandlingFacility = 0x10,
    X400 = 0x11,
    Email = 0x12,
    GsmMobileStation = 0x1F,
}

/// TP-PID octet
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct ProtocolIdentifier(u8);

impl ProtocolIdentifier {
    pub fn sme_to_sme(protocol_bits: u8) -> Self {
        Self(PID_SME_TO_SME | (protocol_bits & PID_LOW_BITS))
    }

    pub fn telematic(device: TelematicDevice) -> Self {
        Self(PID_TELEMATIC_DEVICE | device as u8)
    }

    pub fn message_type(message_type: ShortMessageType) -> Self {
        Self(PID_MESSAGE_TYPE | message_type as u8)
    }

    pub fn sc_specific(protocol_bits: u8) -> Self {
        Self(PID_SC_SPECIFIC | (protocol_bits & PID_LOW_BITS))
    }

    pub fn to_byte(&self) -> u8 {
        self.0
    }
}

impl From<ProtocolIdentifier> for u8 {
    fn from(pid: ProtocolIdentifier) -> Self {
        pid.0
    }
}

impl From<ShortMessageType> for ProtocolIdentifier {
    fn from(message_type: ShortMessageType) -> Self {
        Self::message_type(message_type)
    }
}

impl From<TelematicDevice> for ProtocolIdentifier {
    fn from(device: TelematicDevice) -> Self {
        Self::telematic(device)
    }
}
