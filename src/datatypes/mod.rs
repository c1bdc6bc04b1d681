// ABOUTME: Field-level value types of an SMS-SUBMIT: alphabet, TP-DCS, TP-PID, TP-DA and TP-VP
// ABOUTME: Each type knows how to turn itself into the octets the assembler places in the header

mod alphabet;
mod message_indication;
mod phone_number;
mod protocol_identifier;
mod validity_period;

pub use alphabet::Alphabet;
pub use message_indication::{
    IndicationKind, IndicationOperation, MessageClass, MessageIndication, to_dcs_byte,
};
pub use phone_number::{NumberFormat, PhoneNumber, encode_number};
pub use protocol_identifier::{ProtocolIdentifier, ShortMessageType, TelematicDevice};
pub use validity_period::{ValidityPeriod, encode_relative_validity};
