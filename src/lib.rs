// ABOUTME: GSM SMS-SUBMIT PDU encoder with WAP Push, WBXML and concatenated-message support
// ABOUTME: Produces the hex PDUs a modem in PDU mode accepts through AT+CMGS

pub mod codec;
pub mod content;
pub mod datatypes;
pub mod gsm7;
pub mod modem;
pub mod submit;
pub mod wap;
pub mod wbxml;


// Re-export codec types for direct access
pub use codec::{Encodable, PduError};

pub use content::{MessageContent, TextMessage};
pub use datatypes::{
    Alphabet, IndicationKind, IndicationOperation, MessageClass, MessageIndication,
    ProtocolIdentifier, ShortMessageType, ValidityPeriod,
};
pub use modem::{Modem, ModemConfig, ModemError};
pub use submit::{Pdu, SmsSubmit, SmsSubmitBuilder, build_pdus};
pub use wap::{SecurityMethod, WapPushMessage, WdpBinaryMessage};
pub use wbxml::{ServiceIndication, ServiceLoading, WbxmlDocument};

/// A specialized `Result` type for PDU encoding.
///
/// # Examples
///
/// ## Plain text
///
/// ```rust
/// use smspdu::{SmsSubmit, TextMessage, ValidityPeriod};
///
/// fn main() -> smspdu::Result<()> {
///     let sms = SmsSubmit::builder()
///         .phone_number("+420123456789")
///         .content(TextMessage::new("Hello World!"))
///         .validity_period(ValidityPeriod::from_days(5))
///         .build();
///
///     for pdu in sms.to_pdus()? {
///         println!("AT+CMGS={}", pdu.cmgs_length());
///         println!("{}", pdu.to_hex());
///     }
///     Ok(())
/// }
/// ```
///
/// ## Service Indication over WAP Push
///
/// ```rust
/// use smspdu::wbxml::{ServiceIndication, ServiceIndicationAction};
/// use smspdu::{SmsSubmit, WapPushMessage, WbxmlDocument};
///
/// fn main() -> smspdu::Result<()> {
///     let si = ServiceIndication::new("New mail", "http://www.example.com/inbox")
///         .with_action(ServiceIndicationAction::SignalMedium);
///
///     let push = WapPushMessage::from_document(&WbxmlDocument::from(si))?
///         .with_initiator_uri("example");
///
///     let pdus = SmsSubmit::new("+420123456789", push).to_pdus()?;
///     assert_eq!(pdus.len(), 1);
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, PduError>;
