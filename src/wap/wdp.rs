// ABOUTME: WDP application port addressing carried in the SMS user data header
// ABOUTME: Provides well-known ports, the 16-bit port information element and raw port-addressed messages

use crate::codec::{Encodable, PduError};
use crate::datatypes::Alphabet;
use bytes::{BufMut, Bytes, BytesMut};

/// Information element identifier for 16-bit application port addressing
pub const IEI_APPLICATION_PORT_16BIT: u8 = 0x05;
const APPLICATION_PORT_IE_LENGTH: u8 = 0x04;

pub const PORT_PUSH_SESSION_DESTINATION: u16 = 0x0B84;
pub const PORT_PUSH_SESSION_SOURCE: u16 = 0x23F0;
pub const PORT_VCARD: u16 = 0x23F4;
pub const PORT_VCALENDAR: u16 = 0x23F5;
pub const PORT_NOKIA_RINGTONE: u16 = 0x1581;
pub const PORT_NOKIA_OPERATOR_LOGO: u16 = 0x1582;
pub const PORT_NOKIA_CLI_LOGO: u16 = 0x1583;
pub const PORT_NOKIA_MULTIPART: u16 = 0x158A;
pub const PORT_NOKIA_OTA_SETTINGS: u16 = 0xC34F;

/// `[0x05][0x04][dest hi][dest lo][src hi][src lo]`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApplicationPorts {
    pub destination: u16,
    pub source: u16,
}

impl ApplicationPorts {
    pub fn new(destination: u16, source: u16) -> Self {
        Self {
            destination,
            source,
        }
    }
}

impl Default for ApplicationPorts {
    fn default() -> Self {
        Self::new(PORT_PUSH_SESSION_DESTINATION, PORT_PUSH_SESSION_SOURCE)
    }
}

impl Encodable for ApplicationPorts {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), PduError> {
        buf.put_u8(IEI_APPLICATION_PORT_16BIT);
        buf.put_u8(APPLICATION_PORT_IE_LENGTH);
        buf.put_u16(self.destination);
        buf.put_u16(self.source);
        Ok(())
    }

    fn encoded_size(&self) -> Result<usize, PduError> {
        Ok(6)
    }
}

/// Binary payload addressed to an application port, sent without any WSP wrapping
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WdpBinaryMessage {
    pub data: Bytes,
    pub ports: ApplicationPorts,
    pub alphabet: Alphabet,
}

impl WdpBinaryMessage {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            ports: ApplicationPorts::default(),
            alphabet: Alphabet::Data8Bit,
        }
    }

    pub fn with_ports(mut self, destination: u16, source: u16) -> Self {
        self.ports = ApplicationPorts::new(destination, source);
        self
    }

    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn body(&self) -> Bytes {
        self.data.clone()
    }

    /// The port information element
    pub fn user_data_header(&self) -> Result<Bytes, PduError> {
        self.ports.to_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_session_ports() {
        let bytes = ApplicationPorts::default().to_bytes().unwrap();
        assert_eq!(bytes.as_ref(), &[0x05, 0x04, 0x0B, 0x84, 0x23, 0xF0]);
        assert_eq!(ApplicationPorts::default().encoded_size().unwrap(), 6);
    }

    #[test]
    fn test_binary_message_defaults() {
        let message = WdpBinaryMessage::new(vec![0x01u8, 0x02]);
        assert_eq!(message.alphabet, Alphabet::Data8Bit);
        assert_eq!(message.body().as_ref(), &[0x01, 0x02]);
        assert_eq!(
            message.user_data_header().unwrap().as_ref(),
            &[0x05, 0x04, 0x0B, 0x84, 0x23, 0xF0]
        );
    }

    #[test]
    fn test_ringtone_ports() {
        let message = WdpBinaryMessage::new(Bytes::from_static(b"tone"))
            .with_ports(PORT_NOKIA_RINGTONE, 0);
        assert_eq!(
            message.user_data_header().unwrap().as_ref(),
            &[0x05, 0x04, 0x15, 0x81, 0x00, 0x00]
        );
    }
}
