// ABOUTME: Message content variants an SMS-SUBMIT can carry: plain text, WAP Push and port-addressed binary
// ABOUTME: Each variant supplies its alphabet, body octets and user data header to the assembler

use crate::codec::PduError;
use crate::datatypes::Alphabet;
use crate::gsm7;
use crate::wap::{WapPushMessage, WdpBinaryMessage};
use bytes::Bytes;

/// Plain text message with no user data header
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TextMessage {
    pub text: String,
    pub alphabet: Alphabet,
}

impl TextMessage {
    /// Text in the GSM default alphabet
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alphabet: Alphabet::Default7Bit,
        }
    }

    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Text as unpacked octets: one per character for the 7-bit and 8-bit
    /// alphabets, UTF-16BE code units for UCS-2
    pub fn body(&self) -> Bytes {
        match self.alphabet {
            Alphabet::Default7Bit => gsm7::to_septet_bytes(&self.text).into(),
            Alphabet::Data8Bit => self
                .text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect::<Vec<u8>>()
                .into(),
            Alphabet::Ucs2 => self
                .text
                .encode_utf16()
                .flat_map(u16::to_be_bytes)
                .collect::<Vec<u8>>()
                .into(),
        }
    }
}

/// What a submission carries
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageContent {
    PlainText(TextMessage),
    WapPush(WapPushMessage),
    RawBinary(WdpBinaryMessage),
}

impl MessageContent {
    pub fn alphabet(&self) -> Alphabet {
        match self {
            MessageContent::PlainText(message) => message.alphabet,
            MessageContent::WapPush(message) => message.alphabet,
            MessageContent::RawBinary(message) => message.alphabet,
        }
    }

    /// Octets before any alphabet packing
    pub fn body(&self) -> Result<Bytes, PduError> {
        match self {
            MessageContent::PlainText(message) => Ok(message.body()),
            MessageContent::WapPush(message) => message.body(),
            MessageContent::RawBinary(message) => Ok(message.body()),
        }
    }

    /// Information elements without the leading UDH length octet; empty when there are none
    pub fn user_data_header(&self) -> Result<Bytes, PduError> {
        match self {
            MessageContent::PlainText(_) => Ok(Bytes::new()),
            MessageContent::WapPush(message) => message.user_data_header(),
            MessageContent::RawBinary(message) => message.user_data_header(),
        }
    }
}

impl From<TextMessage> for MessageContent {
    fn from(message: TextMessage) -> Self {
        MessageContent::PlainText(message)
    }
}

impl From<WapPushMessage> for MessageContent {
    fn from(message: WapPushMessage) -> Self {
        MessageContent::WapPush(message)
    }
}

impl From<WdpBinaryMessage> for MessageContent {
    fn from(message: WdpBinaryMessage) -> Self {
        MessageContent::RawBinary(message)
    }
}
