// ABOUTME: WBXML 1.2 tokenizer shared by the Service Indication and Service Loading documents
// ABOUTME: Writes the document prolog, tag tokens, inline strings, opaque BCD dates and compressed hrefs

mod si;
mod sl;

pub use si::{ServiceIndication, ServiceIndicationAction};
pub use sl::{ServiceLoading, ServiceLoadingAction};

use crate::codec::{Encodable, PduError};
use bytes::{BufMut, BytesMut};
use chrono::{Datelike, NaiveDateTime, Timelike};

pub const VERSION_1_2: u8 = 0x02;
pub const CHARSET_UTF8: u8 = 0x6A;
pub const TOKEN_END: u8 = 0x01;
pub const TOKEN_INLINE_STRING: u8 = 0x03;
pub const TOKEN_OPAQUE: u8 = 0xC3;

const TAG_HAS_ATTRIBUTES: u8 = 0x80;
const TAG_HAS_CONTENT: u8 = 0x40;
const MAX_DATE_YEAR: u32 = 9999;

/// Attribute value tokens shared by SI and SL, in match order
const DOMAIN_TOKENS: [(&str, u8); 4] = [
    (".com/", 0x85),
    (".edu/", 0x86),
    (".net/", 0x87),
    (".org/", 0x88),
];

/// Document-specific attribute-start tokens used when writing an href
pub(crate) struct HrefTokens {
    /// Plain `href` with no scheme compression
    pub href: u8,
    /// Scheme prefixes, longest first so `https://www.` wins over `https://`
    pub prefixes: [(&'static str, u8); 4],
}

/// Tag token with the attribute and content flags applied
pub fn tag_token(token: u8, has_attributes: bool, has_content: bool) -> u8 {
    let mut tag = token;
    if has_attributes {
        tag |= TAG_HAS_ATTRIBUTES;
    }
    if has_content {
        tag |= TAG_HAS_CONTENT;
    }
    tag
}

/// `[version][public id][charset][string table length = 0]`
pub fn write_prolog(buf: &mut BytesMut, public_id: u8) {
    buf.put_u8(VERSION_1_2);
    buf.put_u8(public_id);
    buf.put_u8(CHARSET_UTF8);
    buf.put_u8(0x00);
}

/// `[STR_I][utf-8 bytes][0x00]`
pub fn write_inline_string(buf: &mut BytesMut, text: &str) {
    buf.put_u8(TOKEN_INLINE_STRING);
    buf.put_slice(text.as_bytes());
    buf.put_u8(0x00);
}

/// Opaque BCD date: century, year, month, day and then hour, minute and
/// second up to the last non-zero one.
pub fn write_date(buf: &mut BytesMut, date: &NaiveDateTime) -> Result<(), PduError> {
    let year = u32::try_from(date.year())
        .ok()
        .filter(|year| *year <= MAX_DATE_YEAR)
        .ok_or_else(|| {
            PduError::overflow(
                "date_year",
                date.year().unsigned_abs() as usize,
                MAX_DATE_YEAR as usize,
            )
        })?;

    let components = [
        bcd(year / 100),
        bcd(year % 100),
        bcd(date.month()),
        bcd(date.day()),
        bcd(date.hour()),
        bcd(date.minute()),
        bcd(date.second()),
    ];

    let mut length = 4;
    if date.hour() > 0 {
        length = 5;
    }
    if date.minute() > 0 {
        length = 6;
    }
    if date.second() > 0 {
        length = 7;
    }

    buf.put_u8(TOKEN_OPAQUE);
    buf.put_u8(length as u8);
    buf.put_slice(&components[..length]);
    Ok(())
}

/// Write an href attribute, folding a known scheme prefix into the attribute
/// token and the first known domain suffix into a value token.
pub(crate) fn write_href(buf: &mut BytesMut, href: &str, tokens: &HrefTokens) {
    let (token, rest) = tokens
        .prefixes
        .iter()
        .find_map(|&(prefix, token)| href.strip_prefix(prefix).map(|rest| (token, rest)))
        .unwrap_or((tokens.href, href));
    buf.put_u8(token);

    let domain = DOMAIN_TOKENS
        .iter()
        .find_map(|&(domain, token)| rest.find(domain).map(|pos| (pos, domain, token)));

    match domain {
        Some((pos, domain, token)) => {
            write_inline_string(buf, &rest[..pos]);
            buf.put_u8(token);
            write_inline_string(buf, &rest[pos + domain.len()..]);
        }
        None => write_inline_string(buf, rest),
    }
}

fn bcd(value: u32) -> u8 {
    (((value / 10) % 10) << 4 | value % 10) as u8
}

/// Tokenized push document
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WbxmlDocument {
    ServiceIndication(ServiceIndication),
    ServiceLoading(ServiceLoading),
}

impl WbxmlDocument {
    /// MIME type the document is pushed as
    pub fn content_type(&self) -> &'static str {
        match self {
            WbxmlDocument::ServiceIndication(_) => si::CONTENT_TYPE,
            WbxmlDocument::ServiceLoading(_) => sl::CONTENT_TYPE,
        }
    }
}

impl Encodable for WbxmlDocument {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), PduError> {
        match self {
            WbxmlDocument::ServiceIndication(document) => document.encode(buf),
            WbxmlDocument::ServiceLoading(document) => document.encode(buf),
        }
    }
}

impl From<ServiceIndication> for WbxmlDocument {
    fn from(document: ServiceIndication) -> Self {
        WbxmlDocument::ServiceIndication(document)
    }
}

impl From<ServiceLoading> for WbxmlDocument {
    fn from(document: ServiceLoading) -> Self {
        WbxmlDocument::ServiceLoading(document)
    }
}
