// ABOUTME: Service Indication (WAP-167) document: a notification with a link the user can follow
// ABOUTME: Encodes <si><indication href action created si-expires si-id>text</indication></si>

use super::{HrefTokens, TOKEN_END, tag_token, write_date, write_href, write_inline_string, write_prolog};
use crate::codec::{Encodable, PduError};
use bytes::{BufMut, BytesMut};
use chrono::NaiveDateTime;
use num_enum::TryFromPrimitive;

pub const CONTENT_TYPE: &str = "application/vnd.wap.sic";
/// "-//WAPFORUM//DTD SI 1.0//EN"
pub const PUBLIC_ID: u8 = 0x05;

const TAG_SI: u8 = 0x05;
const TAG_INDICATION: u8 = 0x06;

const ATTR_CREATED: u8 = 0x0A;
const ATTR_SI_EXPIRES: u8 = 0x10;
const ATTR_SI_ID: u8 = 0x11;

const HREF_TOKENS: HrefTokens = HrefTokens {
    href: 0x0B,
    prefixes: [
        ("https://www.", 0x0F),
        ("http://www.", 0x0D),
        ("https://", 0x0E),
        ("http://", 0x0C),
    ],
};

/// Value of the `action` attribute, written as its attribute-start token
#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ServiceIndicationAction {
    SignalNone = 0x05,
    SignalLow = 0x06,
    SignalMedium = 0x07,
    SignalHigh = 0x08,
    Delete = 0x09,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceIndication {
    pub href: String,
    pub text: Option<String>,
    pub action: Option<ServiceIndicationAction>,
    pub created: Option<NaiveDateTime>,
    pub expires: Option<NaiveDateTime>,
    pub id: Option<String>,
}

impl ServiceIndication {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: Some(text.into()),
            action: None,
            created: None,
            expires: None,
            id: None,
        }
    }

    pub fn with_action(mut self, action: ServiceIndicationAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_created(mut self, created: NaiveDateTime) -> Self {
        self.created = Some(created);
        self
    }

    pub fn with_expires(mut self, expires: NaiveDateTime) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl Encodable for ServiceIndication {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), PduError> {
        write_prolog(buf, PUBLIC_ID);

        buf.put_u8(tag_token(TAG_SI, false, true));
        buf.put_u8(tag_token(TAG_INDICATION, true, true));

        write_href(buf, &self.href, &HREF_TOKENS);

        if let Some(action) = self.action {
            buf.put_u8(action as u8);
        }
        if let Some(created) = &self.created {
            buf.put_u8(ATTR_CREATED);
            write_date(buf, created)?;
        }
        if let Some(expires) = &self.expires {
            buf.put_u8(ATTR_SI_EXPIRES);
            write_date(buf, expires)?;
        }
        if let Some(id) = &self.id {
            buf.put_u8(ATTR_SI_ID);
            write_inline_string(buf, id);
        }
        // end of <indication> attributes
        buf.put_u8(TOKEN_END);

        if let Some(text) = &self.text {
            write_inline_string(buf, text);
        }

        buf.put_u8(TOKEN_END); // </indication>
        buf.put_u8(TOKEN_END); // </si>
        Ok(())
    }
}
