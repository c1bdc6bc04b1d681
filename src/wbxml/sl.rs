// ABOUTME: Service Loading (WAP-168) document asking the handset to fetch a URL
// ABOUTME: Encodes <sl href action/> with no content

use super::{HrefTokens, TOKEN_END, tag_token, write_href, write_prolog};
use crate::codec::{Encodable, PduError};
use bytes::{BufMut, BytesMut};
use num_enum::TryFromPrimitive;

pub const CONTENT_TYPE: &str = "application/vnd.wap.slc";
/// "-//WAPFORUM//DTD SL 1.0//EN"
pub const PUBLIC_ID: u8 = 0x06;

const TAG_SL: u8 = 0x05;

const HREF_TOKENS: HrefTokens = HrefTokens {
    href: 0x08,
    prefixes: [
        ("https://www.", 0x0C),
        ("http://www.", 0x0A),
        ("https://", 0x0B),
        ("http://", 0x09),
    ],
};

#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ServiceLoadingAction {
    ExecuteLow = 0x05,
    ExecuteHigh = 0x06,
    Cache = 0x07,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceLoading {
    pub href: String,
    pub action: Option<ServiceLoadingAction>,
}

impl ServiceLoading {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: ServiceLoadingAction) -> Self {
        self.action = Some(action);
        self
    }
}

impl Encodable for ServiceLoading {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), PduError> {
        write_prolog(buf, PUBLIC_ID);
        buf.put_u8(tag_token(TAG_SL, true, false));

        write_href(buf, &self.href, &HREF_TOKENS);
        if let Some(action) = self.action {
            buf.put_u8(action as u8);
        }

        buf.put_u8(TOKEN_END);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_high_https_www() {
        let document = ServiceLoading::new("https://www.example.org/app.jad")
            .with_action(ServiceLoadingAction::ExecuteHigh);

        let mut expected = vec![0x02, 0x06, 0x6A, 0x00, 0x85, 0x0C, 0x03];
        expected.extend_from_slice(b"example");
        expected.extend([0x00, 0x88, 0x03]);
        expected.extend_from_slice(b"app.jad");
        expected.extend([0x00, 0x06, 0x01]);

        assert_eq!(document.to_bytes().unwrap().as_ref(), expected.as_slice());
    }

    #[test]
    fn test_no_action_no_domain() {
        let document = ServiceLoading::new("http://host/path");

        let mut expected = vec![0x02, 0x06, 0x6A, 0x00, 0x85, 0x09, 0x03];
        expected.extend_from_slice(b"host/path");
        expected.extend([0x00, 0x01]);

        assert_eq!(document.to_bytes().unwrap().as_ref(), expected.as_slice());
    }

    #[test]
    fn test_unprefixed_href_uses_plain_token() {
        let document = ServiceLoading::new("ftp://x.net/y").with_action(ServiceLoadingAction::Cache);
        let bytes = document.to_bytes().unwrap();

        let mut expected = vec![0x02, 0x06, 0x6A, 0x00, 0x85, 0x08, 0x03];
        expected.extend_from_slice(b"ftp://x");
        expected.extend([0x00, 0x87, 0x03, b'y', 0x00, 0x07, 0x01]);

        assert_eq!(bytes.as_ref(), expected.as_slice());
    }

    #[test]
    fn test_first_domain_in_table_order_wins() {
        // .com/ is checked before .net/ even though .net/ appears first
        let document = ServiceLoading::new("http://a.net/b.com/c");
        let bytes = document.to_bytes().unwrap();

        let mut expected = vec![0x02, 0x06, 0x6A, 0x00, 0x85, 0x09, 0x03];
        expected.extend_from_slice(b"a.net/b");
        expected.extend([0x00, 0x85, 0x03, b'c', 0x00, 0x01]);

        assert_eq!(bytes.as_ref(), expected.as_slice());
    }
}
