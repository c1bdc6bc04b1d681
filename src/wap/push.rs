// ABOUTME: WAP Push message: a WSP push PDU wrapping a document, addressed by WDP ports
// ABOUTME: Signs the payload with HMAC-SHA1 when a PIN-based security method is selected

use crate::codec::{Encodable, PduError, checked_octet};
use crate::datatypes::Alphabet;
use crate::wap::wdp::ApplicationPorts;
use crate::wap::wsp::{
    self, PDU_TYPE_PUSH, SecurityMethod, TRANSACTION_ID_CONNECTIONLESS,
};
use crate::wbxml::WbxmlDocument;
use bytes::{BufMut, Bytes, BytesMut};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use tracing::trace;

type HmacSha1 = Hmac<Sha1>;

/// Content type of a push built from raw bytes
pub const DEFAULT_CONTENT_TYPE: &str = "application/vnd.wap.connectivity-wbxml";

/// WAP Push carried over SMS
///
/// The SMS body is the WSP push header followed by `data`; the user data
/// header is the WDP application port element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WapPushMessage {
    pub content_type: String,
    pub data: Bytes,
    pub security: SecurityMethod,
    /// Shared secret for the user PIN methods
    pub user_pin: Option<String>,
    /// Subscriber IMSI for the network PIN methods
    pub network_pin: Option<String>,
    pub ports: ApplicationPorts,
    pub initiator_uri: Option<String>,
    pub content_uri: Option<String>,
    pub application_id: Option<String>,
    pub push_flag: u8,
    pub alphabet: Alphabet,
}

impl WapPushMessage {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            data: data.into(),
            security: SecurityMethod::None,
            user_pin: None,
            network_pin: None,
            ports: ApplicationPorts::default(),
            initiator_uri: None,
            content_uri: None,
            application_id: None,
            push_flag: 0,
            alphabet: Alphabet::Data8Bit,
        }
    }

    /// Push a tokenized document under its own content type
    pub fn from_document(document: &WbxmlDocument) -> Result<Self, PduError> {
        Ok(Self::new(document.to_bytes()?).with_content_type(document.content_type()))
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_security(mut self, security: SecurityMethod) -> Self {
        self.security = security;
        self
    }

    pub fn with_user_pin(mut self, pin: impl Into<String>) -> Self {
        self.user_pin = Some(pin.into());
        self
    }

    pub fn with_network_pin(mut self, imsi: impl Into<String>) -> Self {
        self.network_pin = Some(imsi.into());
        self
    }

    pub fn with_ports(mut self, destination: u16, source: u16) -> Self {
        self.ports = ApplicationPorts::new(destination, source);
        self
    }

    pub fn with_initiator_uri(mut self, uri: impl Into<String>) -> Self {
        self.initiator_uri = Some(uri.into());
        self
    }

    pub fn with_content_uri(mut self, uri: impl Into<String>) -> Self {
        self.content_uri = Some(uri.into());
        self
    }

    pub fn with_application_id(mut self, application_id: impl Into<String>) -> Self {
        self.application_id = Some(application_id.into());
        self
    }

    pub fn with_push_flag(mut self, push_flag: u8) -> Self {
        self.push_flag = push_flag;
        self
    }

    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// HMAC key for the selected method, `None` when the push is unsigned
    pub fn security_key(&self) -> Result<Option<Vec<u8>>, PduError> {
        let key = match self.security {
            SecurityMethod::None => return Ok(None),
            SecurityMethod::NetworkPin => imsi_to_key(self.require_network_pin()?)?,
            SecurityMethod::UserPin => self.require_user_pin()?.as_bytes().to_vec(),
            SecurityMethod::UserAndNetworkPin => {
                let mut key = imsi_to_key(self.require_network_pin()?)?;
                key.extend_from_slice(self.require_user_pin()?.as_bytes());
                key
            }
            SecurityMethod::UserPinMac => {
                return Err(PduError::UnsupportedSecurityMethod(self.security));
            }
        };
        Ok(Some(key))
    }

    /// HMAC-SHA1 of the payload under the method's key
    pub fn mac(&self) -> Result<Option<Vec<u8>>, PduError> {
        let Some(key) = self.security_key()? else {
            return Ok(None);
        };

        let mut mac =
            HmacSha1::new_from_slice(&key).map_err(|_| PduError::InvalidMacKey(key.len()))?;
        mac.update(&self.data);
        Ok(Some(mac.finalize().into_bytes().to_vec()))
    }

    /// `[transaction id][push][headers length][headers]`
    pub fn wsp_header(&self) -> Result<Bytes, PduError> {
        let mut content_block = BytesMut::new();
        wsp::write_content_type(&mut content_block, &self.content_type)?;
        if let Some(mac) = self.mac()? {
            wsp::write_security_header(&mut content_block, self.security, &mac)?;
        }

        let mut headers = BytesMut::new();
        wsp::write_value_length(&mut headers, content_block.len());
        headers.put_slice(&content_block);

        if self.push_flag != 0 {
            wsp::write_push_flag_header(&mut headers, self.push_flag)?;
        }
        if let Some(uri) = non_empty(&self.initiator_uri) {
            wsp::write_initiator_uri_header(&mut headers, uri)?;
        }
        if let Some(uri) = non_empty(&self.content_uri) {
            wsp::write_content_uri_header(&mut headers, uri)?;
        }
        if let Some(application_id) = non_empty(&self.application_id) {
            wsp::write_application_id_header(&mut headers, application_id)?;
        }

        let mut buf = BytesMut::with_capacity(3 + headers.len());
        buf.put_u8(TRANSACTION_ID_CONNECTIONLESS);
        buf.put_u8(PDU_TYPE_PUSH);
        buf.put_u8(checked_octet("wsp_headers_length", headers.len())?);
        buf.put_slice(&headers);

        trace!(
            content_type = %self.content_type,
            security = ?self.security,
            header_len = buf.len(),
            "built WSP push header"
        );
        Ok(buf.freeze())
    }

    /// SMS body: the WSP header followed by the payload
    pub fn body(&self) -> Result<Bytes, PduError> {
        self.to_bytes()
    }

    pub fn user_data_header(&self) -> Result<Bytes, PduError> {
        self.ports.to_bytes()
    }

    fn require_user_pin(&self) -> Result<&str, PduError> {
        non_empty(&self.user_pin).ok_or(PduError::MissingPin("user PIN"))
    }

    fn require_network_pin(&self) -> Result<&str, PduError> {
        non_empty(&self.network_pin).ok_or(PduError::MissingPin("network PIN"))
    }
}

impl Encodable for WapPushMessage {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), PduError> {
        buf.put_slice(&self.wsp_header()?);
        buf.put_slice(&self.data);
        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Pack an IMSI into the network PIN key.
///
/// The digits are prefixed with a parity nibble (`9` for an odd count, `1`
/// for an even count, which also gets a trailing `F`) and packed two per
/// octet, low nibble first.
pub fn imsi_to_key(imsi: &str) -> Result<Vec<u8>, PduError> {
    let imsi = imsi.trim();
    if imsi.is_empty() || !imsi.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PduError::InvalidImsi(imsi.to_string()));
    }

    let mut nibbles: Vec<u8> = Vec::with_capacity(imsi.len() + 2);
    if imsi.len() % 2 == 1 {
        nibbles.push(0x9);
        nibbles.extend(imsi.bytes().map(|b| b - b'0'));
    } else {
        nibbles.push(0x1);
        nibbles.extend(imsi.bytes().map(|b| b - b'0'));
        nibbles.push(0xF);
    }

    Ok(nibbles
        .chunks_exact(2)
        .map(|pair| (pair[1] << 4) | pair[0])
        .collect())
}
