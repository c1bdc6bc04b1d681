// ABOUTME: SMS-SUBMIT assembler building one or more TP-layer PDUs from a message content
// ABOUTME: Splits long bodies into concatenated parts and writes the fixed header for each part

use crate::codec::{Encodable, PduError, checked_octet};
use crate::content::MessageContent;
use crate::datatypes::{Alphabet, MessageIndication, PhoneNumber, ProtocolIdentifier, ValidityPeriod};
use crate::gsm7;
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use tracing::{debug, trace};

const FIRST_OCTET_SMS_SUBMIT: u8 = 0x01;
const FIRST_OCTET_VALIDITY_RELATIVE: u8 = 0x10;
const FIRST_OCTET_STATUS_REPORT_REQUEST: u8 = 0x20;
const FIRST_OCTET_UDH_INDICATOR: u8 = 0x40;

/// SMSC address length placeholder; the modem uses the SIM's SMSC
const SMSC_FROM_SIM: u8 = 0x00;

const IEI_CONCATENATED_16BIT: u8 = 0x08;
const CONCATENATED_IE_LENGTH: u8 = 0x04;
/// Concatenation element including the UDH length octet
const CONCATENATED_UDH_LEN: usize = 7;

pub const MAX_PARTS: usize = u8::MAX as usize;
pub const DEFAULT_CONCATENATION_REFERENCE: u16 = 1;

/// 16-bit concatenated short message element (IEI 0x08)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConcatenationHeader {
    pub reference: u16,
    pub total_parts: u8,
    pub sequence: u8,
}

impl Encodable for ConcatenationHeader {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), PduError> {
        buf.put_u8(IEI_CONCATENATED_16BIT);
        buf.put_u8(CONCATENATED_IE_LENGTH);
        buf.put_u16(self.reference);
        buf.put_u8(self.total_parts);
        buf.put_u8(self.sequence);
        Ok(())
    }

    fn encoded_size(&self) -> Result<usize, PduError> {
        Ok(6)
    }
}

/// One complete SMS-SUBMIT, ready for `AT+CMGS`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pdu(Bytes);

impl Pdu {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Uppercase hex, two characters per octet
    pub fn to_hex(&self) -> String {
        hex::encode_upper(&self.0)
    }

    /// Length argument of `AT+CMGS`, which excludes the SMSC octet
    pub fn cmgs_length(&self) -> usize {
        self.0.len().saturating_sub(1)
    }
}

impl AsRef<[u8]> for Pdu {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Pdu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Encodable for Pdu {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), PduError> {
        buf.put_slice(&self.0);
        Ok(())
    }

    fn to_bytes(&self) -> Result<Bytes, PduError> {
        Ok(self.0.clone())
    }
}

/// SMS-SUBMIT request
///
/// Content is optional so a submission can be filled in step by step; it is
/// required by the time [`SmsSubmit::to_pdus`] is called.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmsSubmit {
    pub phone_number: String,
    pub validity_period: Option<ValidityPeriod>,
    pub protocol_identifier: ProtocolIdentifier,
    pub message_reference: u8,
    pub request_delivery_confirmation: bool,
    pub indication: MessageIndication,
    pub content: Option<MessageContent>,
    /// Reference shared by every part of a concatenated message
    pub concatenation_reference: u16,
}

impl Default for SmsSubmit {
    fn default() -> Self {
        Self {
            phone_number: String::new(),
            validity_period: None,
            protocol_identifier: ProtocolIdentifier::default(),
            message_reference: 0,
            request_delivery_confirmation: false,
            indication: MessageIndication::default(),
            content: None,
            concatenation_reference: DEFAULT_CONCATENATION_REFERENCE,
        }
    }
}

impl SmsSubmit {
    pub fn new(phone_number: impl Into<String>, content: impl Into<MessageContent>) -> Self {
        Self {
            phone_number: phone_number.into(),
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn builder() -> SmsSubmitBuilder {
        SmsSubmitBuilder::default()
    }

    pub fn to_pdus(&self) -> Result<Vec<Pdu>, PduError> {
        build_pdus(self)
    }

    fn first_octet(&self, has_udh: bool) -> u8 {
        let mut octet = FIRST_OCTET_SMS_SUBMIT;
        if self.validity_period.is_some() {
            octet |= FIRST_OCTET_VALIDITY_RELATIVE;
        }
        if self.request_delivery_confirmation {
            octet |= FIRST_OCTET_STATUS_REPORT_REQUEST;
        }
        if has_udh {
            octet |= FIRST_OCTET_UDH_INDICATOR;
        }
        octet
    }

    /// Header, UDH and alphabet-encoded slice of one part
    fn assemble(
        &self,
        number: &PhoneNumber,
        alphabet: Alphabet,
        udh: &[u8],
        slice: &[u8],
        user_data_length: usize,
    ) -> Result<Pdu, PduError> {
        let mut buf = BytesMut::with_capacity(32 + udh.len() + slice.len());

        buf.put_u8(SMSC_FROM_SIM);
        buf.put_u8(self.first_octet(!udh.is_empty()));
        buf.put_u8(self.message_reference);
        number.encode(&mut buf);
        buf.put_u8(self.protocol_identifier.to_byte());
        buf.put_u8(self.indication.to_dcs_byte(alphabet));
        if let Some(validity) = &self.validity_period {
            buf.put_u8(validity.to_byte());
        }
        buf.put_u8(checked_octet("user_data_length", user_data_length)?);

        buf.put_slice(udh);
        match alphabet {
            Alphabet::Default7Bit => buf.put_slice(&gsm7::pack_septets(slice)),
            Alphabet::Data8Bit | Alphabet::Ucs2 => buf.put_slice(slice),
        }

        Ok(Pdu(buf.freeze()))
    }
}

#[derive(Default)]
pub struct SmsSubmitBuilder {
    submit: SmsSubmit,
}

impl SmsSubmitBuilder {
    pub fn phone_number(mut self, number: impl Into<String>) -> Self {
        self.submit.phone_number = number.into();
        self
    }

    pub fn content(mut self, content: impl Into<MessageContent>) -> Self {
        self.submit.content = Some(content.into());
        self
    }

    pub fn validity_period(mut self, validity: impl Into<ValidityPeriod>) -> Self {
        self.submit.validity_period = Some(validity.into());
        self
    }

    pub fn protocol_identifier(mut self, pid: impl Into<ProtocolIdentifier>) -> Self {
        self.submit.protocol_identifier = pid.into();
        self
    }

    pub fn message_reference(mut self, reference: u8) -> Self {
        self.submit.message_reference = reference;
        self
    }

    pub fn with_delivery_confirmation(mut self) -> Self {
        self.submit.request_delivery_confirmation = true;
        self
    }

    pub fn indication(mut self, indication: MessageIndication) -> Self {
        self.submit.indication = indication;
        self
    }

    pub fn concatenation_reference(mut self, reference: u16) -> Self {
        self.submit.concatenation_reference = reference;
        self
    }

    pub fn build(self) -> SmsSubmit {
        self.submit
    }
}

/// Build the ordered PDUs for a submission.
///
/// Either every part is produced or an error is returned; there is no
/// partial output.
pub fn build_pdus(submit: &SmsSubmit) -> Result<Vec<Pdu>, PduError> {
    let content = submit.content.as_ref().ok_or(PduError::MissingContent)?;
    let number = PhoneNumber::parse(&submit.phone_number)?;

    let alphabet = content.alphabet();
    let max_octets = alphabet.max_octets();
    let body = content.body()?;
    let udh = content.user_data_header()?;
    // septet budgets do not account for a UDH and its fill bits
    if alphabet.is_7bit() && !udh.is_empty() {
        return Err(PduError::UnsupportedAlphabet(alphabet));
    }

    let parts = count_parts(body.len(), udh.len(), max_octets)?;
    debug!(
        alphabet = %alphabet,
        body_len = body.len(),
        udh_len = udh.len(),
        parts,
        "splitting submission"
    );

    if parts <= 1 {
        let mut part_udh = BytesMut::with_capacity(udh.len() + 1);
        if !udh.is_empty() {
            part_udh.put_u8(checked_octet("udh_length", udh.len())?);
            part_udh.put_slice(&udh);
        }
        let user_data_length = body.len() + part_udh.len();
        trace!(user_data_length, "single part");
        return Ok(vec![submit.assemble(
            &number,
            alphabet,
            &part_udh,
            &body,
            user_data_length,
        )?]);
    }

    // bounded by MAX_PARTS in count_parts
    let total_parts = parts as u8;
    let mut pdus = Vec::with_capacity(parts);
    let mut remaining: &[u8] = &body;

    for sequence in 1..=total_parts {
        let concatenation = ConcatenationHeader {
            reference: submit.concatenation_reference,
            total_parts,
            sequence,
        };
        let part_udh = concatenated_udh(&concatenation, &udh)?;
        let capacity = max_octets - part_udh.len() - 1;

        let take = if sequence < total_parts {
            capacity.min(remaining.len())
        } else if remaining.len() <= capacity {
            remaining.len()
        } else {
            return Err(PduError::overflow("part_length", remaining.len(), capacity));
        };
        let (slice, rest) = remaining.split_at(take);
        remaining = rest;

        let mut user_data_length = slice.len() + part_udh.len();
        if alphabet.is_7bit() {
            user_data_length += 1;
        }
        trace!(sequence, slice_len = slice.len(), user_data_length, "built part");

        pdus.push(submit.assemble(&number, alphabet, &part_udh, slice, user_data_length)?);
    }

    Ok(pdus)
}

/// `[UDH length][concatenation element][content elements]`
fn concatenated_udh(header: &ConcatenationHeader, content_udh: &[u8]) -> Result<Bytes, PduError> {
    let elements_len = header.encoded_size()? + content_udh.len();
    let mut buf = BytesMut::with_capacity(elements_len + 1);
    buf.put_u8(checked_octet("udh_length", elements_len)?);
    header.encode(&mut buf)?;
    buf.put_slice(content_udh);
    Ok(buf.freeze())
}

/// Number of parts a body needs.
///
/// The estimate first charges the content UDH once per part, and if that
/// already needs more than one part, charges the concatenation element and
/// its length octet as well. Each stage is iterated until the count stops
/// growing. The result is capped at the number of parts the body actually
/// fills once every non-final part carries a full slice, which prevents
/// trailing empty parts when a content UDH is present.
fn count_parts(body_len: usize, udh_len: usize, max_octets: usize) -> Result<usize, PduError> {
    let reserved = udh_len + usize::from(udh_len > 0);
    let capacity = max_octets
        .checked_sub(reserved)
        .filter(|capacity| *capacity > 0)
        .ok_or_else(|| PduError::overflow("udh_length", udh_len, max_octets - 2))?;

    let single = settle_parts(body_len, udh_len, capacity, body_len.div_ceil(capacity))?;
    if single <= 1 {
        return Ok(1);
    }

    let estimate = settle_parts(body_len, udh_len + CONCATENATED_UDH_LEN + 1, capacity, single)?;

    let slice = max_octets
        .checked_sub(CONCATENATED_UDH_LEN + udh_len + 1)
        .filter(|slice| *slice > 0)
        .ok_or_else(|| {
            PduError::overflow("udh_length", udh_len, max_octets - CONCATENATED_UDH_LEN - 2)
        })?;

    Ok(estimate.min(body_len.div_ceil(slice)).max(1))
}

/// Smallest part count at or above `start` where
/// `ceil((body + parts * overhead) / capacity)` no longer increases
fn settle_parts(
    body_len: usize,
    overhead: usize,
    capacity: usize,
    start: usize,
) -> Result<usize, PduError> {
    let mut parts = start;
    loop {
        if parts > MAX_PARTS {
            return Err(PduError::overflow("total_parts", parts, MAX_PARTS));
        }
        let next = (body_len + parts * overhead).div_ceil(capacity);
        if next <= parts {
            return Ok(parts);
        }
        parts = next;
    }
}
