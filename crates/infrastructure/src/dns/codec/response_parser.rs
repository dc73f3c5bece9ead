use super::record_type_map::RecordTypeMapper;
use ferrous_resolve_domain::{DomainError, DomainName, ResourceRecord, ResponseSections};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{RData, Record};
use tracing::debug;

/// Everything the transport needs from one reply datagram.
#[derive(Debug, Clone)]
pub struct ParsedResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub question_count: usize,

    pub truncated: bool,

    pub sections: ResponseSections,
}

impl ParsedResponse {
    pub fn is_success(&self) -> bool {
        self.rcode == ResponseCode::NoError
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<ParsedResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let sections = ResponseSections::new(
            Self::convert_all(message.answers())?,
            Self::convert_all(message.name_servers())?,
            Self::convert_all(message.additionals())?,
        );

        let parsed = ParsedResponse {
            id: message.id(),
            rcode: message.response_code(),
            question_count: message.queries().len(),
            truncated: message.truncated(),
            sections,
        };

        debug!(
            id = parsed.id,
            rcode = ?parsed.rcode,
            answers = parsed.sections.answers.len(),
            authority = parsed.sections.authorities.len(),
            additional = parsed.sections.additionals.len(),
            truncated = parsed.truncated,
            "DNS response parsed"
        );

        Ok(parsed)
    }

    pub fn convert_record(record: &Record) -> Result<ResourceRecord, DomainError> {
        let owner = record.name().to_utf8();
        let name = DomainName::parse(&owner).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Bad owner name '{}': {}", owner, e))
        })?;

        let value = match record.data() {
            RData::A(a) => a.0.to_string(),
            RData::NS(ns) => ns.0.to_utf8(),
            RData::CNAME(canonical) => canonical.0.to_utf8(),
            other => other.to_string(),
        };

        Ok(ResourceRecord::new(
            name,
            RecordTypeMapper::from_hickory(record.record_type()),
            value,
            record.ttl(),
        ))
    }

    fn convert_all(records: &[Record]) -> Result<Vec<ResourceRecord>, DomainError> {
        records.iter().map(Self::convert_record).collect()
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
