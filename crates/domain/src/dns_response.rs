use crate::dns_record::{RecordType, ResourceRecord};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Answer,
    Authority,
    Additional,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Answer => "Answer",
            Section::Authority => "Authority",
            Section::Additional => "Additional",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The record-bearing sections of one successful reply.
///
/// Failed exchanges (timeouts, mismatched ids, error rcodes) never produce a
/// value of this type; the transport reports them as errors instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseSections {
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl ResponseSections {
    pub fn new(
        answers: Vec<ResourceRecord>,
        authorities: Vec<ResourceRecord>,
        additionals: Vec<ResourceRecord>,
    ) -> Self {
        Self {
            answers,
            authorities,
            additionals,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty() && self.authorities.is_empty() && self.additionals.is_empty()
    }

    /// All records tagged with their section, answers first, then authority,
    /// then additional.
    pub fn iter(&self) -> impl Iterator<Item = (Section, &ResourceRecord)> {
        self.answers
            .iter()
            .map(|r| (Section::Answer, r))
            .chain(self.authorities.iter().map(|r| (Section::Authority, r)))
            .chain(self.additionals.iter().map(|r| (Section::Additional, r)))
    }

    /// The alias target when the first answer record is a CNAME.
    pub fn leading_cname(&self) -> Option<&ResourceRecord> {
        self.answers
            .first()
            .filter(|record| record.record_type == RecordType::CNAME)
    }

    /// The first name-server record of the authority section.
    pub fn first_referral(&self) -> Option<&ResourceRecord> {
        self.authorities
            .iter()
            .find(|record| record.record_type == RecordType::NS)
    }
}
