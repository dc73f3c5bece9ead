use super::RecordType;
use crate::domain_name::DomainName;
use std::fmt;

/// One resource record as the resolver sees it.
///
/// `value` is the decoded rdata: the dotted address for `A`, the target
/// name for `NS`/`CNAME`, the rdata's presentation form for anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: DomainName,

    pub record_type: RecordType,

    pub value: String,

    pub ttl: u32,
}

impl ResourceRecord {
    pub fn new(
        name: DomainName,
        record_type: RecordType,
        value: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self {
            name,
            record_type,
            value: value.into(),
            ttl,
        }
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} IN {} {}",
            self.name, self.ttl, self.record_type, self.value
        )
    }
}
