#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_resolve_application::ports::QueryTransport;
use ferrous_resolve_domain::{DomainError, DomainName, RecordType, ResourceRecord, ResponseSections};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Mutex;

pub fn name(s: &str) -> DomainName {
    DomainName::parse(s).unwrap()
}

pub fn a(owner: &str, address: &str) -> ResourceRecord {
    ResourceRecord::new(name(owner), RecordType::A, address, 300)
}

pub fn ns(owner: &str, server: &str) -> ResourceRecord {
    ResourceRecord::new(name(owner), RecordType::NS, server, 172800)
}

pub fn cname(owner: &str, target: &str) -> ResourceRecord {
    ResourceRecord::new(name(owner), RecordType::CNAME, target, 300)
}

pub fn soa(owner: &str) -> ResourceRecord {
    ResourceRecord::new(
        name(owner),
        RecordType::SOA,
        format!("ns.{} hostmaster.{} 1 7200 3600 1209600 3600", owner, owner),
        3600,
    )
}

#[derive(Default)]
pub struct SectionsBuilder {
    sections: ResponseSections,
}

impl SectionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, record: ResourceRecord) -> Self {
        self.sections.answers.push(record);
        self
    }

    pub fn authority(mut self, record: ResourceRecord) -> Self {
        self.sections.authorities.push(record);
        self
    }

    pub fn additional(mut self, record: ResourceRecord) -> Self {
        self.sections.additionals.push(record);
        self
    }

    pub fn build(self) -> ResponseSections {
        self.sections
    }
}

/// Answers from a script keyed by `(server, domain)`.
///
/// Unscripted pairs behave like a server that never replies.
#[derive(Default)]
pub struct MockQueryTransport {
    responses: Mutex<HashMap<(Ipv4Addr, DomainName), Result<ResponseSections, DomainError>>>,
    calls: Mutex<Vec<(Ipv4Addr, DomainName, RecordType)>>,
}

impl MockQueryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, server: &str, domain: &str, sections: ResponseSections) {
        self.responses
            .lock()
            .unwrap()
            .insert((server.parse().unwrap(), name(domain)), Ok(sections));
    }

    pub fn fail(&self, server: &str, domain: &str, error: DomainError) {
        self.responses
            .lock()
            .unwrap()
            .insert((server.parse().unwrap(), name(domain)), Err(error));
    }

    pub fn calls(&self) -> Vec<(Ipv4Addr, DomainName, RecordType)> {
        self.calls.lock().unwrap().clone()
    }

    /// `(server, domain)` pairs in the order they were queried.
    pub fn call_trace(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .map(|(server, domain, _)| (server.to_string(), domain.to_string()))
            .collect()
    }
}

#[async_trait]
impl QueryTransport for MockQueryTransport {
    async fn query(
        &self,
        server: Ipv4Addr,
        domain: &DomainName,
        record_type: RecordType,
    ) -> Result<ResponseSections, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((server, domain.clone(), record_type));

        self.responses
            .lock()
            .unwrap()
            .get(&(server, domain.clone()))
            .cloned()
            .unwrap_or_else(|| {
                Err(DomainError::TransportTimeout {
                    server: server.to_string(),
                })
            })
    }
}
