use ferrous_resolve_domain::{DomainName, RecordType, ResourceRecord, Section};
use std::fmt;
use std::net::Ipv4Addr;

/// A step of an iterative walk, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionEvent {
    QuerySent {
        server: Ipv4Addr,
        domain: DomainName,
        record_type: RecordType,
    },
    RecordLearned {
        section: Section,
        record: ResourceRecord,
    },
    AliasDetected {
        alias: DomainName,
        target: DomainName,
    },
    NextServer {
        name_server: DomainName,
    },
    NameServerCached {
        name_server: DomainName,
        address: Ipv4Addr,
    },
    ResolvingNameServer {
        name_server: DomainName,
        depth: usize,
    },
    NoAuthority {
        domain: DomainName,
    },
    Answered {
        domain: DomainName,
        address: Ipv4Addr,
    },
}

impl fmt::Display for ResolutionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionEvent::QuerySent {
                server,
                domain,
                record_type,
            } => write!(f, "DNS query: {} {} @{}", domain, record_type, server),
            ResolutionEvent::RecordLearned { section, record } => {
                write!(f, "{}: {}", section, record)
            }
            ResolutionEvent::AliasDetected { alias, target } => {
                write!(f, "Alias detected: {} is an alias for {}", alias, target)
            }
            ResolutionEvent::NextServer { name_server } => {
                write!(f, "Next server candidate: {}", name_server)
            }
            ResolutionEvent::NameServerCached {
                name_server,
                address,
            } => write!(f, "Using cached address {} for {}", address, name_server),
            ResolutionEvent::ResolvingNameServer { name_server, depth } => write!(
                f,
                "Resolving name server {} from the root (depth {})",
                name_server, depth
            ),
            ResolutionEvent::NoAuthority { domain } => {
                write!(f, "No authority information is available for {}", domain)
            }
            ResolutionEvent::Answered { domain, address } => {
                write!(f, "{} resolved to {}", domain, address)
            }
        }
    }
}
