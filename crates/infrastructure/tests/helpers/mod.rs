#![allow(unused_imports)]
pub mod dns_server_mock;

pub use dns_server_mock::{MockDnsServer, MockRecord, MockReply, ReceivedQuery};

use ferrous_resolve_domain::DomainName;

pub fn name(s: &str) -> DomainName {
    DomainName::parse(s).unwrap()
}
