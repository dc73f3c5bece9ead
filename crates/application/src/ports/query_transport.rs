use async_trait::async_trait;
use ferrous_resolve_domain::{DomainError, DomainName, RecordType, ResponseSections};
use std::net::Ipv4Addr;

/// One query, one reply.
///
/// Implementations send a single non-recursive question to `server` and
/// wait a bounded time for the matching reply. Timeouts and socket failures
/// come back as transport errors; a mismatched transaction id or an error
/// rcode comes back as a protocol error. Nothing is retried.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    async fn query(
        &self,
        server: Ipv4Addr,
        domain: &DomainName,
        record_type: RecordType,
    ) -> Result<ResponseSections, DomainError>;
}
