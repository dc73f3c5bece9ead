//! UDP Query Transport (RFC 1035 §4.2.1)
//!
//! One socket, bound once to an ephemeral port, carries every query of the
//! session. Each query is a single datagram answered by a single datagram;
//! there is no retry and no TCP fallback.

use crate::dns::codec::{MessageBuilder, ResponseParser};
use async_trait::async_trait;
use ferrous_resolve_application::ports::QueryTransport;
use ferrous_resolve_domain::{
    DomainError, DomainName, RecordType, ResolverConfig, ResponseSections,
};
use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Largest datagram accepted from a server
const MAX_UDP_RESPONSE_SIZE: usize = 8192;

pub struct UdpQueryTransport {
    socket: UdpSocket,
    port: u16,
    timeout: Duration,
}

impl UdpQueryTransport {
    /// Bind to an ephemeral local port; queries go to `port` on each server.
    pub async fn bind(port: u16, timeout: Duration) -> Result<Self, DomainError> {
        let bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0));

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| DomainError::TransportIo {
                server: bind_addr.to_string(),
                reason: format!("Failed to bind UDP socket: {}", e),
            })?;

        debug!(local = ?socket.local_addr().ok(), port, ?timeout, "UDP transport bound");

        Ok(Self {
            socket,
            port,
            timeout,
        })
    }

    pub async fn from_config(config: &ResolverConfig) -> Result<Self, DomainError> {
        Self::bind(config.dns_port, config.query_timeout()).await
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.socket.local_addr().ok()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Throw away datagrams still queued on the socket, such as late replies
    /// to queries that already timed out. They would otherwise be read as
    /// the answer to the next query.
    fn discard_stale(&self, buf: &mut [u8]) {
        loop {
            match self.socket.try_recv_from(buf) {
                Ok((bytes, from)) => {
                    debug!(from = %from, bytes, "Discarding stale UDP datagram");
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) => {
                    debug!(error = %e, "Socket error while discarding stale datagrams");
                    break;
                }
            }
        }
    }

    async fn exchange(&self, server: SocketAddr, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        self.discard_stale(&mut recv_buf);

        let bytes_sent = tokio::time::timeout(self.timeout, self.socket.send_to(query, server))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: server.to_string(),
            })?
            .map_err(|e| DomainError::TransportIo {
                server: server.to_string(),
                reason: format!("Failed to send UDP query: {}", e),
            })?;

        debug!(server = %server, bytes_sent, "UDP query sent");

        let (bytes_received, from_addr) =
            tokio::time::timeout(self.timeout, self.socket.recv_from(&mut recv_buf))
                .await
                .map_err(|_| DomainError::TransportTimeout {
                    server: server.to_string(),
                })?
                .map_err(|e| DomainError::TransportIo {
                    server: server.to_string(),
                    reason: format!("Failed to receive UDP response: {}", e),
                })?;

        if from_addr.ip() != server.ip() {
            warn!(
                expected = %server,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);

        debug!(server = %server, bytes_received, "UDP response received");

        Ok(recv_buf)
    }
}

#[async_trait]
impl QueryTransport for UdpQueryTransport {
    async fn query(
        &self,
        server: Ipv4Addr,
        domain: &DomainName,
        record_type: RecordType,
    ) -> Result<ResponseSections, DomainError> {
        let server_addr = SocketAddr::from((server, self.port));
        let (id, query) = MessageBuilder::build_query(domain, record_type)?;

        let reply = self.exchange(server_addr, &query).await?;
        let parsed = ResponseParser::parse(&reply)?;

        if parsed.id != id {
            warn!(server = %server_addr, expected = id, received = parsed.id, "Unmatched transaction");
            return Err(DomainError::TransactionMismatch {
                expected: id,
                received: parsed.id,
            });
        }

        if !parsed.is_success() {
            return Err(DomainError::ServerFailure {
                server: server_addr.to_string(),
                rcode: ResponseParser::rcode_to_status(parsed.rcode).to_string(),
            });
        }

        if parsed.truncated {
            debug!(server = %server_addr, domain = %domain, "Truncated response, using partial sections");
        }

        Ok(parsed.sections)
    }
}
