use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Transport timeout waiting for {server}")]
    TransportTimeout { server: String },

    #[error("Transport failure talking to {server}: {reason}")]
    TransportIo { server: String, reason: String },

    #[error("Unmatched transaction: sent id {expected}, received id {received}")]
    TransactionMismatch { expected: u16, received: u16 },

    #[error("Name server {server} can't answer ({rcode})")]
    ServerFailure { server: String, rcode: String },

    #[error("No records found for '{0}'. Domain may not exist")]
    NotFound(String),

    #[error("Referral loop while resolving '{domain}': {reason}")]
    ReferralLoop { domain: String, reason: String },

    #[error("No authority information is available for '{0}'")]
    DeadEnd(String),

    #[error("Invalid index {index}: cache holds {len} entries")]
    InvalidIndex { index: i64, len: usize },
}

/// Coarse classification used by the session driver when reporting a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Protocol,
    NotFound,
    ReferralLoop,
    DeadEnd,
    Input,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Protocol => "protocol",
            ErrorKind::NotFound => "not-found",
            ErrorKind::ReferralLoop => "referral-loop",
            ErrorKind::DeadEnd => "dead-end",
            ErrorKind::Input => "input",
        }
    }
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::TransportTimeout { .. } | DomainError::TransportIo { .. } => {
                ErrorKind::Transport
            }
            DomainError::TransactionMismatch { .. }
            | DomainError::ServerFailure { .. }
            | DomainError::InvalidDnsResponse(_) => ErrorKind::Protocol,
            DomainError::NotFound(_) => ErrorKind::NotFound,
            DomainError::ReferralLoop { .. } => ErrorKind::ReferralLoop,
            DomainError::DeadEnd(_) => ErrorKind::DeadEnd,
            DomainError::InvalidDomainName(_)
            | DomainError::InvalidIpAddress(_)
            | DomainError::InvalidIndex { .. } => ErrorKind::Input,
        }
    }
}
