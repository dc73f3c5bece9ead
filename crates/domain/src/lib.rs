//! Ferrous Resolve Domain Layer
pub mod config;
pub mod dns_record;
pub mod dns_response;
pub mod domain_name;
pub mod errors;
pub mod record_cache;

pub use config::{CliOverrides, Config, ConfigError, LoggingConfig, ResolverConfig};
pub use dns_record::{RecordType, ResourceRecord};
pub use dns_response::{ResponseSections, Section};
pub use domain_name::DomainName;
pub use errors::{DomainError, ErrorKind};
pub use record_cache::{CacheEntry, CacheKind, RecordCache};
