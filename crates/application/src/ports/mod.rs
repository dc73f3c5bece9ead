mod query_transport;

pub use query_transport::QueryTransport;

// Re-export for convenience
pub use ferrous_resolve_domain::ResponseSections;
