use crate::services::{IterativeResolver, Resolution};
use ferrous_resolve_domain::{DomainError, DomainName, RecordCache};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Entry point for one line of user input naming a domain.
pub struct ResolveDomainUseCase {
    resolver: Arc<IterativeResolver>,
}

impl ResolveDomainUseCase {
    pub fn new(resolver: Arc<IterativeResolver>) -> Self {
        Self { resolver }
    }

    pub async fn execute(
        &self,
        input: &str,
        cache: &mut RecordCache,
    ) -> Result<Resolution, DomainError> {
        let start = Instant::now();
        let domain = DomainName::parse(input)?;

        match self.resolver.resolve(&domain, cache).await {
            Ok(resolution) => {
                debug!(
                    domain = %domain,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Resolved"
                );
                Ok(resolution)
            }
            Err(e) => {
                warn!(
                    domain = %domain,
                    kind = e.kind().as_str(),
                    error = %e,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Resolution failed"
                );
                Err(e)
            }
        }
    }
}
