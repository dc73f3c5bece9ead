use ferrous_resolve_application::events::{ResolutionEvent, ResolutionEventEmitter};
use ferrous_resolve_application::services::IterativeResolver;
use ferrous_resolve_application::use_cases::ResolveDomainUseCase;
use ferrous_resolve_domain::Config;
use ferrous_resolve_infrastructure::dns::UdpQueryTransport;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

pub struct ResolverServices {
    pub resolve_domain: Arc<ResolveDomainUseCase>,
    pub events: mpsc::UnboundedReceiver<ResolutionEvent>,
}

impl ResolverServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let transport = UdpQueryTransport::from_config(&config.resolver).await?;
        info!(
            local = ?transport.local_addr(),
            timeout = ?transport.timeout(),
            root_server = %config.resolver.root_server,
            "UDP transport ready"
        );

        let (emitter, events) = ResolutionEventEmitter::new_enabled();
        let resolver = IterativeResolver::from_config(Arc::new(transport), &config.resolver)
            .with_event_emitter(emitter);

        Ok(Self {
            resolve_domain: Arc::new(ResolveDomainUseCase::new(Arc::new(resolver))),
            events,
        })
    }
}
