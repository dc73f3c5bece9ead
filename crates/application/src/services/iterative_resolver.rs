use super::resolution_context::{ResolutionContext, ResolutionLimits};
use crate::events::{ResolutionEvent, ResolutionEventEmitter};
use crate::ports::QueryTransport;
use ferrous_resolve_domain::{
    CacheKind, DomainError, DomainName, RecordCache, RecordType, ResolverConfig, ResponseSections,
};
use futures::future::BoxFuture;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The name that was asked for.
    pub domain: DomainName,
    /// The name the address actually belongs to, after following aliases.
    pub canonical: DomainName,
    pub address: Ipv4Addr,
    pub queries_sent: usize,
}

/// Walks the delegation tree from a single root server down to an A record.
///
/// Every record of every reply goes into the session cache under its own
/// owner name, so glue and unrelated name-server addresses learned along the
/// way short-circuit later lookups.
pub struct IterativeResolver {
    transport: Arc<dyn QueryTransport>,
    root_server: Ipv4Addr,
    limits: ResolutionLimits,
    events: ResolutionEventEmitter,
}

impl IterativeResolver {
    pub fn new(transport: Arc<dyn QueryTransport>, root_server: Ipv4Addr) -> Self {
        Self {
            transport,
            root_server,
            limits: ResolutionLimits::default(),
            events: ResolutionEventEmitter::new_disabled(),
        }
    }

    pub fn from_config(transport: Arc<dyn QueryTransport>, config: &ResolverConfig) -> Self {
        Self::new(transport, config.root_server).with_limits(ResolutionLimits::from_config(config))
    }

    pub fn with_limits(mut self, limits: ResolutionLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_event_emitter(mut self, events: ResolutionEventEmitter) -> Self {
        self.events = events;
        self
    }

    pub async fn resolve(
        &self,
        domain: &DomainName,
        cache: &mut RecordCache,
    ) -> Result<Resolution, DomainError> {
        let mut ctx = ResolutionContext::new(self.limits);
        let (canonical, address) = self
            .resolve_in_context(domain.clone(), cache, &mut ctx)
            .await?;

        info!(
            domain = %domain,
            canonical = %canonical,
            address = %address,
            queries = ctx.queries_sent(),
            "Resolution complete"
        );

        Ok(Resolution {
            domain: domain.clone(),
            canonical,
            address,
            queries_sent: ctx.queries_sent(),
        })
    }

    fn resolve_in_context<'a>(
        &'a self,
        domain: DomainName,
        cache: &'a mut RecordCache,
        ctx: &'a mut ResolutionContext,
    ) -> BoxFuture<'a, Result<(DomainName, Ipv4Addr), DomainError>> {
        Box::pin(async move {
            ctx.claim(&domain)?;
            let mut claimed = vec![domain.clone()];
            let outcome = self.walk(domain, cache, ctx, &mut claimed).await;
            ctx.release(&claimed);
            outcome
        })
    }

    async fn walk(
        &self,
        domain: DomainName,
        cache: &mut RecordCache,
        ctx: &mut ResolutionContext,
        claimed: &mut Vec<DomainName>,
    ) -> Result<(DomainName, Ipv4Addr), DomainError> {
        let mut target = domain;
        let mut server = self.root_server;

        loop {
            ctx.count_query(&target)?;
            self.events.emit(ResolutionEvent::QuerySent {
                server,
                domain: target.clone(),
                record_type: RecordType::A,
            });
            debug!(server = %server, domain = %target, depth = ctx.depth(), "Querying name server");

            let sections = self.transport.query(server, &target, RecordType::A).await?;

            if sections.is_empty() {
                debug!(server = %server, domain = %target, "Empty response");
                return Err(DomainError::NotFound(target.to_string()));
            }

            self.import(&sections, cache);

            let cached_answer = cache.get(&target, CacheKind::A).map(parse_address);
            if let Some(address) = cached_answer {
                let address = address?;
                self.events.emit(ResolutionEvent::Answered {
                    domain: target.clone(),
                    address,
                });
                return Ok((target, address));
            }

            if let Some(alias) = sections.leading_cname() {
                let next = record_name(&alias.value)?;
                self.events.emit(ResolutionEvent::AliasDetected {
                    alias: target.clone(),
                    target: next.clone(),
                });
                debug!(alias = %target, target = %next, "Following CNAME from the root");

                ctx.claim(&next)?;
                claimed.push(next.clone());
                target = next;
                server = self.root_server;
                continue;
            }

            let Some(referral) = sections.first_referral() else {
                self.events.emit(ResolutionEvent::NoAuthority {
                    domain: target.clone(),
                });
                return Err(DomainError::DeadEnd(target.to_string()));
            };

            let name_server = record_name(&referral.value)?;
            self.events.emit(ResolutionEvent::NextServer {
                name_server: name_server.clone(),
            });

            let cached_server = cache.get(&name_server, CacheKind::A).map(parse_address);
            server = match cached_server {
                Some(address) => {
                    let address = address?;
                    self.events.emit(ResolutionEvent::NameServerCached {
                        name_server,
                        address,
                    });
                    address
                }
                None => {
                    ctx.descend(&target, &name_server)?;
                    self.events.emit(ResolutionEvent::ResolvingNameServer {
                        name_server: name_server.clone(),
                        depth: ctx.depth(),
                    });
                    debug!(name_server = %name_server, depth = ctx.depth(), "No glue, resolving name server");

                    let nested = self.resolve_in_context(name_server, cache, ctx).await;
                    ctx.ascend();
                    nested?.1
                }
            };
        }
    }

    fn import(&self, sections: &ResponseSections, cache: &mut RecordCache) {
        for (section, record) in sections.iter() {
            if let Some(kind) = CacheKind::from_record_type(record.record_type) {
                cache.put(&record.name, kind, record.value.clone());
            }
            self.events.emit(ResolutionEvent::RecordLearned {
                section,
                record: record.clone(),
            });
        }
    }
}

fn parse_address(value: &str) -> Result<Ipv4Addr, DomainError> {
    value
        .parse()
        .map_err(|_| DomainError::InvalidIpAddress(value.to_string()))
}

fn record_name(value: &str) -> Result<DomainName, DomainError> {
    DomainName::parse(value).map_err(|e| {
        DomainError::InvalidDnsResponse(format!("record names '{}': {}", value, e))
    })
}
