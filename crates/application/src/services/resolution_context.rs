use ferrous_resolve_domain::{DomainError, DomainName, ResolverConfig};
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionLimits {
    pub max_referral_depth: usize,
    pub max_queries: usize,
}

impl ResolutionLimits {
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self {
            max_referral_depth: config.max_referral_depth,
            max_queries: config.max_queries,
        }
    }
}

impl Default for ResolutionLimits {
    fn default() -> Self {
        Self::from_config(&ResolverConfig::default())
    }
}

/// Guard state for one top-level resolution, shared by every nested
/// name-server lookup it triggers.
///
/// `in_progress` holds the names currently being walked on the call stack;
/// walking one of them again can never terminate.
#[derive(Debug)]
pub struct ResolutionContext {
    limits: ResolutionLimits,
    in_progress: FxHashSet<DomainName>,
    depth: usize,
    queries_sent: usize,
}

impl ResolutionContext {
    pub fn new(limits: ResolutionLimits) -> Self {
        Self {
            limits,
            in_progress: FxHashSet::default(),
            depth: 0,
            queries_sent: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn queries_sent(&self) -> usize {
        self.queries_sent
    }

    pub fn claim(&mut self, name: &DomainName) -> Result<(), DomainError> {
        if !self.in_progress.insert(name.clone()) {
            return Err(DomainError::ReferralLoop {
                domain: name.to_string(),
                reason: format!("{} is already being resolved", name),
            });
        }
        Ok(())
    }

    pub fn release(&mut self, names: &[DomainName]) {
        for name in names {
            self.in_progress.remove(name);
        }
    }

    pub fn descend(&mut self, from: &DomainName, name_server: &DomainName) -> Result<(), DomainError> {
        if self.depth >= self.limits.max_referral_depth {
            return Err(DomainError::ReferralLoop {
                domain: from.to_string(),
                reason: format!(
                    "name server {} needs nesting deeper than {}",
                    name_server, self.limits.max_referral_depth
                ),
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn count_query(&mut self, domain: &DomainName) -> Result<(), DomainError> {
        if self.queries_sent >= self.limits.max_queries {
            return Err(DomainError::ReferralLoop {
                domain: domain.to_string(),
                reason: format!("gave up after {} queries", self.queries_sent),
            });
        }
        self.queries_sent += 1;
        Ok(())
    }
}
