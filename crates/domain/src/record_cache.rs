use crate::dns_record::RecordType;
use crate::domain_name::DomainName;
use crate::errors::DomainError;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fmt;

/// The record kinds the session cache keeps one value for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CacheKind {
    A,
    NS,
    CNAME,
}

impl CacheKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKind::A => "A",
            CacheKind::NS => "NS",
            CacheKind::CNAME => "CNAME",
        }
    }

    /// `None` for record types the cache does not track.
    pub fn from_record_type(record_type: RecordType) -> Option<Self> {
        match record_type {
            RecordType::A => Some(CacheKind::A),
            RecordType::NS => Some(CacheKind::NS),
            RecordType::CNAME => Some(CacheKind::CNAME),
            _ => None,
        }
    }
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub name: DomainName,
    pub values: BTreeMap<CacheKind, String>,
}

impl CacheEntry {
    fn new(name: DomainName) -> Self {
        Self {
            name,
            values: BTreeMap::new(),
        }
    }

    pub fn get(&self, kind: CacheKind) -> Option<&str> {
        self.values.get(&kind).map(String::as_str)
    }
}

impl fmt::Display for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {{", self.name)?;
        for (i, (kind, value)) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", kind, value)?;
        }
        f.write_str("}")
    }
}

/// Session-scoped record cache keyed by owner name.
///
/// Entries keep the order in which their owner name was first seen; writing
/// a kind that is already present overwrites it in place. Nothing expires.
#[derive(Debug, Default, Clone)]
pub struct RecordCache {
    entries: Vec<CacheEntry>,
    index: FxHashMap<DomainName, usize>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, name: &DomainName, kind: CacheKind, value: impl Into<String>) {
        let position = match self.index.get(name) {
            Some(&position) => position,
            None => {
                self.entries.push(CacheEntry::new(name.clone()));
                let position = self.entries.len() - 1;
                self.index.insert(name.clone(), position);
                position
            }
        };

        self.entries[position].values.insert(kind, value.into());
    }

    pub fn get(&self, name: &DomainName, kind: CacheKind) -> Option<&str> {
        self.get_entry(name).and_then(|entry| entry.get(kind))
    }

    pub fn get_entry(&self, name: &DomainName) -> Option<&CacheEntry> {
        self.index.get(name).map(|&position| &self.entries[position])
    }

    pub fn list(&self) -> &[CacheEntry] {
        &self.entries
    }

    /// Removes the `index`-th entry of [`list`](Self::list), counting from 1.
    pub fn remove(&mut self, index: i64) -> Result<CacheEntry, DomainError> {
        let len = self.entries.len();
        if index <= 0 || index as u64 > len as u64 {
            return Err(DomainError::InvalidIndex { index, len });
        }

        let position = (index - 1) as usize;
        let removed = self.entries.remove(position);
        self.index.remove(&removed.name);
        for shifted in self.index.values_mut() {
            if *shifted > position {
                *shifted -= 1;
            }
        }

        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
