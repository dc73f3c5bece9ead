use crate::errors::DomainError;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_LEN: usize = 254;

/// A fully-qualified, case-folded domain name.
///
/// Every name carries the trailing root label: `example.com` and
/// `EXAMPLE.com.` both normalize to `example.com.`. The canonical text is
/// what the record cache is keyed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainName(Arc<str>);

impl DomainName {
    pub fn root() -> Self {
        Self(Arc::from("."))
    }

    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();

        if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' contains whitespace or control characters",
                trimmed
            )));
        }

        if trimmed.is_empty() || trimmed == "." {
            return Ok(Self::root());
        }

        let mut canonical = trimmed.to_ascii_lowercase();
        if !canonical.ends_with('.') {
            canonical.push('.');
        }

        if canonical.len() > MAX_NAME_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' is longer than {} characters",
                trimmed,
                MAX_NAME_LEN - 1
            )));
        }

        for label in canonical[..canonical.len() - 1].split('.') {
            if label.is_empty() {
                return Err(DomainError::InvalidDomainName(format!(
                    "'{}' contains an empty label",
                    trimmed
                )));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(DomainError::InvalidDomainName(format!(
                    "label '{}' is longer than {} characters",
                    label, MAX_LABEL_LEN
                )));
            }
        }

        Ok(Self(Arc::from(canonical)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl FromStr for DomainName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
