//! Alias entities: a single short-code/URL pair and the mapping collections.

use std::collections::HashMap;

/// One direction of the alias mapping, persisted as a single stream.
pub type Mapping = HashMap<String, String>;

/// A short code paired with the original URL it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRecord {
    pub code: String,
    pub original_url: String,
}

impl AliasRecord {
    pub fn new(code: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            original_url: original_url.into(),
        }
    }
}

/// Input for creating an alias.
///
/// Without `custom_code`, a code is generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAlias {
    pub original_url: String,
    pub custom_code: Option<String>,
}

impl NewAlias {
    pub fn generated(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            custom_code: None,
        }
    }

    pub fn with_code(original_url: impl Into<String>, custom_code: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            custom_code: Some(custom_code.into()),
        }
    }
}

impl From<&str> for NewAlias {
    fn from(original_url: &str) -> Self {
        Self::generated(original_url)
    }
}

impl From<String> for NewAlias {
    fn from(original_url: String) -> Self {
        Self::generated(original_url)
    }
}

/// Both directions of the persisted mapping, read together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSnapshot {
    /// Short code to original URL.
    pub forward: Mapping,
    /// Original URL to short code.
    pub reverse: Mapping,
    /// Set when unflushed changes mean this persisted view is out of date.
    pub stale: bool,
}

impl MappingSnapshot {
    pub fn new(forward: Mapping, reverse: Mapping) -> Self {
        Self {
            forward,
            reverse,
            stale: false,
        }
    }

    pub fn with_stale(mut self, stale: bool) -> Self {
        self.stale = stale;
        self
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty() && self.reverse.is_empty()
    }

    /// Returns true if `forward` and `reverse` are exact inverses.
    pub fn is_bijective(&self) -> bool {
        self.forward.len() == self.reverse.len()
            && self
                .forward
                .iter()
                .all(|(code, url)| self.reverse.get(url) == Some(code))
    }

    /// Forward entries as records, ordered by short code.
    pub fn records(&self) -> Vec<AliasRecord> {
        let mut records: Vec<_> = self
            .forward
            .iter()
            .map(|(code, url)| AliasRecord::new(code, url))
            .collect();
        records.sort_by(|a, b| a.code.cmp(&b.code));
        records
    }

    /// Rebuilds a consistent pair from the forward direction.
    ///
    /// When a URL appears under several codes, the lexicographically smallest
    /// code is kept and the others are dropped.
    pub fn reconciled(forward: &Mapping) -> Self {
        let mut codes: Vec<_> = forward.keys().collect();
        codes.sort();

        let mut reverse = Mapping::with_capacity(forward.len());
        let mut kept = Mapping::with_capacity(forward.len());
        for code in codes {
            let url = &forward[code];
            if !reverse.contains_key(url) {
                reverse.insert(url.clone(), code.clone());
                kept.insert(code.clone(), url.clone());
            }
        }

        Self::new(kept, reverse)
    }
}
