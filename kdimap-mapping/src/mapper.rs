// ---------------------------------------------------------------------------
// Canonical mapper
// ---------------------------------------------------------------------------
//
// Resolves an issue-type code to its canonical vulnerability definition.

use std::collections::HashMap;
use std::sync::LazyLock;

use kdimap_types::KdiVulnDef;
use tracing::{debug, warn};

use crate::bundled::bundled_entries;
use crate::types::CanonicalEntry;

/// Source of canonical vulnerability definitions.
///
/// `lookup` is total: a code with no canonical entry resolves to a definition
/// carrying only its identifier.
pub trait CanonicalMapper: Send + Sync {
    fn lookup(&self, issue_type: &str) -> KdiVulnDef;
}

impl<M: CanonicalMapper + ?Sized> CanonicalMapper for &M {
    fn lookup(&self, issue_type: &str) -> KdiVulnDef {
        (**self).lookup(issue_type)
    }
}

static BUNDLED: LazyLock<StaticMapper> = LazyLock::new(|| StaticMapper::new(bundled_entries()));

/// Exact-match mapper over a fixed table.
#[derive(Debug, Clone)]
pub struct StaticMapper {
    entries: Vec<CanonicalEntry>,
    index: HashMap<&'static str, usize>,
}

impl StaticMapper {
    /// Index `entries` by issue-type code. The first entry claiming a code wins.
    pub fn new(entries: Vec<CanonicalEntry>) -> Self {
        let mut index: HashMap<&'static str, usize> = HashMap::new();
        for (pos, entry) in entries.iter().enumerate() {
            for &code in entry.issue_types {
                if let Some(&existing) = index.get(code) {
                    warn!(
                        code,
                        kept = entries[existing].name,
                        ignored = entry.name,
                        "issue type mapped twice"
                    );
                    continue;
                }
                index.insert(code, pos);
            }
        }
        Self { entries, index }
    }

    /// The mapper over the bundled table.
    pub fn bundled() -> &'static StaticMapper {
        &BUNDLED
    }

    pub fn entry(&self, issue_type: &str) -> Option<&CanonicalEntry> {
        self.index.get(issue_type).map(|&pos| &self.entries[pos])
    }

    /// Number of issue-type codes with a canonical entry.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl Default for StaticMapper {
    fn default() -> Self {
        BUNDLED.clone()
    }
}

impl CanonicalMapper for StaticMapper {
    fn lookup(&self, issue_type: &str) -> KdiVulnDef {
        match self.entry(issue_type) {
            Some(entry) => entry.to_vuln_def(issue_type),
            None => {
                debug!(issue_type, "no canonical mapping for issue type");
                KdiVulnDef::identifier_only(issue_type)
            }
        }
    }
}
