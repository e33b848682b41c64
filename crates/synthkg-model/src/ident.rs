//! Hierarchical node identifiers and the per-build allocator.
//!
//! An identifier is `tag-<i>[-<j>[-<k>]]`: the category wire tag followed by
//! an integer path. The path encodes lineage — `fr-3-1-2` is friend 2 of
//! student 1 of university 3 — and is the only place that lineage exists, so
//! explanation reconstruction works purely on parsed ids.

use crate::entity::{EntityType, GeneratorFamily};
use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// NodeId: typed parse/format for the `tag-i-j-k` wire form
// ============================================================================

/// A parsed node identifier: category plus hierarchical integer path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    pub category: EntityType,
    pub path: Vec<u32>,
}

impl NodeId {
    pub fn new(category: EntityType, path: Vec<u32>) -> Self {
        Self { category, path }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category.tag())?;
        for component in &self.path {
            write!(f, "-{component}")?;
        }
        Ok(())
    }
}

impl FromStr for NodeId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        let tag = parts.next().unwrap_or("");
        let category = EntityType::from_tag(tag).map_err(|_| ModelError::MalformedId {
            id: s.to_string(),
            reason: format!("unknown entity tag `{tag}`"),
        })?;

        let mut path = Vec::new();
        for part in parts {
            let component = part.parse::<u32>().map_err(|_| ModelError::MalformedId {
                id: s.to_string(),
                reason: format!("non-numeric path component `{part}`"),
            })?;
            path.push(component);
        }
        if path.is_empty() {
            return Err(ModelError::MalformedId {
                id: s.to_string(),
                reason: "identifier has no path components".to_string(),
            });
        }

        Ok(NodeId { category, path })
    }
}

// ============================================================================
// IdAllocator: per-family, per-category counters
// ============================================================================

/// Identifier allocator for one dataset build.
///
/// Owns a mutable per-category counter map. Each `Dataset` constructs its own
/// allocator, so counters never leak across builds or across families, and
/// independent datasets can be built concurrently.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    family: GeneratorFamily,
    counts: HashMap<EntityType, u64>,
}

impl IdAllocator {
    pub fn new(family: GeneratorFamily) -> Self {
        Self {
            family,
            counts: HashMap::new(),
        }
    }

    pub fn family(&self) -> GeneratorFamily {
        self.family
    }

    /// How many identifiers have been handed out for `category`.
    pub fn count(&self, category: EntityType) -> u64 {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Reset one category's counter, or every counter when `category` is
    /// `None`. A graph build must start from a full reset.
    pub fn reset(&mut self, category: Option<EntityType>) {
        match category {
            Some(category) => {
                self.counts.insert(category, 0);
            }
            None => self.counts.clear(),
        }
    }

    /// Build the identifier for `category` with the given hierarchy
    /// components and bump the category counter.
    ///
    /// Categories with arity 0 (the user-item-attr family) take no external
    /// components; the counter value itself becomes the path.
    pub fn generate(
        &mut self,
        category: EntityType,
        path: &[u32],
    ) -> Result<NodeId, ModelError> {
        let expected = self
            .family
            .arity(category)
            .ok_or(ModelError::UnsupportedCategory {
                family: self.family,
                category,
            })?;

        if expected != path.len() {
            return Err(ModelError::WrongArity {
                category,
                expected,
                got: path.len(),
            });
        }

        let count = self.counts.entry(category).or_insert(0);
        let id = if expected == 0 {
            NodeId::new(category, vec![*count as u32])
        } else {
            NodeId::new(category, path.to_vec())
        };
        *count += 1;
        Ok(id)
    }
}
