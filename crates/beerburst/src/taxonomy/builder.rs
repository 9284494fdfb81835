//! Incremental construction of a [`Taxonomy`] from records

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use super::{Description, DescriptionId, Taxonomy};
use crate::error::{BeerburstError, Result};
use crate::record::DescriptionRecord;

/// What to do when a description is given a second, different parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParentPolicy {
    /// Keep every parent link; the node then appears under each parent.
    #[default]
    Accumulate,

    /// The most recent parent wins; the older link is removed.
    Replace,

    /// Fail the build with [`BeerburstError::ConflictingParent`].
    Reject,
}

impl std::str::FromStr for ParentPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "accumulate" => Ok(Self::Accumulate),
            "replace" => Ok(Self::Replace),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "unknown parent policy '{}' (expected accumulate, replace or reject)",
                other
            )),
        }
    }
}

/// Builds a [`Taxonomy`] one record at a time.
///
/// Every name is registered once in a flat index the first time it is seen,
/// whether as a record's `name` or as its `parent`.
///
/// # Example
///
/// ```
/// use beerburst::{DescriptionRecord, ParentPolicy, TaxonomyBuilder};
///
/// let mut builder = TaxonomyBuilder::with_policy(ParentPolicy::Replace);
/// builder.push(&DescriptionRecord::child("Bock", "Ale")).unwrap();
/// builder.push(&DescriptionRecord::child("Bock", "Lager")).unwrap();
/// let taxonomy = builder.build();
///
/// let bock = taxonomy.find("Bock").unwrap();
/// let parents: Vec<_> = taxonomy.parents(bock).map(|p| taxonomy.name(p)).collect();
/// assert_eq!(parents, vec!["Lager"]);
/// ```
#[derive(Debug, Default)]
pub struct TaxonomyBuilder {
    policy: ParentPolicy,
    nodes: Vec<Description>,
    index: IndexMap<String, DescriptionId>,
    skipped: usize,
    refused: usize,
}

impl TaxonomyBuilder {
    /// Create a builder with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with an explicit parent policy.
    pub fn with_policy(policy: ParentPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// The active parent policy.
    pub fn policy(&self) -> ParentPolicy {
        self.policy
    }

    /// Records skipped for lacking a name.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Parent links refused because they would close a cycle.
    pub fn refused(&self) -> usize {
        self.refused
    }

    /// Feed one record. Returns the id of the record's node, or `None` if the
    /// record had no usable name.
    pub fn push(&mut self, record: &DescriptionRecord) -> Result<Option<DescriptionId>> {
        let Some(name) = record.name() else {
            warn!(parent = ?record.parent, "skipping description record without a name");
            self.skipped += 1;
            return Ok(None);
        };

        let id = self.intern(name);
        if let Some(parent) = record.parent() {
            let parent_id = self.intern(parent);
            self.link(id, parent_id)?;
        }
        Ok(Some(id))
    }

    /// Feed records in order, stopping at the first error.
    pub fn extend<'a, I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a DescriptionRecord>,
    {
        for record in records {
            self.push(record)?;
        }
        Ok(())
    }

    /// Finish the build and compute the root set.
    pub fn build(self) -> Taxonomy {
        let taxonomy = Taxonomy::from_parts(self.nodes, self.index);
        info!(
            descriptions = taxonomy.len(),
            roots = taxonomy.roots().len(),
            skipped = self.skipped,
            refused = self.refused,
            "built description taxonomy"
        );
        taxonomy
    }

    // ═══════════════════════════════════════════════════════════════════
    // Internals
    // ═══════════════════════════════════════════════════════════════════

    fn intern(&mut self, name: &str) -> DescriptionId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = DescriptionId::from_index(self.nodes.len());
        self.nodes.push(Description::new(name));
        self.index.insert(name.to_string(), id);
        id
    }

    fn link(&mut self, child: DescriptionId, parent: DescriptionId) -> Result<()> {
        if self.reaches_by_parents(parent, child) {
            warn!(
                child = %self.nodes[child.index()].name,
                parent = %self.nodes[parent.index()].name,
                "refusing parent link that would create a cycle"
            );
            self.refused += 1;
            return Ok(());
        }

        let child_name = self.nodes[child.index()].name.clone();
        let parent_name = self.nodes[parent.index()].name.clone();

        let current = &self.nodes[child.index()].parents;
        let existing = if current.contains_key(&parent_name) {
            None
        } else {
            current.keys().next().cloned()
        };

        if let Some(existing) = existing {
            match self.policy {
                ParentPolicy::Accumulate => {
                    debug!(child = %child_name, parent = %parent_name, "adding second parent");
                }
                ParentPolicy::Replace => self.unlink_parents(child),
                ParentPolicy::Reject => {
                    return Err(BeerburstError::ConflictingParent {
                        name: child_name,
                        existing,
                        requested: parent_name,
                    });
                }
            }
        }

        self.nodes[parent.index()].children.insert(child_name, child);
        self.nodes[child.index()].parents.insert(parent_name, parent);
        Ok(())
    }

    fn unlink_parents(&mut self, child: DescriptionId) {
        let old = std::mem::take(&mut self.nodes[child.index()].parents);
        let child_name = self.nodes[child.index()].name.clone();
        for (_, parent) in old {
            self.nodes[parent.index()].children.shift_remove(&child_name);
        }
    }

    /// Whether `target` is `from` or one of its ancestors.
    fn reaches_by_parents(&self, from: DescriptionId, target: DescriptionId) -> bool {
        let mut seen = HashSet::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if id == target {
                return true;
            }
            if seen.insert(id) {
                stack.extend(self.nodes[id.index()].parents.values().copied());
            }
        }
        false
    }
}
