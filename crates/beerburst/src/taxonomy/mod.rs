//! The description forest built from flat `{name, parent}` records

mod builder;

pub use builder::{ParentPolicy, TaxonomyBuilder};

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;

use crate::error::Result;
use crate::record::DescriptionRecord;

/// Stable handle to a [`Description`] inside its [`Taxonomy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DescriptionId(u32);

impl DescriptionId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DescriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node of the taxonomy.
///
/// Parent and child links are ids into the owning [`Taxonomy`], keyed by the
/// linked node's name and kept in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Description {
    /// The description's name
    pub name: String,

    pub(crate) parents: IndexMap<String, DescriptionId>,
    pub(crate) children: IndexMap<String, DescriptionId>,
}

impl Description {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parents: IndexMap::new(),
            children: IndexMap::new(),
        }
    }

    /// Parent links by name.
    pub fn parents(&self) -> &IndexMap<String, DescriptionId> {
        &self.parents
    }

    /// Child links by name.
    pub fn children(&self) -> &IndexMap<String, DescriptionId> {
        &self.children
    }

    /// Number of immediate children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Whether this node has no parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena of descriptions plus its two derived indexes.
///
/// The arena owns every node. The name index holds one entry per distinct
/// name ever seen, declared or synthesized as a parent. The root set lists
/// nodes without parents in registry order and is computed once at build
/// time; the taxonomy is never mutated afterwards.
///
/// # Example
///
/// ```
/// use beerburst::{DescriptionRecord, Taxonomy};
///
/// let taxonomy = Taxonomy::from_records(&[
///     DescriptionRecord::child("IPA", "Ale"),
///     DescriptionRecord::child("Stout", "Ale"),
/// ])
/// .unwrap();
///
/// let ale = taxonomy.find("Ale").unwrap();
/// assert_eq!(taxonomy.roots(), &[ale]);
/// assert_eq!(taxonomy.get(ale).child_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    nodes: Vec<Description>,
    index: IndexMap<String, DescriptionId>,
    roots: Vec<DescriptionId>,
}

impl Taxonomy {
    pub(crate) fn from_parts(
        nodes: Vec<Description>,
        index: IndexMap<String, DescriptionId>,
    ) -> Self {
        let roots = index
            .values()
            .copied()
            .filter(|id| nodes[id.index()].is_root())
            .collect();
        Self {
            nodes,
            index,
            roots,
        }
    }

    /// Build a taxonomy with the default [`ParentPolicy`].
    pub fn from_records<'a, I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a DescriptionRecord>,
    {
        Self::from_records_with_policy(records, ParentPolicy::default())
    }

    /// Build a taxonomy with an explicit [`ParentPolicy`].
    pub fn from_records_with_policy<'a, I>(records: I, policy: ParentPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = &'a DescriptionRecord>,
    {
        let mut builder = TaxonomyBuilder::with_policy(policy);
        builder.extend(records)?;
        Ok(builder.build())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Look up a node by name.
    pub fn find(&self, name: &str) -> Option<DescriptionId> {
        self.index.get(name).copied()
    }

    /// Borrow a node.
    ///
    /// Ids are only handed out by the taxonomy that owns them.
    pub fn get(&self, id: DescriptionId) -> &Description {
        &self.nodes[id.index()]
    }

    /// A node's name.
    pub fn name(&self, id: DescriptionId) -> &str {
        &self.get(id).name
    }

    /// Immediate children in insertion order.
    pub fn children(&self, id: DescriptionId) -> impl Iterator<Item = DescriptionId> + '_ {
        self.get(id).children.values().copied()
    }

    /// Parents in insertion order.
    pub fn parents(&self, id: DescriptionId) -> impl Iterator<Item = DescriptionId> + '_ {
        self.get(id).parents.values().copied()
    }

    /// Forest roots in registry order.
    pub fn roots(&self) -> &[DescriptionId] {
        &self.roots
    }

    /// Whether `id` is a forest root.
    pub fn is_root(&self, id: DescriptionId) -> bool {
        self.get(id).is_root()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Iteration and Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// Number of distinct descriptions.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the taxonomy holds no descriptions.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (DescriptionId, &Description)> {
        self.index
            .values()
            .map(move |&id| (id, &self.nodes[id.index()]))
    }

    /// All registered names in registry order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Pre-order walk below `id` (excluding `id`), visiting each node once
    /// even when it is linked under several parents.
    pub fn descendants(&self, id: DescriptionId) -> Vec<DescriptionId> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let mut stack: Vec<DescriptionId> = self.children(id).collect();
        stack.reverse();
        while let Some(next) = stack.pop() {
            if !seen.insert(next) {
                continue;
            }
            out.push(next);
            let before = stack.len();
            stack.extend(self.children(next));
            stack[before..].reverse();
        }
        out
    }

    /// Chain of first parents from `id` up to its root, nearest first.
    pub fn ancestors(&self, id: DescriptionId) -> Vec<DescriptionId> {
        let mut out = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parents(current).next() {
            if parent == id || out.contains(&parent) {
                break;
            }
            out.push(parent);
            current = parent;
        }
        out
    }

    /// Distance from `id` to its root along first parents.
    pub fn depth_of(&self, id: DescriptionId) -> usize {
        self.ancestors(id).len()
    }
}
