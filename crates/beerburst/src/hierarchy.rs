//! Weighted hierarchy consumed by the sunburst layout
//!
//! The taxonomy is a forest keyed by name; charts want a single rooted tree
//! where every node carries a weight. [`HierarchyData`] is the nested
//! `{name, children, size?}` shape (serializable as JSON), and [`Hierarchy`]
//! is its flattened, weighted and sorted form.
//!
//! ```text
//! Taxonomy → HierarchyData → Hierarchy → Layout → Extent per node
//! ```

use std::cmp::Reverse;

use serde::Serialize;

use crate::taxonomy::{DescriptionId, Taxonomy};

/// Label of the synthetic node that holds the forest roots.
pub const DEFAULT_ROOT_LABEL: &str = "Beer Descriptions";

/// Nested hierarchy in the shape charting libraries read.
///
/// Leaves carry `size = 1`; internal nodes carry no size and are weighed by
/// the sum of their descendants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchyData {
    /// Display name
    pub name: String,

    /// Nested children (empty for leaves)
    pub children: Vec<HierarchyData>,

    /// Leaf weight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    #[serde(skip)]
    source: Option<DescriptionId>,
}

impl HierarchyData {
    /// Reshape a taxonomy under a synthetic root named `root_label`.
    ///
    /// A description with several parents is copied under each of them.
    pub fn from_taxonomy(taxonomy: &Taxonomy, root_label: &str) -> Self {
        // Pre-order slots; slot 0 is the synthetic root.
        let mut sources: Vec<Option<DescriptionId>> = vec![None];
        let mut children: Vec<Vec<usize>> = vec![Vec::new()];
        let mut stack: Vec<(DescriptionId, usize)> =
            taxonomy.roots().iter().rev().map(|&id| (id, 0)).collect();
        while let Some((id, parent)) = stack.pop() {
            let slot = sources.len();
            sources.push(Some(id));
            children.push(Vec::new());
            children[parent].push(slot);
            let below: Vec<_> = taxonomy.children(id).collect();
            stack.extend(below.into_iter().rev().map(|child| (child, slot)));
        }

        // Children occupy later slots, so a reverse sweep finds them built.
        let mut built: Vec<Option<HierarchyData>> = (0..sources.len()).map(|_| None).collect();
        for slot in (0..sources.len()).rev() {
            let nested = children[slot]
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            let name = match sources[slot] {
                Some(id) => taxonomy.name(id).to_string(),
                None => root_label.to_string(),
            };
            built[slot] = Some(Self::node(name, nested, sources[slot]));
        }
        built[0]
            .take()
            .unwrap_or_else(|| Self::node(root_label.to_string(), Vec::new(), None))
    }

    fn node(name: String, children: Vec<HierarchyData>, source: Option<DescriptionId>) -> Self {
        let size = children.is_empty().then_some(1);
        Self {
            name,
            children,
            size,
            source,
        }
    }

    /// The taxonomy node this entry was made from (`None` for the root).
    pub fn source(&self) -> Option<DescriptionId> {
        self.source
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Drop for HierarchyData {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// Stable handle to a [`HierarchyNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HierarchyId(u32);

impl HierarchyId {
    /// Position of the node in the flattened hierarchy.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One node of a [`Hierarchy`].
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    /// Display name
    pub name: String,
    /// Originating taxonomy node (`None` for the synthetic root)
    pub source: Option<DescriptionId>,
    /// Parent node (`None` for the root)
    pub parent: Option<HierarchyId>,
    /// Children sorted by descending value
    pub children: Vec<HierarchyId>,
    /// Distance from the root
    pub depth: usize,
    /// Longest distance down to a leaf
    pub height: usize,
    /// Own size plus the sizes of all descendants
    pub value: u64,
}

impl HierarchyNode {
    /// Whether the node has children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Flattened, weighted hierarchy stored in pre-order; the root is first.
#[derive(Debug, Clone, PartialEq)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
}

impl Hierarchy {
    /// Weigh, sort and flatten nested data.
    ///
    /// Siblings are ordered by descending value; ties keep input order.
    pub fn new(data: &HierarchyData) -> Self {
        // Input order, pre-order: children always follow their parent.
        let mut entries: Vec<Entry<'_>> = Vec::new();
        let mut stack: Vec<(&HierarchyData, Option<usize>)> = vec![(data, None)];
        while let Some((node, parent)) = stack.pop() {
            let index = entries.len();
            entries.push(Entry {
                data: node,
                children: Vec::new(),
                value: node.size.unwrap_or(0),
                height: 0,
            });
            if let Some(parent) = parent {
                entries[parent].children.push(index);
            }
            stack.extend(node.children.iter().rev().map(|child| (child, Some(index))));
        }

        for index in (0..entries.len()).rev() {
            let mut children = std::mem::take(&mut entries[index].children);
            children.sort_by_key(|&child| Reverse(entries[child].value));
            let value: u64 = children.iter().map(|&child| entries[child].value).sum();
            let height = children
                .iter()
                .map(|&child| entries[child].height + 1)
                .max()
                .unwrap_or(0);
            let entry = &mut entries[index];
            entry.value += value;
            entry.height = height;
            entry.children = children;
        }

        // Re-emit in sorted pre-order.
        let mut nodes: Vec<HierarchyNode> = Vec::with_capacity(entries.len());
        let mut stack: Vec<(usize, Option<HierarchyId>, usize)> = vec![(0, None, 0)];
        while let Some((index, parent, depth)) = stack.pop() {
            let id = HierarchyId(nodes.len() as u32);
            let entry = &entries[index];
            nodes.push(HierarchyNode {
                name: entry.data.name.clone(),
                source: entry.data.source,
                parent,
                children: Vec::with_capacity(entry.children.len()),
                depth,
                height: entry.height,
                value: entry.value,
            });
            if let Some(parent) = parent {
                nodes[parent.index()].children.push(id);
            }
            stack.extend(
                entry
                    .children
                    .iter()
                    .rev()
                    .map(|&child| (child, Some(id), depth + 1)),
            );
        }
        Self { nodes }
    }

    /// Convenience for `Hierarchy::new(&HierarchyData::from_taxonomy(..))`.
    pub fn from_taxonomy(taxonomy: &Taxonomy, root_label: &str) -> Self {
        Self::new(&HierarchyData::from_taxonomy(taxonomy, root_label))
    }

    /// The root node.
    pub fn root(&self) -> HierarchyId {
        HierarchyId(0)
    }

    /// Borrow a node.
    pub fn get(&self, id: HierarchyId) -> &HierarchyNode {
        &self.nodes[id.index()]
    }

    /// Number of nodes including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a hierarchy has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All ids in pre-order, root first.
    pub fn ids(&self) -> impl Iterator<Item = HierarchyId> {
        (0..self.nodes.len() as u32).map(HierarchyId)
    }

    /// All ids except the root, in pre-order.
    pub fn descendants(&self) -> impl Iterator<Item = HierarchyId> {
        self.ids().skip(1)
    }

    /// First node in pre-order with the given name.
    pub fn find(&self, name: &str) -> Option<HierarchyId> {
        self.ids().find(|&id| self.get(id).name == name)
    }

    /// `id` and its ancestors up to the root, nearest first.
    pub fn ancestors(&self, id: HierarchyId) -> Vec<HierarchyId> {
        let mut out = vec![id];
        let mut current = id;
        while let Some(parent) = self.get(current).parent {
            out.push(parent);
            current = parent;
        }
        out
    }

    /// Names from the root down to `id`, joined with `/`.
    pub fn path(&self, id: HierarchyId) -> String {
        let mut names: Vec<&str> = self
            .ancestors(id)
            .into_iter()
            .map(|a| self.get(a).name.as_str())
            .collect();
        names.reverse();
        names.join("/")
    }

    /// The depth-1 ancestor of `id` (itself at depth 1, `None` for the root).
    pub fn branch_of(&self, id: HierarchyId) -> Option<HierarchyId> {
        self.ancestors(id)
            .into_iter()
            .find(|&a| self.get(a).depth == 1)
    }

    /// Children of the root.
    pub fn branches(&self) -> &[HierarchyId] {
        &self.get(self.root()).children
    }
}

struct Entry<'a> {
    data: &'a HierarchyData,
    children: Vec<usize>,
    value: u64,
    height: usize,
}
