//! Collapsible nested list of descriptions
//!
//! The list is built on demand: only the roots and the children of expanded
//! items are materialized. Expansion state lives in a side table keyed by
//! item position, never on the rendered structure.
//!
//! A position is the chain of ids from a root down to the item. Under the
//! accumulating parent policy one description can appear under several
//! parents; each of those appearances is a separate position and expands on
//! its own.

use std::collections::HashSet;
use std::fmt::Write;

use tracing::debug;

use crate::error::{BeerburstError, Result};
use crate::markup::{escape_attr, escape_text};
use crate::taxonomy::{DescriptionId, Taxonomy};

/// Effect of toggling an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The item now shows its immediate children
    Expanded,
    /// The item's nested list was removed
    Collapsed,
    /// The item has no children; nothing changed
    Leaf,
}

/// Expansion state of the list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    expanded: HashSet<Vec<DescriptionId>>,
}

impl ListView {
    /// A view with every item collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of `id` reached through first parents.
    pub fn path_of(taxonomy: &Taxonomy, id: DescriptionId) -> Vec<DescriptionId> {
        let mut path = taxonomy.ancestors(id);
        path.reverse();
        path.push(id);
        path
    }

    /// Flip the item at `path` between collapsed and expanded.
    ///
    /// Collapsing also forgets the state of every position below `path`, so
    /// a later expansion shows fresh, collapsed children. Other positions of
    /// the same description are untouched.
    pub fn toggle(&mut self, taxonomy: &Taxonomy, path: &[DescriptionId]) -> Toggle {
        let Some(&id) = path.last() else {
            return Toggle::Leaf;
        };
        if self.expanded.remove(path) {
            self.expanded.retain(|below| !below.starts_with(path));
            debug!(item = %taxonomy.name(id), depth = path.len() - 1, "collapsed list item");
            return Toggle::Collapsed;
        }
        if taxonomy.get(id).is_leaf() {
            return Toggle::Leaf;
        }
        self.expanded.insert(path.to_vec());
        debug!(item = %taxonomy.name(id), depth = path.len() - 1, "expanded list item");
        Toggle::Expanded
    }

    /// Toggle the item named `name` at its first-parent position.
    pub fn toggle_name(&mut self, taxonomy: &Taxonomy, name: &str) -> Result<Toggle> {
        let id = taxonomy
            .find(name)
            .ok_or_else(|| BeerburstError::UnknownDescription(name.to_string()))?;
        Ok(self.toggle(taxonomy, &Self::path_of(taxonomy, id)))
    }

    /// Whether the item at `path` is expanded.
    pub fn is_expanded(&self, path: &[DescriptionId]) -> bool {
        self.expanded.contains(path)
    }

    /// Number of expanded positions.
    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    /// Collapse everything.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Expand every position that has children.
    pub fn expand_all(&mut self, taxonomy: &Taxonomy) {
        let mut stack: Vec<Vec<DescriptionId>> =
            taxonomy.roots().iter().map(|&root| vec![root]).collect();
        while let Some(path) = stack.pop() {
            let Some(&id) = path.last() else {
                continue;
            };
            if taxonomy.get(id).is_leaf() {
                continue;
            }
            for child in taxonomy.children(id) {
                let mut below = path.clone();
                below.push(child);
                stack.push(below);
            }
            self.expanded.insert(path);
        }
    }

    /// Materialize the list of roots, or `None` when there are no roots.
    pub fn build(&self, taxonomy: &Taxonomy) -> Option<ListElement> {
        // Visible positions in pre-order; depth grows by at most one per step.
        let mut visible = Vec::new();
        let mut stack: Vec<Vec<DescriptionId>> =
            taxonomy.roots().iter().rev().map(|&root| vec![root]).collect();
        while let Some(path) = stack.pop() {
            if self.is_expanded(&path) {
                if let Some(&id) = path.last() {
                    let children: Vec<_> = taxonomy.children(id).collect();
                    for &child in children.iter().rev() {
                        let mut below = path.clone();
                        below.push(child);
                        stack.push(below);
                    }
                }
            }
            visible.push(path);
        }

        let mut levels: Vec<Vec<ListItem>> = Vec::new();
        for path in visible {
            let depth = path.len() - 1;
            while levels.len() > depth + 1 {
                close_level(&mut levels);
            }
            if levels.len() == depth {
                levels.push(Vec::new());
            }
            let item = self.build_item(taxonomy, path);
            if let Some(level) = levels.last_mut() {
                level.push(item);
            }
        }
        while levels.len() > 1 {
            close_level(&mut levels);
        }
        levels
            .pop()
            .filter(|items| !items.is_empty())
            .map(|items| ListElement { depth: 0, items })
    }

    fn build_item(&self, taxonomy: &Taxonomy, path: Vec<DescriptionId>) -> ListItem {
        let id = path[path.len() - 1];
        let description = taxonomy.get(id);
        ListItem {
            id,
            name: description.name.clone(),
            child_count: description.child_count(),
            depth: path.len() - 1,
            expanded: self.is_expanded(&path),
            path,
            nested: None,
        }
    }
}

/// Attach the innermost open list to the last item of the list around it.
fn close_level(levels: &mut Vec<Vec<ListItem>>) {
    let Some(items) = levels.pop() else {
        return;
    };
    let depth = levels.len();
    if let Some(parent) = levels.last_mut().and_then(|level| level.last_mut()) {
        parent.nested = Some(ListElement { depth, items });
    }
}

/// A `<ul>` of items at one depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListElement {
    /// Nesting depth (0 for the roots)
    pub depth: usize,
    /// Items in order
    pub items: Vec<ListItem>,
}

/// One `<li>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Description shown by this item
    pub id: DescriptionId,
    /// Ids from the root down to this item
    pub path: Vec<DescriptionId>,
    /// Description name
    pub name: String,
    /// Number of immediate children
    pub child_count: usize,
    /// Depth of the enclosing list
    pub depth: usize,
    /// Whether the nested list is attached
    pub expanded: bool,
    /// Children, when expanded
    pub nested: Option<ListElement>,
}

impl ListItem {
    /// Visible text: `name (child-count)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.child_count)
    }
}

enum HtmlStep<'a> {
    Open(&'a ListElement),
    Item(&'a ListItem),
    CloseItem,
    CloseList,
}

impl ListElement {
    /// Total number of items including nested ones.
    pub fn item_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(list) = stack.pop() {
            count += list.items.len();
            stack.extend(list.items.iter().filter_map(|item| item.nested.as_ref()));
        }
        count
    }

    /// Render as nested HTML lists.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![HtmlStep::Open(self)];
        while let Some(step) = stack.pop() {
            match step {
                HtmlStep::Open(list) => {
                    let _ = write!(out, r#"<ul class="list-group" data-depth="{}">"#, list.depth);
                    stack.push(HtmlStep::CloseList);
                    stack.extend(list.items.iter().rev().map(HtmlStep::Item));
                }
                HtmlStep::Item(item) => {
                    let _ = write!(
                        out,
                        r#"<li class="list-group-item" id="{}" data-expanded="{}" data-depth="{}">{}"#,
                        escape_attr(&item.name),
                        item.expanded,
                        item.depth,
                        escape_text(&item.label())
                    );
                    stack.push(HtmlStep::CloseItem);
                    if let Some(nested) = &item.nested {
                        stack.push(HtmlStep::Open(nested));
                    }
                }
                HtmlStep::CloseItem => out.push_str("</li>"),
                HtmlStep::CloseList => out.push_str("</ul>"),
            }
        }
        out
    }

    /// Render as an indented text outline with `+` for expanded items and
    /// `-` for collapsed ones.
    pub fn to_outline(&self) -> String {
        let mut out = String::new();
        let mut stack: Vec<&ListItem> = self.items.iter().rev().collect();
        while let Some(item) = stack.pop() {
            let marker = match (item.expanded, item.child_count) {
                (_, 0) => ' ',
                (true, _) => '+',
                (false, _) => '-',
            };
            let _ = writeln!(out, "{}{} {}", "  ".repeat(item.depth), marker, item.label());
            if let Some(nested) = &item.nested {
                stack.extend(nested.items.iter().rev());
            }
        }
        out
    }
}

impl Drop for ListElement {
    fn drop(&mut self) {
        let mut stack: Vec<ListElement> = self
            .items
            .iter_mut()
            .filter_map(|item| item.nested.take())
            .collect();
        while let Some(mut list) = stack.pop() {
            stack.extend(list.items.iter_mut().filter_map(|item| item.nested.take()));
        }
    }
}
