//! Projecting the entry list onto a visual list, newest on top.

use crate::models::{Entry, EntryList};

/// Hover hint shown on every rendered entry.
pub const REMOVE_HINT: &str = "Click to remove";

/// One rendered row.
///
/// `label` is the entry text verbatim; surfaces must display it as plain
/// text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemNode {
    pub entry_id: String,
    pub label: String,
    pub hint: &'static str,
}

impl ItemNode {
    pub fn for_entry(entry: &Entry) -> Self {
        Self {
            entry_id: entry.id.clone(),
            label: entry.text.clone(),
            hint: REMOVE_HINT,
        }
    }
}

/// A container of rendered rows, top to bottom.
pub trait ListSurface {
    fn clear(&mut self);
    /// Insert `node` above every existing row.
    fn prepend(&mut self, node: ItemNode);
    /// Detach the row for `entry_id`. Returns whether one was found.
    fn remove(&mut self, entry_id: &str) -> bool;
    fn nodes(&self) -> &[ItemNode];
}

/// In-memory surface.
#[derive(Debug, Default, Clone)]
pub struct ListView {
    nodes: Vec<ItemNode>,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ListSurface for ListView {
    fn clear(&mut self) {
        self.nodes.clear();
    }

    fn prepend(&mut self, node: ItemNode) {
        self.nodes.insert(0, node);
    }

    fn remove(&mut self, entry_id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.entry_id != entry_id);
        self.nodes.len() != before
    }

    fn nodes(&self) -> &[ItemNode] {
        &self.nodes
    }
}

/// Redraw every entry so the surface reads in list order, top to bottom.
pub fn render_all<V: ListSurface + ?Sized>(view: &mut V, entries: &EntryList) {
    view.clear();
    // Each prepend lands on top, so the head of the list must go last.
    for entry in entries.iter().rev() {
        view.prepend(ItemNode::for_entry(entry));
    }
}

/// Put a freshly created entry on top without touching existing rows.
pub fn render_one<V: ListSurface + ?Sized>(view: &mut V, entry: &Entry) {
    view.prepend(ItemNode::for_entry(entry));
}

pub fn remove_one<V: ListSurface + ?Sized>(view: &mut V, entry_id: &str) -> bool {
    view.remove(entry_id)
}

/// Render rows as numbered terminal lines.
///
/// Example output:
/// ```text
/// 1. Buy milk  [9f2c...]
/// 2. Call home  [03ab...]
/// ```
///
/// Control characters in labels are escaped so entry text cannot drive the
/// terminal.
pub fn render_text(nodes: &[ItemNode]) -> String {
    let mut output = String::new();
    for (i, node) in nodes.iter().enumerate() {
        output.push_str(&format!("{}. ", i + 1));
        push_plain(&mut output, &node.label);
        output.push_str("  [");
        push_plain(&mut output, &node.entry_id);
        output.push_str("]\n");
    }
    output
}

/// `text` with control characters escaped, safe to print on a terminal.
pub fn plain_text(text: &str) -> String {
    let mut output = String::new();
    push_plain(&mut output, text);
    output
}

fn push_plain(output: &mut String, text: &str) {
    for c in text.chars() {
        if c.is_control() {
            output.extend(c.escape_default());
        } else {
            output.push(c);
        }
    }
}
