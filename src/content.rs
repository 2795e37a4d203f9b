//! Display content per node.
//!
//! The layout only knows node indices. Titles and link targets come from a
//! [`ContentProvider`], usually a table handed over by the page.

use serde::{Deserialize, Serialize};

use crate::graph::NodeId;

/// What a node's panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeContent {
    pub title: String,
    #[serde(default)]
    pub link: Option<String>,
}

impl NodeContent {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// Index-to-content lookup.
pub trait ContentProvider {
    /// Content for a node, or None if the provider has nothing for it.
    fn content(&self, id: NodeId) -> Option<NodeContent>;
}

/// Numbered placeholder titles: node 0 is "Node 1".
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberedContent;

impl NumberedContent {
    pub fn numbered(id: NodeId) -> NodeContent {
        NodeContent::new(format!("Node {}", id.raw() + 1))
    }
}

impl ContentProvider for NumberedContent {
    fn content(&self, id: NodeId) -> Option<NodeContent> {
        Some(Self::numbered(id))
    }
}

/// Fixed table of content, one entry per node in index order.
///
/// Nodes past the end of the table fall back to numbered titles.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ContentTable {
    entries: Vec<NodeContent>,
}

impl ContentTable {
    pub fn new(entries: Vec<NodeContent>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ContentProvider for ContentTable {
    fn content(&self, id: NodeId) -> Option<NodeContent> {
        self.entries
            .get(id.index())
            .cloned()
            .or_else(|| Some(NumberedContent::numbered(id)))
    }
}
