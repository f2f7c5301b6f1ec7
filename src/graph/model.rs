use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::{
    foundation::core::{Point, Positions},
    foundation::error::{AnimateError, AnimateResult},
    graph::style::{CommunityColors, edge_style_from, parse_community_colors},
};

/// Class marking a node inside its active highlight window.
pub const HIGHLIGHT_CLASS: &str = "highlighted";

/// Community color list; drives pie-chart styling and edge style inheritance.
pub const ATTR_COLORS: &str = "c";
/// Label text.
pub const ATTR_LABEL: &str = "l";
/// Rest size.
pub const ATTR_SIZE: &str = "s";
/// First global frame of the node's frame window.
pub const ATTR_FRAME_START: &str = "fs";
/// Number of frames rendered while the node is the most recently added.
pub const ATTR_FRAME_COUNT: &str = "fc";

#[derive(Clone, Debug)]
/// A graph node plus the style state derived from its attributes.
pub struct Node {
    /// Unique node id.
    pub id: String,
    /// Last position reported by the layout provider.
    pub position: Option<Point>,
    /// Size the node returns to outside its highlight window. 0 hides the node.
    pub rest_size: u32,
    /// Size used for the next rendered frame.
    pub rendered_size: u32,
    /// Parsed community colors and pie shares.
    pub colors: CommunityColors,
    /// Style string derived from the community colors.
    pub style: Option<String>,
    /// Label text. `None` falls back to the node id when labels are enabled.
    pub label: Option<String>,
    /// Visual classes, e.g. [`HIGHLIGHT_CLASS`].
    pub classes: BTreeSet<String>,
    /// Frame window start.
    pub frame_start: Option<u64>,
    /// Frame window length.
    pub frame_count: Option<u32>,
    /// Raw attribute values in first-set order, persisted into the snapshot.
    pub attributes: IndexMap<String, String>,
}

impl Node {
    fn new(id: &str, rest_size: u32) -> Self {
        Self {
            id: id.to_string(),
            position: None,
            rest_size,
            rendered_size: rest_size,
            colors: CommunityColors::default(),
            style: None,
            label: None,
            classes: BTreeSet::new(),
            frame_start: None,
            frame_count: None,
            attributes: IndexMap::new(),
        }
    }

    /// Whether the node is drawn at all.
    pub fn is_hidden(&self) -> bool {
        self.rest_size == 0
    }

    /// Whether the node currently carries the highlight class.
    pub fn is_highlighted(&self) -> bool {
        self.classes.contains(HIGHLIGHT_CLASS)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A graph edge. Immutable once created.
pub struct Edge {
    /// Unique edge id.
    pub id: String,
    /// Source node id.
    pub from: String,
    /// Target node id.
    pub to: String,
    /// Whether the edge is directed.
    pub directed: bool,
    /// Stroke size.
    pub size: u32,
    /// Fill style captured from the source node when the edge was added.
    pub style: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
/// What an attribute change did to its node, for consumers that mirror node state.
pub enum AttributeEffect {
    /// Community colors, shares and style were recomputed.
    Colors,
    /// Label replaced.
    Label,
    /// Rest size replaced.
    Size(u32),
    /// Frame window start replaced.
    FrameStart(u64),
    /// Frame window length replaced.
    FrameCount(u32),
    /// Unrecognized key, only persisted.
    Stored,
}

/// In-memory node/edge store; the single source of truth for topology and style.
#[derive(Clone, Debug)]
pub struct GraphModel {
    nodes: IndexMap<String, Node>,
    edges: IndexMap<String, Edge>,
    node_size: u32,
    edge_size: u32,
}

impl GraphModel {
    /// Empty graph. New nodes start at `node_size`, every edge gets `edge_size`.
    pub fn new(node_size: u32, edge_size: u32) -> Self {
        Self {
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
            node_size,
            edge_size,
        }
    }

    pub fn add_node(&mut self, id: &str) -> AnimateResult<()> {
        if self.nodes.contains_key(id) {
            return Err(AnimateError::event_ordering(format!(
                "node '{id}' added twice"
            )));
        }
        self.nodes
            .insert(id.to_string(), Node::new(id, self.node_size));
        Ok(())
    }

    /// Add an edge; its style is captured from the source node right now and never re-derived.
    pub fn add_edge(&mut self, id: &str, from: &str, to: &str, directed: bool) -> AnimateResult<()> {
        if self.edges.contains_key(id) {
            return Err(AnimateError::event_ordering(format!(
                "edge '{id}' added twice"
            )));
        }
        let source = self.node(from)?;
        self.node(to)?;

        let style = edge_style_from(source.style.as_deref());
        self.edges.insert(
            id.to_string(),
            Edge {
                id: id.to_string(),
                from: from.to_string(),
                to: to.to_string(),
                directed,
                size: self.edge_size,
                style,
            },
        );
        Ok(())
    }

    /// Apply one attribute change to a node. Only that node is touched.
    pub fn set_attribute(
        &mut self,
        node_id: &str,
        key: &str,
        value: &str,
    ) -> AnimateResult<AttributeEffect> {
        let node = self.node_mut(node_id)?;

        let effect = match key {
            ATTR_COLORS => {
                let colors = parse_community_colors(value)?;
                node.style = colors.style();
                node.colors = colors;
                AttributeEffect::Colors
            }
            ATTR_LABEL => {
                node.label = Some(value.to_string());
                AttributeEffect::Label
            }
            ATTR_SIZE => {
                let size = parse_attr::<u32>(node_id, key, value)?;
                node.rest_size = size;
                node.rendered_size = size;
                AttributeEffect::Size(size)
            }
            ATTR_FRAME_START => {
                let start = parse_attr::<u64>(node_id, key, value)?;
                node.frame_start = Some(start);
                AttributeEffect::FrameStart(start)
            }
            ATTR_FRAME_COUNT => {
                let count = parse_attr::<u32>(node_id, key, value)?;
                node.frame_count = Some(count);
                AttributeEffect::FrameCount(count)
            }
            _ => AttributeEffect::Stored,
        };

        node.attributes.insert(key.to_string(), value.to_string());
        Ok(effect)
    }

    pub fn node(&self, id: &str) -> AnimateResult<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| AnimateError::not_found(format!("node '{id}'")))
    }

    pub fn edge(&self, id: &str) -> AnimateResult<&Edge> {
        self.edges
            .get(id)
            .ok_or_else(|| AnimateError::not_found(format!("edge '{id}'")))
    }

    fn node_mut(&mut self, id: &str) -> AnimateResult<&mut Node> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| AnimateError::not_found(format!("node '{id}'")))
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Set the size and highlight class used for the next rendered frame.
    pub fn set_rendered(&mut self, id: &str, size: u32, highlighted: bool) -> AnimateResult<()> {
        let node = self.node_mut(id)?;
        node.rendered_size = size;
        if highlighted {
            node.classes.insert(HIGHLIGHT_CLASS.to_string());
        } else {
            node.classes.remove(HIGHLIGHT_CLASS);
        }
        Ok(())
    }

    /// Mirror layout coordinates onto the nodes they belong to.
    pub fn apply_positions(&mut self, positions: &Positions) {
        for (id, p) in positions {
            if let Some(node) = self.nodes.get_mut(id) {
                node.position = Some(*p);
            }
        }
    }
}

fn parse_attr<T: std::str::FromStr>(node_id: &str, key: &str, value: &str) -> AnimateResult<T> {
    value.trim().parse::<T>().map_err(|_| {
        AnimateError::attribute_parse(format!(
            "node '{node_id}' attribute '{key}': '{value}' is not a non-negative integer"
        ))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/graph/model.rs"]
mod tests;
