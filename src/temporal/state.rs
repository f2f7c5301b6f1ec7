use std::collections::HashMap;

use crate::{
    foundation::error::{AnimateError, AnimateResult},
    graph::model::AttributeEffect,
};

/// Timing and rest size mirrored from a node's attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeTiming {
    pub rest_size: u32,
    pub frame_start: Option<u64>,
    pub frame_count: Option<u32>,
}

/// Resolved frame window of one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameWindow {
    pub start: u64,
    pub count: u32,
}

/// Derived per-node state plus the node insertion history.
///
/// The history is never trimmed; only its tail is consulted when computing highlight windows.
#[derive(Clone, Debug, Default)]
pub struct TemporalVisualState {
    timings: HashMap<String, NodeTiming>,
    order: Vec<String>,
}

impl TemporalVisualState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a node-added event.
    pub fn node_added(&mut self, id: &str, rest_size: u32) {
        self.order.push(id.to_string());
        self.timings.insert(
            id.to_string(),
            NodeTiming {
                rest_size,
                ..NodeTiming::default()
            },
        );
    }

    /// Mirror an attribute change applied to the graph.
    pub fn observe(&mut self, id: &str, effect: &AttributeEffect) {
        let Some(t) = self.timings.get_mut(id) else {
            return;
        };
        match *effect {
            AttributeEffect::Size(s) => t.rest_size = s,
            AttributeEffect::FrameStart(fs) => t.frame_start = Some(fs),
            AttributeEffect::FrameCount(fc) => t.frame_count = Some(fc),
            AttributeEffect::Colors | AttributeEffect::Label | AttributeEffect::Stored => {}
        }
    }

    pub fn timing(&self, id: &str) -> Option<&NodeTiming> {
        self.timings.get(id)
    }

    /// Most recently added node.
    pub fn last_added(&self) -> Option<&str> {
        self.order.last().map(String::as_str)
    }

    /// The last `n` added nodes, most recent first. Fewer near the start of a run.
    pub fn recent_nodes(&self, n: usize) -> impl Iterator<Item = &str> {
        self.order.iter().rev().take(n).map(String::as_str)
    }

    pub fn added_count(&self) -> usize {
        self.order.len()
    }

    /// Frame window of `id`; both `fs` and `fc` must have arrived.
    pub fn frame_window(&self, id: &str) -> AnimateResult<FrameWindow> {
        let t = self.timings.get(id).ok_or_else(|| {
            AnimateError::event_ordering(format!("node '{id}' has no timing state"))
        })?;
        match (t.frame_start, t.frame_count) {
            (Some(start), Some(count)) => Ok(FrameWindow { start, count }),
            (start, count) => {
                let mut missing = Vec::new();
                if start.is_none() {
                    missing.push("fs");
                }
                if count.is_none() {
                    missing.push("fc");
                }
                Err(AnimateError::event_ordering(format!(
                    "step boundary reached before node '{id}' received {}",
                    missing.join("/")
                )))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/temporal/state.rs"]
mod tests;
