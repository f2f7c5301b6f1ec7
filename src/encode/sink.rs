use std::{collections::BTreeSet, path::Path, path::PathBuf};

use crate::{
    config::model::OutputMode,
    encode::dot::{DotOptions, write_dot},
    foundation::core::{Canvas, FrameIndex, Point, Positions},
    foundation::error::{AnimateError, AnimateResult},
    graph::model::GraphModel,
};

/// Configuration provided to a [`FrameSink`] before the first event is processed.
#[derive(Clone, Debug, PartialEq)]
pub struct SinkConfig {
    pub canvas: Canvas,
    pub mode: OutputMode,
    /// Label text size, 0 when labels are disabled.
    pub label_size: u32,
}

/// Sink contract for consuming graph state.
///
/// Ordering contract: `emit` is called with strictly increasing [`FrameIndex`] values, and
/// `export_snapshot` at most once, after the last batch.
pub trait FrameSink {
    /// Called once before any frame is emitted.
    fn begin(&mut self, cfg: &SinkConfig) -> AnimateResult<()>;
    /// Record the current graph state as frame `idx`.
    fn emit(&mut self, graph: &GraphModel, positions: &Positions, idx: FrameIndex) -> AnimateResult<()>;
    /// Write the final structured snapshot.
    fn export_snapshot(
        &mut self,
        graph: &GraphModel,
        positions: &Positions,
        path: &Path,
    ) -> AnimateResult<()>;
    /// Called once after the stream ends.
    fn end(&mut self) -> AnimateResult<()>;
}

/// Visual state of one node as it was emitted.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeFrameState {
    pub id: String,
    pub position: Option<Point>,
    pub size: u32,
    pub style: Option<String>,
    pub classes: BTreeSet<String>,
}

/// One emitted frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRecord {
    pub index: FrameIndex,
    pub nodes: Vec<NodeFrameState>,
}

impl FrameRecord {
    pub fn node(&self, id: &str) -> Option<&NodeFrameState> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<FrameRecord>,
    snapshot: Option<(PathBuf, String)>,
    graph_name: String,
    scale: f64,
    ended: bool,
}

impl Default for InMemorySink {
    fn default() -> Self {
        Self {
            cfg: None,
            frames: Vec::new(),
            snapshot: None,
            graph_name: "graph".to_string(),
            scale: 100.0,
            ended: false,
        }
    }
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph name and coordinate scale used for the captured snapshot text.
    pub fn with_snapshot_format(mut self, graph_name: impl Into<String>, scale: f64) -> Self {
        self.graph_name = graph_name.into();
        self.scale = scale;
        self
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames in emission order.
    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    /// Destination and DOT text of the captured snapshot.
    pub fn snapshot(&self) -> Option<(&Path, &str)> {
        self.snapshot
            .as_ref()
            .map(|(p, text)| (p.as_path(), text.as_str()))
    }

    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: &SinkConfig) -> AnimateResult<()> {
        self.cfg = Some(cfg.clone());
        self.frames.clear();
        self.snapshot = None;
        self.ended = false;
        Ok(())
    }

    fn emit(&mut self, graph: &GraphModel, positions: &Positions, idx: FrameIndex) -> AnimateResult<()> {
        if let Some(last) = self.frames.last()
            && idx <= last.index
        {
            return Err(AnimateError::event_ordering(format!(
                "frame {} emitted after frame {}",
                idx.0, last.index.0
            )));
        }
        let nodes = graph
            .nodes()
            .map(|n| NodeFrameState {
                id: n.id.clone(),
                position: positions.get(&n.id).copied(),
                size: n.rendered_size,
                style: n.style.clone(),
                classes: n.classes.clone(),
            })
            .collect();
        self.frames.push(FrameRecord { index: idx, nodes });
        Ok(())
    }

    fn export_snapshot(
        &mut self,
        graph: &GraphModel,
        positions: &Positions,
        path: &Path,
    ) -> AnimateResult<()> {
        let opts = DotOptions {
            graph_name: &self.graph_name,
            scale: self.scale,
            labels: self.cfg.as_ref().is_some_and(|c| c.label_size > 0),
        };
        let text = write_dot(graph, positions, &opts)?;
        self.snapshot = Some((path.to_path_buf(), text));
        Ok(())
    }

    fn end(&mut self) -> AnimateResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
