use std::path::PathBuf;

use crate::{
    config::model::{AnimateConfig, HighlightMode, OutputMode},
    encode::sink::{FrameSink, SinkConfig},
    events::{EventSource, GraphEvent},
    fingerprint::{FrameFingerprint, fingerprint_frame},
    foundation::core::FrameIndex,
    foundation::error::{AnimateError, AnimateResult},
    graph::model::GraphModel,
    layout::{LayoutProvider, create_layout},
    live::LiveDisplay,
    render::{FrameScene, SceneStyle},
    schedule::highlight::{highlight_multiplier, highlighted_size},
    temporal::state::TemporalVisualState,
};

/// Summary of one completed run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunReport {
    /// Events consumed from the source.
    pub events: u64,
    /// Frames handed to the sink.
    pub frames_emitted: u64,
    /// Step boundaries that produced a frame bundle (frames mode).
    pub steps: u64,
    /// Layout iterations run for event batches (snapshot mode).
    pub batches: u64,
    pub nodes: usize,
    pub edges: usize,
    /// Rolling hash over every emitted frame, or the final state in snapshot mode.
    pub fingerprint: FrameFingerprint,
}

/// Drives one run: consumes events, keeps graph and temporal state current, and decides on
/// every step boundary how many frames to emit and how large each node is drawn.
///
/// The scheduler exclusively owns the layout provider and sink for the duration of a run.
pub struct AnimationScheduler<K: FrameSink> {
    cfg: AnimateConfig,
    graph: GraphModel,
    temporal: TemporalVisualState,
    layout: Box<dyn LayoutProvider>,
    sink: K,
    next_frame: FrameIndex,
    scene_style: SceneStyle,
    report: RunReport,
}

impl<K: FrameSink> AnimationScheduler<K> {
    /// Validate `cfg` and build the configured layout provider.
    pub fn new(cfg: AnimateConfig, sink: K) -> AnimateResult<Self> {
        let layout = create_layout(&cfg.layout)?;
        Self::with_layout(cfg, layout, sink)
    }

    /// Like [`AnimationScheduler::new`] with a caller-supplied layout provider.
    pub fn with_layout(cfg: AnimateConfig, layout: Box<dyn LayoutProvider>, sink: K) -> AnimateResult<Self> {
        cfg.validate()?;
        let scene_style = SceneStyle::from_config(&cfg)?;
        Ok(Self {
            graph: GraphModel::new(cfg.style.node_size, cfg.style.edge_size),
            temporal: TemporalVisualState::new(),
            layout,
            sink,
            next_frame: FrameIndex::default(),
            scene_style,
            report: RunReport::default(),
            cfg,
        })
    }

    /// Consume `source` to its end.
    ///
    /// Errors abort the run immediately; frames already emitted are not rolled back.
    pub fn run(&mut self, source: &mut dyn EventSource) -> AnimateResult<RunReport> {
        self.sink.begin(&SinkConfig {
            canvas: self.scene_style.canvas,
            mode: self.cfg.output.mode,
            label_size: self.cfg.style.label_size,
        })?;

        let mut live = match self.cfg.live_preview.clone() {
            Some(path) => Some(LiveDisplay::spawn(path)?),
            None => None,
        };
        let result = self.drive(source, live.as_mut());
        if let Some(live) = live {
            let stats = live.finish();
            tracing::debug!(shown = stats.shown, dropped = stats.dropped, "live preview closed");
        }
        result?;

        self.sink.end()?;
        self.report.nodes = self.graph.node_count();
        self.report.edges = self.graph.edge_count();
        tracing::info!(
            events = self.report.events,
            frames = self.report.frames_emitted,
            nodes = self.report.nodes,
            edges = self.report.edges,
            fingerprint = %self.report.fingerprint,
            "run finished"
        );
        Ok(self.report.clone())
    }

    fn drive(&mut self, source: &mut dyn EventSource, mut live: Option<&mut LiveDisplay>) -> AnimateResult<()> {
        let mut pending_batch = false;
        while let Some(event) = source.next_event()? {
            self.report.events += 1;
            match event {
                GraphEvent::StepBegins { step } => match self.cfg.output.mode {
                    OutputMode::Frames => self.step_boundary(step, live.as_deref_mut())?,
                    OutputMode::Snapshot => {
                        self.layout_batch()?;
                        pending_batch = false;
                    }
                },
                mutation => {
                    self.apply(mutation)?;
                    pending_batch = true;
                }
            }
        }

        if self.cfg.output.mode == OutputMode::Snapshot {
            if pending_batch {
                self.layout_batch()?;
            }
            self.export_snapshot()?;
        }
        Ok(())
    }

    fn apply(&mut self, event: GraphEvent) -> AnimateResult<()> {
        match event {
            GraphEvent::NodeAdded { id } => {
                self.graph.add_node(&id)?;
                let rest = self.graph.node(&id)?.rest_size;
                self.temporal.node_added(&id, rest);
            }
            GraphEvent::EdgeAdded {
                id,
                from,
                to,
                directed,
            } => self.graph.add_edge(&id, &from, &to, directed)?,
            GraphEvent::AttributeChanged { node, key, value } => {
                let effect = self.graph.set_attribute(&node, &key, &value)?;
                self.temporal.observe(&node, &effect);
            }
            GraphEvent::StepBegins { .. } => {}
        }
        Ok(())
    }

    #[tracing::instrument(skip(self, live), fields(frame = self.next_frame.0))]
    fn step_boundary(&mut self, step: f64, mut live: Option<&mut LiveDisplay>) -> AnimateResult<()> {
        let Some(last) = self.temporal.last_added().map(str::to_string) else {
            tracing::debug!("step boundary before any node was added");
            return Ok(());
        };
        let window = self.temporal.frame_window(&last)?;
        tracing::debug!(node = %last, start = window.start, count = window.count, "frame window");

        for c in 0..window.count {
            if self.cfg.highlight.mode == HighlightMode::HighlightNew {
                self.highlight_pass(&last, window.start, c)?;
            }
            self.layout.step(&self.graph)?;
            self.graph.apply_positions(self.layout.positions());
            self.emit_frame(live.as_deref_mut())?;
        }
        self.report.steps += 1;
        Ok(())
    }

    /// Resize and mark the most recently added nodes for frame `c` of `last`'s window.
    fn highlight_pass(&mut self, last: &str, last_start: u64, c: u32) -> AnimateResult<()> {
        let h = &self.cfg.highlight;
        let (count, min, max) = (h.frame_count, h.size_min, h.size_max);
        let recent = self
            .temporal
            .recent_nodes(count as usize)
            .map(str::to_string)
            .collect::<Vec<_>>();

        for id in recent {
            let Some(timing) = self.temporal.timing(&id).copied() else {
                continue;
            };
            if timing.rest_size == 0 {
                continue;
            }
            let Some(start) = timing.frame_start else {
                continue;
            };
            let base = last_start.checked_sub(start).ok_or_else(|| {
                AnimateError::event_ordering(format!(
                    "frame start of '{id}' ({start}) is after frame start of '{last}' ({last_start})"
                ))
            })?;

            match highlight_multiplier(base.saturating_add(u64::from(c)), count, min, max) {
                Some(m) => self
                    .graph
                    .set_rendered(&id, highlighted_size(timing.rest_size, m), true)?,
                None => self.graph.set_rendered(&id, timing.rest_size, false)?,
            }
        }
        Ok(())
    }

    fn emit_frame(&mut self, live: Option<&mut LiveDisplay>) -> AnimateResult<()> {
        let idx = self.next_frame;
        let positions = self.layout.positions();
        self.sink.emit(&self.graph, positions, idx)?;
        self.report.fingerprint = self
            .report
            .fingerprint
            .combine(fingerprint_frame(&self.graph, positions, idx));
        self.report.frames_emitted += 1;

        if let Some(live) = live {
            match FrameScene::build(&self.graph, positions, &self.scene_style) {
                Ok(scene) => live.publish(scene),
                Err(e) => tracing::warn!(error = %e, "live preview scene skipped"),
            }
        }
        self.next_frame = idx.next();
        Ok(())
    }

    fn layout_batch(&mut self) -> AnimateResult<()> {
        self.layout.step(&self.graph)?;
        self.graph.apply_positions(self.layout.positions());
        self.report.batches += 1;
        Ok(())
    }

    fn export_snapshot(&mut self) -> AnimateResult<()> {
        let path: PathBuf = self.cfg.output.snapshot_path.clone().ok_or_else(|| {
            AnimateError::configuration("output.snapshot_path is required in snapshot mode")
        })?;
        let positions = self.layout.positions();
        self.sink.export_snapshot(&self.graph, positions, &path)?;
        self.report.fingerprint = fingerprint_frame(&self.graph, positions, FrameIndex::default());
        Ok(())
    }

    pub fn graph(&self) -> &GraphModel {
        &self.graph
    }

    pub fn temporal(&self) -> &TemporalVisualState {
        &self.temporal
    }

    pub fn layout(&self) -> &dyn LayoutProvider {
        self.layout.as_ref()
    }

    /// Index the next emitted frame will get.
    pub fn frame_index(&self) -> FrameIndex {
        self.next_frame
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;
