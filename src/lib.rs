//! Streaming graph animation engine.
//!
//! Consumes an ordered stream of graph mutation events and turns it into either a sequence of
//! SVG/PNG frames (one frame bundle per step boundary, with newly added nodes enlarged and
//! decaying back to rest size) or a single Graphviz snapshot with final layout positions.
//!
//! - Build an [`AnimateConfig`] and [`validate`](AnimateConfig::validate) it
//! - Pick a [`FrameSink`] ([`FileFrameSink`] or [`InMemorySink`])
//! - Feed an [`EventSource`] into [`AnimationScheduler::run`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod config;
/// Frame sinks: files, Graphviz snapshot, in-memory records.
pub mod encode;
pub(crate) mod events;
pub(crate) mod fingerprint;
pub(crate) mod graph;
pub(crate) mod layout;
pub(crate) mod live;
/// SVG scene building and rasterization.
pub mod render;
pub(crate) mod schedule;
pub(crate) mod temporal;

pub use crate::foundation::core::{Canvas, FrameIndex, Point, Positions, Rect, Vec2};
pub use crate::foundation::error::{AnimateError, AnimateResult};

pub use crate::config::model::{
    AnimateConfig, FrameFormat, HighlightConfig, HighlightMode, LayoutConfig, LayoutKind,
    OutputConfig, OutputMode, StyleConfig,
};
pub use crate::encode::dot::{DotOptions, write_dot};
pub use crate::encode::files::FileFrameSink;
pub use crate::encode::sink::{FrameRecord, FrameSink, InMemorySink, NodeFrameState, SinkConfig};
pub use crate::events::{EventList, EventSource, GraphEvent, JsonLinesSource};
pub use crate::fingerprint::{FrameFingerprint, fingerprint_frame};
pub use crate::graph::model::{AttributeEffect, Edge, GraphModel, HIGHLIGHT_CLASS, Node};
pub use crate::graph::style::{CommunityColors, edge_style_from, parse_community_colors};
pub use crate::layout::{LayoutParams, LayoutProvider, create_layout};
pub use crate::layout::{linlog::LinLogLayout, springbox::SpringBoxLayout};
pub use crate::live::{LiveDisplay, LiveStats};
pub use crate::schedule::{AnimationScheduler, RunReport, highlight_multiplier};
pub use crate::temporal::state::{FrameWindow, NodeTiming, TemporalVisualState};
