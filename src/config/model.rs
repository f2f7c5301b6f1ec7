use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::core::Canvas,
    foundation::error::{AnimateError, AnimateResult},
    graph::style::is_color_token,
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Complete engine configuration for one run.
pub struct AnimateConfig {
    /// Layout provider selection and parameters.
    pub layout: LayoutConfig,
    /// Highlight-decay behavior for newly added nodes.
    pub highlight: HighlightConfig,
    /// Base visual sizes.
    pub style: StyleConfig,
    /// Output mode and artifact naming.
    pub output: OutputConfig,
    /// Optional live preview file, refreshed from a separate consumer thread.
    pub live_preview: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Force-directed layout strategy.
pub enum LayoutKind {
    /// Spring-electrical model, parameterized only by a quality level.
    #[default]
    Springbox,
    /// Energy-minimizing (LinLog-style) model with Barnes–Hut aggregation.
    Linlog,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Layout provider parameters. Energy-minimizing fields are ignored by the spring model.
pub struct LayoutConfig {
    /// Which provider to build.
    pub kind: LayoutKind,
    /// Seed for deterministic initial placement.
    pub seed: u64,
    /// Global force multiplier (energy-minimizing only).
    pub force: f64,
    /// Attraction exponent `a` (energy-minimizing only).
    pub attraction: f64,
    /// Repulsion exponent `r` (energy-minimizing only).
    pub repulsion: f64,
    /// Barnes–Hut opening angle (energy-minimizing only, 0 = exact).
    pub theta: f64,
    /// Quality level in `[0, 1]` (spring-electrical only, 1 = exact).
    pub quality: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            kind: LayoutKind::Springbox,
            seed: 0,
            force: 3.0,
            attraction: 0.0,
            repulsion: -1.2,
            theta: 0.7,
            quality: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Whether new nodes are emphasized while their frame window plays.
pub enum HighlightMode {
    /// Nodes always render at their rest size.
    #[default]
    FixedSize,
    /// Recently added nodes are enlarged and marked, decaying back to rest size.
    HighlightNew,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Highlight-decay parameters.
pub struct HighlightConfig {
    /// Highlight mode.
    pub mode: HighlightMode,
    /// Number of recently added nodes considered, and the decay window length in frames.
    pub frame_count: u32,
    /// Size multiplier reached at the end of the window.
    pub size_min: f64,
    /// Size multiplier at frame offset 0.
    pub size_max: f64,
    /// Halo color for highlighted nodes. `None` or empty disables the halo.
    pub shadow_color: Option<String>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            mode: HighlightMode::FixedSize,
            frame_count: 4,
            size_min: 1.0,
            size_max: 3.0,
            shadow_color: None,
        }
    }
}

impl HighlightConfig {
    /// Shadow color if the halo visual is enabled.
    pub fn shadow(&self) -> Option<&str> {
        self.shadow_color.as_deref().filter(|c| !c.trim().is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Base visual sizes applied when nodes and edges are created.
pub struct StyleConfig {
    /// Rest size given to a node until its `s` attribute arrives.
    pub node_size: u32,
    /// Size of every edge.
    pub edge_size: u32,
    /// Label text size in pixels, 0 disables labels.
    pub label_size: u32,
    /// Frame background color.
    pub background: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            node_size: 10,
            edge_size: 2,
            label_size: 0,
            background: "white".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// What the run produces.
pub enum OutputMode {
    /// One artifact per emitted frame per format.
    #[default]
    Frames,
    /// A single structured snapshot written when the stream ends.
    Snapshot,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
/// Frame artifact encoding.
pub enum FrameFormat {
    /// Vector frame.
    Svg,
    /// Raster frame.
    Png,
}

impl FrameFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Output location, naming and mode.
pub struct OutputConfig {
    /// Frames or snapshot.
    pub mode: OutputMode,
    /// Directory receiving frame artifacts. Must already exist.
    pub dir: PathBuf,
    /// File name prefix placed before the zero-padded frame index.
    pub prefix: String,
    /// Zero-pad width of the frame index. Indices past `10^index_digits - 1` get wider names
    /// and stop sorting lexicographically; the file sink warns once when that happens.
    pub index_digits: usize,
    /// Encodings written for every frame.
    pub formats: Vec<FrameFormat>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Snapshot destination (required in snapshot mode).
    pub snapshot_path: Option<PathBuf>,
    /// Multiplier applied to layout coordinates in the snapshot.
    pub snapshot_scale: f64,
    /// Graph name written into the snapshot.
    pub graph_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::Frames,
            dir: PathBuf::from("."),
            prefix: "frame_".to_string(),
            index_digits: 6,
            formats: vec![FrameFormat::Svg, FrameFormat::Png],
            width: 1280,
            height: 720,
            snapshot_path: None,
            snapshot_scale: 100.0,
            graph_name: "graph".to_string(),
        }
    }
}

impl OutputConfig {
    /// Output canvas derived from width/height.
    pub fn canvas(&self) -> AnimateResult<Canvas> {
        Canvas::new(self.width, self.height)
    }
}

impl AnimateConfig {
    /// Load a (possibly partial) JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> AnimateResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json(&text)
    }

    /// Parse a (possibly partial) JSON configuration document.
    pub fn from_json(text: &str) -> AnimateResult<Self> {
        serde_json::from_str(text).map_err(|e| AnimateError::serde(format!("config: {e}")))
    }

    /// Check every option; the run must not start when this fails.
    pub fn validate(&self) -> AnimateResult<()> {
        let l = &self.layout;
        for (name, value) in [
            ("force", l.force),
            ("attraction", l.attraction),
            ("repulsion", l.repulsion),
            ("theta", l.theta),
            ("quality", l.quality),
        ] {
            if !value.is_finite() {
                return Err(AnimateError::configuration(format!(
                    "layout.{name} must be finite"
                )));
            }
        }
        if l.theta < 0.0 {
            return Err(AnimateError::configuration("layout.theta must be >= 0"));
        }
        if !(0.0..=1.0).contains(&l.quality) {
            return Err(AnimateError::configuration(
                "layout.quality must be within [0, 1]",
            ));
        }

        let h = &self.highlight;
        if h.mode == HighlightMode::HighlightNew && h.frame_count == 0 {
            return Err(AnimateError::configuration(
                "highlight.frame_count must be > 0 in highlight-new mode",
            ));
        }
        for (name, value) in [("size_min", h.size_min), ("size_max", h.size_max)] {
            if !value.is_finite() || value < 0.0 {
                return Err(AnimateError::configuration(format!(
                    "highlight.{name} must be finite and >= 0"
                )));
            }
        }
        if let Some(color) = h.shadow()
            && !is_color_token(color.trim())
        {
            return Err(AnimateError::configuration(format!(
                "highlight.shadow_color '{color}' is not a color name or #hex value"
            )));
        }

        if !is_color_token(self.style.background.trim()) {
            return Err(AnimateError::configuration(format!(
                "style.background '{}' is not a color name or #hex value",
                self.style.background
            )));
        }

        let o = &self.output;
        o.canvas()?;
        match o.mode {
            OutputMode::Frames => {
                if o.formats.is_empty() {
                    return Err(AnimateError::configuration(
                        "output.formats must name at least one format in frames mode",
                    ));
                }
                if !(1..=12).contains(&o.index_digits) {
                    return Err(AnimateError::configuration(
                        "output.index_digits must be within [1, 12]",
                    ));
                }
            }
            OutputMode::Snapshot => {
                if o.snapshot_path.is_none() {
                    return Err(AnimateError::configuration(
                        "output.snapshot_path is required in snapshot mode",
                    ));
                }
                if !o.snapshot_scale.is_finite() || o.snapshot_scale <= 0.0 {
                    return Err(AnimateError::configuration(
                        "output.snapshot_scale must be finite and > 0",
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
