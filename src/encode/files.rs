use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    config::model::{AnimateConfig, FrameFormat, OutputConfig, OutputMode},
    encode::{
        dot::{DotOptions, write_dot},
        sink::{FrameSink, SinkConfig},
    },
    foundation::core::{FrameIndex, Positions},
    foundation::error::{AnimateError, AnimateResult},
    graph::model::GraphModel,
    render::{FrameScene, SceneStyle, SvgRasterizer, scene_to_svg, write_png},
};

/// Writes `<dir>/<prefix><index>.<ext>` for every emitted frame and configured format,
/// and the Graphviz snapshot on request.
pub struct FileFrameSink {
    output: OutputConfig,
    style: SceneStyle,
    rasterizer: Option<SvgRasterizer>,
    frames_written: u64,
    pad_exceeded: bool,
}

impl FileFrameSink {
    pub fn new(cfg: &AnimateConfig) -> AnimateResult<Self> {
        let rasterizer = (cfg.output.mode == OutputMode::Frames
            && cfg.output.formats.contains(&FrameFormat::Png))
        .then(SvgRasterizer::new);
        Ok(Self {
            output: cfg.output.clone(),
            style: SceneStyle::from_config(cfg)?,
            rasterizer,
            frames_written: 0,
            pad_exceeded: false,
        })
    }

    /// Path of frame `idx` in `format`.
    pub fn frame_path(&self, idx: FrameIndex, format: FrameFormat) -> PathBuf {
        self.output.dir.join(format!(
            "{}{}.{}",
            self.output.prefix,
            idx.padded(self.output.index_digits),
            format.extension()
        ))
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Whether a frame index outgrew the configured pad width during this run.
    pub fn pad_exceeded(&self) -> bool {
        self.pad_exceeded
    }
}

impl FrameSink for FileFrameSink {
    fn begin(&mut self, cfg: &SinkConfig) -> AnimateResult<()> {
        if cfg.mode == OutputMode::Frames && !self.output.dir.is_dir() {
            return Err(AnimateError::io(format!(
                "output directory '{}' does not exist or is not a directory",
                self.output.dir.display()
            )));
        }
        self.style.canvas = cfg.canvas;
        self.frames_written = 0;
        self.pad_exceeded = false;
        Ok(())
    }

    #[tracing::instrument(skip(self, graph, positions), fields(frame = idx.0))]
    fn emit(&mut self, graph: &GraphModel, positions: &Positions, idx: FrameIndex) -> AnimateResult<()> {
        if !self.pad_exceeded && !idx.fits(self.output.index_digits) {
            self.pad_exceeded = true;
            tracing::warn!(
                frame = idx.0,
                digits = self.output.index_digits,
                "frame index exceeds the zero-pad width; file names no longer sort"
            );
        }
        let scene = FrameScene::build(graph, positions, &self.style)?;
        let svg = scene_to_svg(&scene);

        for &format in &self.output.formats {
            let path = self.frame_path(idx, format);
            match format {
                FrameFormat::Svg => {
                    std::fs::write(&path, svg.as_bytes())
                        .with_context(|| format!("write svg '{}'", path.display()))?;
                }
                FrameFormat::Png => {
                    let rasterizer = self.rasterizer.get_or_insert_with(SvgRasterizer::new);
                    let rgba = rasterizer.rasterize(&svg, self.style.canvas)?;
                    write_png(&path, &rgba, self.style.canvas)?;
                }
            }
            tracing::trace!(path = %path.display(), "frame written");
        }
        self.frames_written += 1;
        Ok(())
    }

    fn export_snapshot(
        &mut self,
        graph: &GraphModel,
        positions: &Positions,
        path: &Path,
    ) -> AnimateResult<()> {
        let opts = DotOptions {
            graph_name: &self.output.graph_name,
            scale: self.output.snapshot_scale,
            labels: self.style.label_size > 0,
        };
        let text = write_dot(graph, positions, &opts)?;
        std::fs::write(path, text).with_context(|| format!("write snapshot '{}'", path.display()))?;
        tracing::info!(path = %path.display(), nodes = graph.node_count(), "snapshot written");
        Ok(())
    }

    fn end(&mut self) -> AnimateResult<()> {
        tracing::debug!(frames = self.frames_written, "file sink finished");
        Ok(())
    }
}
