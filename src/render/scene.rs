use crate::{
    config::model::AnimateConfig,
    foundation::core::{Canvas, Point, Positions, Rect},
    foundation::error::{AnimateError, AnimateResult},
    graph::{model::GraphModel, style::fill_colors},
};

/// Frame-independent visual settings.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneStyle {
    pub canvas: Canvas,
    pub background: String,
    /// Halo color for highlighted nodes.
    pub shadow: Option<String>,
    /// Label text size, 0 disables labels.
    pub label_size: u32,
}

impl SceneStyle {
    pub fn from_config(cfg: &AnimateConfig) -> AnimateResult<Self> {
        Ok(Self {
            canvas: cfg.output.canvas()?,
            background: cfg.style.background.trim().to_string(),
            shadow: cfg.highlight.shadow().map(|c| c.trim().to_string()),
            label_size: cfg.style.label_size,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub id: String,
    /// Center in canvas pixels.
    pub center: Point,
    /// Diameter in pixels.
    pub size: u32,
    /// Pie colors; empty draws a plain disc.
    pub colors: Vec<String>,
    pub highlighted: bool,
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneEdge {
    pub from: Point,
    pub to: Point,
    pub size: u32,
    /// Stroke color inherited from the source node.
    pub color: Option<String>,
}

/// Owned, canvas-space description of one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameScene {
    pub style: SceneStyle,
    pub edges: Vec<SceneEdge>,
    pub nodes: Vec<SceneNode>,
}

// Minimum distance kept between the layout bounds and the canvas border, in pixels.
const MIN_MARGIN: f64 = 10.0;

impl FrameScene {
    /// Fit layout coordinates into the canvas (uniform scale, centered, y up) and resolve
    /// per-node visuals. Every node must have a position.
    pub fn build(graph: &GraphModel, positions: &Positions, style: &SceneStyle) -> AnimateResult<Self> {
        let lookup = |id: &str| {
            positions
                .get(id)
                .copied()
                .ok_or_else(|| AnimateError::io(format!("no layout position for node '{id}'")))
        };

        let mut bounds: Option<Rect> = None;
        let mut max_size = 0u32;
        for node in graph.nodes() {
            let p = lookup(&node.id)?;
            bounds = Some(bounds.map_or(Rect::from_points(p, p), |r| r.union_pt(p)));
            max_size = max_size.max(node.rendered_size);
        }

        let fit = Fit::new(bounds, style.canvas, MIN_MARGIN.max(f64::from(max_size)));

        let mut edges = Vec::with_capacity(graph.edge_count());
        for edge in graph.edges() {
            edges.push(SceneEdge {
                from: fit.apply(lookup(&edge.from)?),
                to: fit.apply(lookup(&edge.to)?),
                size: edge.size,
                color: edge
                    .style
                    .as_deref()
                    .and_then(|s| fill_colors(s).first().map(|c| c.to_string())),
            });
        }

        let mut nodes = Vec::with_capacity(graph.node_count());
        for node in graph.nodes() {
            let label = (style.label_size > 0)
                .then(|| node.label.clone().unwrap_or_else(|| node.id.clone()))
                .filter(|l| !l.is_empty());
            nodes.push(SceneNode {
                id: node.id.clone(),
                center: fit.apply(lookup(&node.id)?),
                size: if node.is_hidden() { 0 } else { node.rendered_size },
                colors: node.colors.colors.clone(),
                highlighted: node.is_highlighted(),
                label,
            });
        }

        Ok(Self {
            style: style.clone(),
            edges,
            nodes,
        })
    }
}

/// Uniform layout-to-canvas mapping.
#[derive(Clone, Copy, Debug)]
struct Fit {
    center: Point,
    scale: f64,
    canvas_center: Point,
}

impl Fit {
    fn new(bounds: Option<Rect>, canvas: Canvas, margin: f64) -> Self {
        let area = canvas.rect();
        let canvas_center = area.center();
        let Some(b) = bounds else {
            return Self {
                center: Point::ORIGIN,
                scale: 1.0,
                canvas_center,
            };
        };

        let avail_w = (area.width() - 2.0 * margin).max(1.0);
        let avail_h = (area.height() - 2.0 * margin).max(1.0);
        let scale = match (b.width() > 0.0, b.height() > 0.0) {
            (true, true) => (avail_w / b.width()).min(avail_h / b.height()),
            (true, false) => avail_w / b.width(),
            (false, true) => avail_h / b.height(),
            (false, false) => 1.0,
        };
        Self {
            center: b.center(),
            scale,
            canvas_center,
        }
    }

    fn apply(&self, p: Point) -> Point {
        Point::new(
            self.canvas_center.x + (p.x - self.center.x) * self.scale,
            self.canvas_center.y - (p.y - self.center.y) * self.scale,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
