use crate::{
    config::model::{LayoutConfig, LayoutKind},
    foundation::core::{Point, Positions, Vec2},
    foundation::error::{AnimateError, AnimateResult},
    foundation::math::Rng64,
    graph::model::GraphModel,
    layout::{linlog::LinLogLayout, springbox::SpringBoxLayout},
};

/// Iterative force-directed layout over the current graph topology.
///
/// Implementations own their coordinates; callers copy them out through [`positions`]
/// after each [`step`].
///
/// [`positions`]: LayoutProvider::positions
/// [`step`]: LayoutProvider::step
pub trait LayoutProvider {
    /// Strategy implemented by this provider.
    fn kind(&self) -> LayoutKind;

    /// Replace tuning parameters. Fails when `params` belong to the other strategy.
    fn configure(&mut self, params: &LayoutParams) -> AnimateResult<()>;

    /// Advance one iteration. Nodes unseen so far are placed first.
    fn step(&mut self, graph: &GraphModel) -> AnimateResult<()>;

    /// Coordinates of every placed node, in node insertion order.
    fn positions(&self) -> &Positions;
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Strategy-specific tuning parameters.
pub enum LayoutParams {
    /// Energy-minimizing model.
    LinLog {
        force: f64,
        attraction: f64,
        repulsion: f64,
        theta: f64,
    },
    /// Spring-electrical model.
    SpringBox { quality: f64 },
}

impl LayoutParams {
    /// Parameters relevant to the configured strategy.
    pub fn from_config(cfg: &LayoutConfig) -> Self {
        match cfg.kind {
            LayoutKind::Linlog => Self::LinLog {
                force: cfg.force,
                attraction: cfg.attraction,
                repulsion: cfg.repulsion,
                theta: cfg.theta,
            },
            LayoutKind::Springbox => Self::SpringBox {
                quality: cfg.quality,
            },
        }
    }
}

/// Build and configure the provider selected by `cfg.kind`.
pub fn create_layout(cfg: &LayoutConfig) -> AnimateResult<Box<dyn LayoutProvider>> {
    let mut layout: Box<dyn LayoutProvider> = match cfg.kind {
        LayoutKind::Linlog => Box::new(LinLogLayout::new(cfg.seed)),
        LayoutKind::Springbox => Box::new(SpringBoxLayout::new(cfg.seed)),
    };
    layout.configure(&LayoutParams::from_config(cfg))?;
    tracing::debug!(kind = ?cfg.kind, seed = cfg.seed, "layout provider created");
    Ok(layout)
}

// Half-width of the square that unconnected new nodes are dropped into.
const SPREAD: f64 = 1.0;
// Half-width of the jitter around the neighbor centroid.
const JITTER: f64 = 0.1;

/// Node coordinates shared by both providers: seeded placement and capped moves.
#[derive(Clone, Debug)]
pub(crate) struct Bodies {
    pub(crate) positions: Positions,
    rng: Rng64,
}

impl Bodies {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            positions: Positions::new(),
            rng: Rng64::new(seed),
        }
    }

    /// Place nodes not seen yet, in insertion order. A node with already placed neighbors
    /// starts near their centroid, others start at a random point around the origin.
    pub(crate) fn sync(&mut self, graph: &GraphModel) {
        let fresh = graph
            .nodes()
            .filter(|n| !self.positions.contains_key(&n.id))
            .map(|n| n.id.clone())
            .collect::<Vec<_>>();

        for id in fresh {
            let (sum, count) = graph
                .edges()
                .filter_map(|e| {
                    if e.from == id {
                        Some(e.to.as_str())
                    } else if e.to == id {
                        Some(e.from.as_str())
                    } else {
                        None
                    }
                })
                .filter_map(|nb| self.positions.get(nb))
                .fold((Vec2::ZERO, 0usize), |(s, c), p| (s + p.to_vec2(), c + 1));

            let jx = self.rng.next_centered(JITTER);
            let jy = self.rng.next_centered(JITTER);
            let p = if count > 0 {
                (sum / count as f64).to_point() + Vec2::new(jx, jy)
            } else {
                Point::new(
                    self.rng.next_centered(SPREAD),
                    self.rng.next_centered(SPREAD),
                )
            };
            self.positions.insert(id, p);
        }
    }

    pub(crate) fn points(&self) -> Vec<Point> {
        self.positions.values().copied().collect()
    }

    /// Index pairs of every non-loop edge whose endpoints are placed.
    pub(crate) fn edge_pairs(&self, graph: &GraphModel) -> Vec<(usize, usize)> {
        graph
            .edges()
            .filter_map(|e| {
                let u = self.positions.get_index_of(&e.from)?;
                let v = self.positions.get_index_of(&e.to)?;
                (u != v).then_some((u, v))
            })
            .collect()
    }

    /// Move every body by `disp[i] * scale`, clamped to `max_move`.
    pub(crate) fn apply(&mut self, disp: &[Vec2], scale: f64, max_move: f64) -> AnimateResult<()> {
        for ((id, p), d) in self.positions.iter_mut().zip(disp) {
            let mut delta = *d * scale;
            let len = delta.hypot();
            if len > max_move {
                delta *= max_move / len;
            }
            let next = *p + delta;
            if !next.is_finite() {
                return Err(AnimateError::io(format!(
                    "layout produced a non-finite position for node '{id}'"
                )));
            }
            *p = next;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/provider.rs"]
mod tests;
