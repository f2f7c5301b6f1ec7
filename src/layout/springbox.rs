use crate::{
    config::model::LayoutKind,
    foundation::core::{Positions, Vec2},
    foundation::error::{AnimateError, AnimateResult},
    graph::model::GraphModel,
    layout::{
        provider::{Bodies, LayoutParams, LayoutProvider},
        quadtree::QuadTree,
    },
};

const SPRING: f64 = 0.06;
const REPULSION: f64 = 0.024;
const REST_LENGTH: f64 = 1.0;
const MAX_MOVE: f64 = 0.5;
const MIN_DISTANCE: f64 = 1e-6;

/// Spring-electrical layout: Hooke springs toward unit length along edges plus
/// inverse-square repulsion between all nodes. `quality == 1` computes every pair exactly;
/// lower quality opens the Barnes–Hut angle to `1 - quality`.
#[derive(Clone, Debug)]
pub struct SpringBoxLayout {
    bodies: Bodies,
    quality: f64,
}

impl SpringBoxLayout {
    pub fn new(seed: u64) -> Self {
        Self {
            bodies: Bodies::new(seed),
            quality: 1.0,
        }
    }

    fn theta(&self) -> f64 {
        1.0 - self.quality
    }
}

impl LayoutProvider for SpringBoxLayout {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Springbox
    }

    fn configure(&mut self, params: &LayoutParams) -> AnimateResult<()> {
        let LayoutParams::SpringBox { quality } = *params else {
            return Err(AnimateError::configuration(
                "springbox layout expects a quality parameter",
            ));
        };
        if !(0.0..=1.0).contains(&quality) {
            return Err(AnimateError::configuration(
                "layout.quality must be within [0, 1]",
            ));
        }
        self.quality = quality;
        Ok(())
    }

    fn step(&mut self, graph: &GraphModel) -> AnimateResult<()> {
        self.bodies.sync(graph);
        let points = self.bodies.points();
        if points.is_empty() {
            return Ok(());
        }

        let theta = self.theta();
        let tree = QuadTree::build(&points);
        let mut disp = vec![Vec2::ZERO; points.len()];
        for (i, acc) in disp.iter_mut().enumerate() {
            tree.for_each_source(i, theta, |delta, mass| {
                let d = delta.hypot().max(MIN_DISTANCE);
                *acc += delta / d * (REPULSION * mass / (d * d));
            });
        }

        for (u, v) in self.bodies.edge_pairs(graph) {
            let delta = points[v] - points[u];
            let d = delta.hypot();
            if d > MIN_DISTANCE {
                let pull = delta / d * (SPRING * (d - REST_LENGTH));
                disp[u] += pull;
                disp[v] -= pull;
            }
        }

        self.bodies.apply(&disp, 1.0, MAX_MOVE)
    }

    fn positions(&self) -> &Positions {
        &self.bodies.positions
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/springbox.rs"]
mod tests;
