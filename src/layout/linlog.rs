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

const STEP: f64 = 0.01;
const MAX_MOVE: f64 = 0.5;
const MIN_DISTANCE: f64 = 1e-6;

/// Energy-minimizing layout: edges attract with `d^a`, every pair repels with `d^r`,
/// both scaled by `force`. Far node groups are aggregated with a Barnes–Hut quadtree.
#[derive(Clone, Debug)]
pub struct LinLogLayout {
    bodies: Bodies,
    force: f64,
    attraction: f64,
    repulsion: f64,
    theta: f64,
}

impl LinLogLayout {
    pub fn new(seed: u64) -> Self {
        Self {
            bodies: Bodies::new(seed),
            force: 3.0,
            attraction: 0.0,
            repulsion: -1.2,
            theta: 0.7,
        }
    }
}

impl LayoutProvider for LinLogLayout {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Linlog
    }

    fn configure(&mut self, params: &LayoutParams) -> AnimateResult<()> {
        let LayoutParams::LinLog {
            force,
            attraction,
            repulsion,
            theta,
        } = *params
        else {
            return Err(AnimateError::configuration(
                "linlog layout expects energy-minimizing parameters",
            ));
        };
        if theta < 0.0 {
            return Err(AnimateError::configuration("layout.theta must be >= 0"));
        }
        self.force = force;
        self.attraction = attraction;
        self.repulsion = repulsion;
        self.theta = theta;
        Ok(())
    }

    fn step(&mut self, graph: &GraphModel) -> AnimateResult<()> {
        self.bodies.sync(graph);
        let points = self.bodies.points();
        if points.is_empty() {
            return Ok(());
        }

        let tree = QuadTree::build(&points);
        let mut disp = vec![Vec2::ZERO; points.len()];
        for (i, acc) in disp.iter_mut().enumerate() {
            tree.for_each_source(i, self.theta, |delta, mass| {
                let d = delta.hypot();
                if d > MIN_DISTANCE {
                    *acc += delta / d * (mass * d.powf(self.repulsion));
                }
            });
        }

        for (u, v) in self.bodies.edge_pairs(graph) {
            let delta = points[v] - points[u];
            let d = delta.hypot();
            if d > MIN_DISTANCE {
                let pull = delta / d * d.powf(self.attraction);
                disp[u] += pull;
                disp[v] -= pull;
            }
        }

        self.bodies.apply(&disp, self.force * STEP, MAX_MOVE)
    }

    fn positions(&self) -> &Positions {
        &self.bodies.positions
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/linlog.rs"]
mod tests;
