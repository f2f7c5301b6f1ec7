use crate::foundation::core::{Point, Rect, Vec2};

// Coincident points stop subdividing here and share one leaf.
const MAX_DEPTH: usize = 24;

#[derive(Clone, Debug)]
struct Cell {
    bounds: Rect,
    mass: f64,
    sum: Vec2,
    bodies: Vec<usize>,
    children: Option<[usize; 4]>,
}

impl Cell {
    fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            mass: 0.0,
            sum: Vec2::ZERO,
            bodies: Vec::new(),
            children: None,
        }
    }
}

/// Barnes–Hut quadtree over unit-mass bodies.
#[derive(Clone, Debug)]
pub(crate) struct QuadTree {
    cells: Vec<Cell>,
    points: Vec<Point>,
}

impl QuadTree {
    pub(crate) fn build(points: &[Point]) -> Self {
        let mut tree = Self {
            cells: vec![Cell::new(square_bounds(points))],
            points: points.to_vec(),
        };
        for i in 0..points.len() {
            tree.insert(i);
        }
        tree
    }

    fn insert(&mut self, i: usize) {
        let p = self.points[i];
        let mut cell = 0usize;
        let mut depth = 0usize;
        loop {
            self.cells[cell].mass += 1.0;
            self.cells[cell].sum += p.to_vec2();

            if let Some(children) = self.cells[cell].children {
                cell = children[quadrant(self.cells[cell].bounds, p)];
                depth += 1;
                continue;
            }
            if self.cells[cell].bodies.is_empty() || depth >= MAX_DEPTH {
                self.cells[cell].bodies.push(i);
                return;
            }

            let children = self.subdivide(cell);
            let bounds = self.cells[cell].bounds;
            for j in std::mem::take(&mut self.cells[cell].bodies) {
                let q = self.points[j];
                let child = &mut self.cells[children[quadrant(bounds, q)]];
                child.mass += 1.0;
                child.sum += q.to_vec2();
                child.bodies.push(j);
            }
            cell = children[quadrant(bounds, p)];
            depth += 1;
        }
    }

    fn subdivide(&mut self, cell: usize) -> [usize; 4] {
        let b = self.cells[cell].bounds;
        let c = b.center();
        let rects = [
            Rect::new(b.x0, b.y0, c.x, c.y),
            Rect::new(c.x, b.y0, b.x1, c.y),
            Rect::new(b.x0, c.y, c.x, b.y1),
            Rect::new(c.x, c.y, b.x1, b.y1),
        ];
        let base = self.cells.len();
        self.cells.extend(rects.into_iter().map(Cell::new));
        let children = [base, base + 1, base + 2, base + 3];
        self.cells[cell].children = Some(children);
        children
    }

    /// Visit every body (or aggregated far cell) acting on body `i`.
    ///
    /// `f` receives the vector from the source to body `i` and the source mass. A cell is
    /// aggregated when `width / distance < theta`; `theta == 0` is exact pairwise.
    pub(crate) fn for_each_source(&self, i: usize, theta: f64, mut f: impl FnMut(Vec2, f64)) {
        let p = self.points[i];
        let mut stack = vec![0usize];
        while let Some(c) = stack.pop() {
            let cell = &self.cells[c];
            if cell.mass == 0.0 {
                continue;
            }
            match cell.children {
                None => {
                    for &j in &cell.bodies {
                        if j != i {
                            f(p - self.points[j], 1.0);
                        }
                    }
                }
                Some(children) => {
                    let com = (cell.sum / cell.mass).to_point();
                    let d = (p - com).hypot();
                    let far = theta > 0.0
                        && d > 0.0
                        && cell.bounds.width() / d < theta
                        && !cell.bounds.contains(p);
                    if far {
                        f(p - com, cell.mass);
                    } else {
                        // Reverse push keeps visiting order stable (quadrant 0 first).
                        stack.extend(children.iter().rev());
                    }
                }
            }
        }
    }
}

fn quadrant(bounds: Rect, p: Point) -> usize {
    let c = bounds.center();
    usize::from(p.x >= c.x) + 2 * usize::from(p.y >= c.y)
}

fn square_bounds(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::new(-1.0, -1.0, 1.0, 1.0);
    };
    let mut r = Rect::from_points(*first, *first);
    for p in &points[1..] {
        r = r.union_pt(*p);
    }
    let side = r.width().max(r.height()).max(1e-9) * 1.01;
    Rect::from_center_size(r.center(), (side, side))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/quadtree.rs"]
mod tests;
