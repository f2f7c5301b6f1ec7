use super::*;

fn collect(tree: &QuadTree, i: usize, theta: f64) -> (usize, f64) {
    let mut calls = 0;
    let mut mass = 0.0;
    tree.for_each_source(i, theta, |_, m| {
        calls += 1;
        mass += m;
    });
    (calls, mass)
}

#[test]
fn exact_mode_visits_every_other_body() {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(0.0, 1.0),
        Point::new(5.0, 5.0),
        Point::new(-3.0, 2.0),
    ];
    let tree = QuadTree::build(&points);
    for i in 0..points.len() {
        assert_eq!(collect(&tree, i, 0.0), (points.len() - 1, 4.0));
    }
}

#[test]
fn bodies_sharing_a_quadrant_are_pushed_down_on_split() {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(0.1, 0.1),
        Point::new(0.2, 0.05),
        Point::new(8.0, 8.0),
    ];
    let tree = QuadTree::build(&points);
    for i in 0..points.len() {
        assert_eq!(collect(&tree, i, 0.0), (3, 3.0));
    }
}

#[test]
fn far_cluster_is_aggregated_into_one_source() {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(0.01, 0.0),
        Point::new(0.0, 0.01),
        Point::new(0.01, 0.01),
        Point::new(100.0, 100.0),
    ];
    let tree = QuadTree::build(&points);
    let (calls, mass) = collect(&tree, 4, 0.5);
    assert_eq!(calls, 1);
    assert_eq!(mass, 4.0);

    let mut delta = Vec2::ZERO;
    tree.for_each_source(4, 0.5, |d, _| delta = d);
    assert!((delta.x - 99.995).abs() < 1e-9);
    assert!((delta.y - 99.995).abs() < 1e-9);
}

#[test]
fn coincident_points_terminate_and_keep_mass() {
    let points = [Point::new(2.0, 2.0); 3];
    let tree = QuadTree::build(&points);
    assert_eq!(collect(&tree, 0, 0.7), (2, 2.0));
}

#[test]
fn empty_input_builds_an_empty_tree() {
    let tree = QuadTree::build(&[]);
    assert!(tree.points.is_empty());
    assert_eq!(tree.cells.len(), 1);
}
