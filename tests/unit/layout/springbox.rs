use super::*;

#[test]
fn connected_pair_settles_near_spring_length() {
    let mut g = GraphModel::new(10, 2);
    g.add_node("a").unwrap();
    g.add_node("b").unwrap();
    g.add_edge("ab", "a", "b", false).unwrap();

    let mut layout = SpringBoxLayout::new(3);
    for _ in 0..500 {
        layout.step(&g).unwrap();
    }
    let p = layout.positions();
    let d = (p["a"] - p["b"]).hypot();
    assert!(d > 1.0 && d < 1.6, "distance {d}");
}

#[test]
fn quality_maps_to_opening_angle() {
    let mut layout = SpringBoxLayout::new(0);
    assert_eq!(layout.theta(), 0.0);
    layout
        .configure(&LayoutParams::SpringBox { quality: 0.25 })
        .unwrap();
    assert_eq!(layout.theta(), 0.75);
}

#[test]
fn configure_rejects_out_of_range_quality() {
    let mut layout = SpringBoxLayout::new(0);
    assert!(
        layout
            .configure(&LayoutParams::SpringBox { quality: 1.5 })
            .is_err()
    );
    assert!(
        layout
            .configure(&LayoutParams::LinLog {
                force: 3.0,
                attraction: 0.0,
                repulsion: -1.2,
                theta: 0.7,
            })
            .is_err()
    );
}

#[test]
fn nodes_added_later_join_the_layout() {
    let mut g = GraphModel::new(10, 2);
    g.add_node("a").unwrap();
    let mut layout = SpringBoxLayout::new(4);
    layout.step(&g).unwrap();
    g.add_node("b").unwrap();
    g.add_edge("ab", "a", "b", false).unwrap();
    layout.step(&g).unwrap();
    assert_eq!(layout.positions().len(), 2);
    assert!(layout.positions().values().all(|p| p.is_finite()));
}
