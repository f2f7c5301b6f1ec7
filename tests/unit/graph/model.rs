use super::*;

fn graph() -> GraphModel {
    GraphModel::new(10, 2)
}

#[test]
fn new_nodes_take_the_configured_rest_size() {
    let mut g = graph();
    g.add_node("a").unwrap();
    let a = g.node("a").unwrap();
    assert_eq!(a.rest_size, 10);
    assert_eq!(a.rendered_size, 10);
    assert!(a.style.is_none());
    assert!(a.frame_start.is_none() && a.frame_count.is_none());
}

#[test]
fn lookups_fail_with_not_found() {
    let g = graph();
    assert!(matches!(g.node("x").unwrap_err(), AnimateError::NotFound(_)));
    assert!(matches!(g.edge("x").unwrap_err(), AnimateError::NotFound(_)));
}

#[test]
fn duplicate_ids_are_ordering_errors() {
    let mut g = graph();
    g.add_node("a").unwrap();
    g.add_node("b").unwrap();
    assert!(matches!(
        g.add_node("a").unwrap_err(),
        AnimateError::EventOrdering(_)
    ));
    g.add_edge("e", "a", "b", false).unwrap();
    assert!(matches!(
        g.add_edge("e", "b", "a", false).unwrap_err(),
        AnimateError::EventOrdering(_)
    ));
}

#[test]
fn edges_need_existing_endpoints() {
    let mut g = graph();
    g.add_node("a").unwrap();
    assert!(matches!(
        g.add_edge("e", "a", "missing", true).unwrap_err(),
        AnimateError::NotFound(_)
    ));
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn color_attribute_sets_pie_and_style() {
    let mut g = graph();
    g.add_node("a").unwrap();
    let effect = g.set_attribute("a", ATTR_COLORS, "red,blue").unwrap();
    assert_eq!(effect, AttributeEffect::Colors);
    let a = g.node("a").unwrap();
    assert_eq!(a.colors.colors, vec!["red", "blue"]);
    assert_eq!(a.colors.shares, vec![0.5, 0.5]);
    assert_eq!(
        a.style.as_deref(),
        Some("shape: pie-chart; fill-color: red,blue;")
    );
}

#[test]
fn color_recompute_is_idempotent_and_local() {
    let mut g = graph();
    g.add_node("a").unwrap();
    g.add_node("b").unwrap();
    g.set_attribute("b", ATTR_COLORS, "green").unwrap();
    g.set_attribute("a", ATTR_COLORS, "red,blue").unwrap();
    let first = g.node("a").unwrap().colors.clone();
    g.set_attribute("a", ATTR_COLORS, "red,blue").unwrap();
    assert_eq!(g.node("a").unwrap().colors, first);
    assert_eq!(g.node("b").unwrap().colors.colors, vec!["green"]);
}

#[test]
fn edge_inherits_source_fill_once() {
    let mut g = graph();
    g.add_node("a").unwrap();
    g.add_node("b").unwrap();
    g.set_attribute("a", ATTR_COLORS, "X").unwrap();
    g.add_edge("e1", "a", "b", true).unwrap();
    assert_eq!(g.edge("e1").unwrap().style.as_deref(), Some("fill-color: X;"));
    assert_eq!(g.edge("e1").unwrap().size, 2);

    // Captured once: later color changes do not touch existing edges.
    g.set_attribute("a", ATTR_COLORS, "red").unwrap();
    assert_eq!(g.edge("e1").unwrap().style.as_deref(), Some("fill-color: X;"));
}

#[test]
fn edge_from_unstyled_source_has_no_style() {
    let mut g = graph();
    g.add_node("a").unwrap();
    g.add_node("b").unwrap();
    g.set_attribute("b", ATTR_COLORS, "red").unwrap();
    g.add_edge("e1", "a", "b", false).unwrap();
    let e = g.edge("e1").unwrap();
    assert_eq!(e.style, None);
    assert_eq!(e.size, 2);
}

#[test]
fn numeric_attributes_parse_or_fail() {
    let mut g = graph();
    g.add_node("a").unwrap();
    assert_eq!(
        g.set_attribute("a", ATTR_SIZE, "12").unwrap(),
        AttributeEffect::Size(12)
    );
    assert_eq!(
        g.set_attribute("a", ATTR_FRAME_START, "40").unwrap(),
        AttributeEffect::FrameStart(40)
    );
    assert_eq!(
        g.set_attribute("a", ATTR_FRAME_COUNT, "0").unwrap(),
        AttributeEffect::FrameCount(0)
    );
    let a = g.node("a").unwrap();
    assert_eq!((a.rest_size, a.rendered_size), (12, 12));
    assert_eq!(a.frame_start, Some(40));
    assert_eq!(a.frame_count, Some(0));

    for (key, bad) in [(ATTR_SIZE, "big"), (ATTR_FRAME_START, "-1"), (ATTR_FRAME_COUNT, "2.5")] {
        assert!(matches!(
            g.set_attribute("a", key, bad).unwrap_err(),
            AnimateError::AttributeParse(_)
        ));
    }
}

#[test]
fn attributes_apply_in_any_order() {
    let mut g = graph();
    g.add_node("a").unwrap();
    g.set_attribute("a", ATTR_FRAME_COUNT, "3").unwrap();
    g.set_attribute("a", ATTR_LABEL, "alpha").unwrap();
    g.set_attribute("a", ATTR_FRAME_START, "1").unwrap();
    g.set_attribute("a", "hidden", "0").unwrap();
    let a = g.node("a").unwrap();
    assert_eq!(a.label.as_deref(), Some("alpha"));
    assert_eq!(
        a.attributes.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["fc", "l", "fs", "hidden"]
    );
}

#[test]
fn unknown_node_attribute_is_not_found() {
    let mut g = graph();
    assert!(matches!(
        g.set_attribute("ghost", ATTR_LABEL, "x").unwrap_err(),
        AnimateError::NotFound(_)
    ));
}

#[test]
fn rendered_state_toggles_highlight_class() {
    let mut g = graph();
    g.add_node("a").unwrap();
    g.set_rendered("a", 30, true).unwrap();
    assert!(g.node("a").unwrap().is_highlighted());
    assert_eq!(g.node("a").unwrap().rendered_size, 30);
    g.set_rendered("a", 10, false).unwrap();
    assert!(!g.node("a").unwrap().is_highlighted());
}

#[test]
fn positions_are_mirrored() {
    let mut g = graph();
    g.add_node("a").unwrap();
    let mut pos = Positions::new();
    pos.insert("a".to_string(), Point::new(1.0, 2.0));
    pos.insert("stale".to_string(), Point::new(0.0, 0.0));
    g.apply_positions(&pos);
    assert_eq!(g.node("a").unwrap().position, Some(Point::new(1.0, 2.0)));
}
