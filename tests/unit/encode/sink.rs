use super::*;

fn graph() -> GraphModel {
    let mut g = GraphModel::new(10, 2);
    g.add_node("a").unwrap();
    g.add_node("b").unwrap();
    g.set_attribute("a", "c", "red").unwrap();
    g.set_rendered("b", 30, true).unwrap();
    g
}

fn cfg() -> SinkConfig {
    SinkConfig {
        canvas: Canvas::new(64, 48).unwrap(),
        mode: OutputMode::Frames,
        label_size: 0,
    }
}

#[test]
fn records_node_state_per_frame() {
    let g = graph();
    let mut positions = Positions::new();
    positions.insert("a".to_string(), Point::new(1.0, 2.0));

    let mut sink = InMemorySink::new();
    sink.begin(&cfg()).unwrap();
    sink.emit(&g, &positions, FrameIndex(0)).unwrap();
    sink.end().unwrap();

    assert!(sink.ended());
    assert_eq!(sink.config(), Some(&cfg()));
    let frame = &sink.frames()[0];
    assert_eq!(frame.index, FrameIndex(0));

    let a = frame.node("a").unwrap();
    assert_eq!(a.position, Some(Point::new(1.0, 2.0)));
    assert_eq!(a.size, 10);
    assert_eq!(a.style.as_deref(), Some("shape: pie-chart; fill-color: red;"));

    let b = frame.node("b").unwrap();
    assert_eq!(b.position, None);
    assert_eq!(b.size, 30);
    assert!(b.classes.contains("highlighted"));
}

#[test]
fn indices_must_strictly_increase() {
    let g = graph();
    let mut sink = InMemorySink::new();
    sink.begin(&cfg()).unwrap();
    sink.emit(&g, &Positions::new(), FrameIndex(3)).unwrap();
    let err = sink.emit(&g, &Positions::new(), FrameIndex(3)).unwrap_err();
    assert!(matches!(err, AnimateError::EventOrdering(_)));
}

#[test]
fn begin_resets_captured_state() {
    let g = graph();
    let mut sink = InMemorySink::new();
    sink.begin(&cfg()).unwrap();
    sink.emit(&g, &Positions::new(), FrameIndex(0)).unwrap();
    sink.begin(&cfg()).unwrap();
    assert!(sink.frames().is_empty());
    assert!(!sink.ended());
}

#[test]
fn snapshot_text_is_captured() {
    let g = graph();
    let mut positions = Positions::new();
    positions.insert("a".to_string(), Point::new(1.0, 2.0));
    positions.insert("b".to_string(), Point::new(0.5, 0.0));

    let mut sink = InMemorySink::new().with_snapshot_format("g", 10.0);
    sink.export_snapshot(&g, &positions, Path::new("out.dot"))
        .unwrap();
    let (path, text) = sink.snapshot().unwrap();
    assert_eq!(path, Path::new("out.dot"));
    assert!(text.starts_with("graph \"g\" {"));
    assert!(text.contains("pos=\"10,20\""));
}
