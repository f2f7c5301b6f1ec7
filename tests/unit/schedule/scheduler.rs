use super::*;
use crate::{
    config::model::LayoutKind,
    encode::sink::InMemorySink,
    events::EventList,
    foundation::core::{Point, Positions},
    layout::LayoutParams,
};

/// Places node `i` at `(i, steps)` so tests can count layout iterations.
#[derive(Default)]
struct CountingLayout {
    steps: u64,
    positions: Positions,
}

impl LayoutProvider for CountingLayout {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Springbox
    }

    fn configure(&mut self, _params: &LayoutParams) -> AnimateResult<()> {
        Ok(())
    }

    fn step(&mut self, graph: &GraphModel) -> AnimateResult<()> {
        self.steps += 1;
        self.positions = graph
            .nodes()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), Point::new(i as f64, self.steps as f64)))
            .collect();
        Ok(())
    }

    fn positions(&self) -> &Positions {
        &self.positions
    }
}

fn highlight_cfg() -> AnimateConfig {
    let mut cfg = AnimateConfig::default();
    cfg.highlight.mode = HighlightMode::HighlightNew;
    cfg
}

fn scheduler(cfg: AnimateConfig) -> AnimationScheduler<InMemorySink> {
    AnimationScheduler::with_layout(cfg, Box::new(CountingLayout::default()), InMemorySink::new())
        .unwrap()
}

fn node(id: &str, fs: u64, fc: u32) -> Vec<GraphEvent> {
    vec![
        GraphEvent::node_added(id),
        GraphEvent::attribute(id, "s", "10"),
        GraphEvent::attribute(id, "fs", fs.to_string()),
        GraphEvent::attribute(id, "fc", fc.to_string()),
    ]
}

fn sizes(sink: &InMemorySink, id: &str) -> Vec<(u32, bool)> {
    sink.frames()
        .iter()
        .filter_map(|f| f.node(id))
        .map(|n| (n.size, n.classes.contains("highlighted")))
        .collect()
}

#[test]
fn highlight_window_slides_over_recent_nodes() {
    let mut events = node("n1", 0, 2);
    events.push(GraphEvent::step(0.0));
    events.extend(node("n2", 2, 2));
    events.push(GraphEvent::step(1.0));

    let mut s = scheduler(highlight_cfg());
    let report = s.run(&mut EventList::new(events)).unwrap();
    assert_eq!(report.frames_emitted, 4);
    assert_eq!(report.steps, 2);

    let sink = s.sink();
    assert_eq!(
        sizes(sink, "n1"),
        vec![(30, true), (25, true), (20, true), (10, false)]
    );
    assert_eq!(sizes(sink, "n2"), vec![(30, true), (25, true)]);
}

#[test]
fn huge_frame_start_gap_leaves_old_nodes_at_rest() {
    let mut events = node("n1", 0, 0);
    events.push(GraphEvent::step(0.0));
    events.extend(node("n2", u64::MAX, 2));
    events.push(GraphEvent::step(1.0));

    let mut s = scheduler(highlight_cfg());
    let report = s.run(&mut EventList::new(events)).unwrap();
    assert_eq!(report.frames_emitted, 2);
    assert_eq!(sizes(s.sink(), "n1"), vec![(10, false), (10, false)]);
    assert_eq!(sizes(s.sink(), "n2"), vec![(30, true), (25, true)]);
}

#[test]
fn fixed_size_mode_skips_the_highlight_pass() {
    let mut events = node("n1", 0, 3);
    events.push(GraphEvent::step(0.0));

    let mut s = scheduler(AnimateConfig::default());
    s.run(&mut EventList::new(events)).unwrap();
    assert_eq!(
        sizes(s.sink(), "n1"),
        vec![(10, false), (10, false), (10, false)]
    );
}

#[test]
fn hidden_nodes_are_never_highlighted() {
    let mut events = node("n1", 0, 1);
    events.push(GraphEvent::attribute("n1", "s", "0"));
    events.push(GraphEvent::step(0.0));

    let mut s = scheduler(highlight_cfg());
    s.run(&mut EventList::new(events)).unwrap();
    assert_eq!(sizes(s.sink(), "n1"), vec![(0, false)]);
}

#[test]
fn layout_steps_once_per_emitted_frame() {
    let mut events = node("n1", 0, 3);
    events.push(GraphEvent::step(0.0));

    let mut s = scheduler(AnimateConfig::default());
    s.run(&mut EventList::new(events)).unwrap();
    let ys = s
        .sink()
        .frames()
        .iter()
        .map(|f| f.node("n1").and_then(|n| n.position).map(|p| p.y))
        .collect::<Vec<_>>();
    assert_eq!(ys, vec![Some(1.0), Some(2.0), Some(3.0)]);
    assert_eq!(s.frame_index(), FrameIndex(3));
}

#[test]
fn zero_frame_count_emits_nothing() {
    let mut events = node("n1", 0, 0);
    events.push(GraphEvent::step(0.0));

    let mut s = scheduler(AnimateConfig::default());
    let report = s.run(&mut EventList::new(events)).unwrap();
    assert_eq!(report.frames_emitted, 0);
    assert_eq!(report.steps, 1);
}

#[test]
fn boundary_before_any_node_is_a_no_op() {
    let mut s = scheduler(AnimateConfig::default());
    let report = s
        .run(&mut EventList::new([GraphEvent::step(0.0)]))
        .unwrap();
    assert_eq!(report.frames_emitted, 0);
    assert_eq!(report.steps, 0);
}

#[test]
fn missing_frame_count_is_fatal() {
    let mut events = node("n1", 0, 1);
    events.push(GraphEvent::step(0.0));
    events.push(GraphEvent::node_added("n2"));
    events.push(GraphEvent::attribute("n2", "fs", "1"));
    events.push(GraphEvent::step(1.0));
    events.extend(node("n3", 1, 1));
    events.push(GraphEvent::step(2.0));

    let mut s = scheduler(AnimateConfig::default());
    let err = s.run(&mut EventList::new(events)).unwrap_err();
    assert!(matches!(err, AnimateError::EventOrdering(_)));
    assert!(err.to_string().contains("fc"), "{err}");
    assert_eq!(s.sink().frames().len(), 1);
    assert!(!s.sink().ended());
}

#[test]
fn frame_starts_going_backwards_are_rejected() {
    let mut events = node("n1", 5, 1);
    events.push(GraphEvent::step(0.0));
    events.extend(node("n2", 2, 1));
    events.push(GraphEvent::step(1.0));

    let mut s = scheduler(highlight_cfg());
    let err = s.run(&mut EventList::new(events)).unwrap_err();
    assert!(matches!(err, AnimateError::EventOrdering(_)));
}

#[test]
fn snapshot_mode_steps_per_batch_and_exports_once() {
    let mut cfg = AnimateConfig::default();
    cfg.output.mode = OutputMode::Snapshot;
    cfg.output.snapshot_path = Some(PathBuf::from("final.dot"));

    // No fs/fc anywhere: snapshot mode never consults frame metadata.
    let events = vec![
        GraphEvent::node_added("a"),
        GraphEvent::step(0.0),
        GraphEvent::node_added("b"),
        GraphEvent::edge_added("ab", "a", "b", false),
        GraphEvent::step(1.0),
        GraphEvent::node_added("c"),
    ];
    let mut s = scheduler(cfg);
    let report = s.run(&mut EventList::new(events)).unwrap();
    assert_eq!(report.batches, 3);
    assert_eq!(report.frames_emitted, 0);
    assert_eq!((report.nodes, report.edges), (3, 1));

    let (path, text) = s.sink().snapshot().unwrap();
    assert_eq!(path, std::path::Path::new("final.dot"));
    assert!(text.contains("\"c\" [pos=\"200,300\""), "{text}");
    assert!(s.sink().frames().is_empty());
}

#[test]
fn attribute_for_unknown_node_is_not_found() {
    let mut s = scheduler(AnimateConfig::default());
    let err = s
        .run(&mut EventList::new([GraphEvent::attribute("ghost", "s", "1")]))
        .unwrap_err();
    assert!(matches!(err, AnimateError::NotFound(_)));
}

#[test]
fn invalid_config_is_rejected_before_running() {
    let mut cfg = AnimateConfig::default();
    cfg.output.width = 0;
    let err = AnimationScheduler::with_layout(
        cfg,
        Box::new(CountingLayout::default()),
        InMemorySink::new(),
    )
    .err()
    .unwrap();
    assert!(matches!(err, AnimateError::Configuration(_)));
}
