use super::*;

fn state_with(ids: &[&str]) -> TemporalVisualState {
    let mut s = TemporalVisualState::new();
    for id in ids {
        s.node_added(id, 10);
    }
    s
}

#[test]
fn recent_nodes_are_most_recent_first() {
    let s = state_with(&["a", "b", "c", "d"]);
    assert_eq!(s.recent_nodes(3).collect::<Vec<_>>(), vec!["d", "c", "b"]);
    assert_eq!(s.last_added(), Some("d"));
}

#[test]
fn recent_nodes_clip_near_the_start() {
    let s = state_with(&["a", "b"]);
    assert_eq!(s.recent_nodes(5).collect::<Vec<_>>(), vec!["b", "a"]);
    let empty = TemporalVisualState::new();
    assert_eq!(empty.recent_nodes(3).count(), 0);
    assert_eq!(empty.last_added(), None);
}

#[test]
fn observe_mirrors_size_and_window() {
    let mut s = state_with(&["a"]);
    s.observe("a", &AttributeEffect::Size(7));
    s.observe("a", &AttributeEffect::FrameStart(3));
    s.observe("a", &AttributeEffect::Colors);
    assert_eq!(s.timing("a").unwrap().rest_size, 7);
    assert!(s.frame_window("a").is_err());
    s.observe("a", &AttributeEffect::FrameCount(2));
    assert_eq!(
        s.frame_window("a").unwrap(),
        FrameWindow { start: 3, count: 2 }
    );
}

#[test]
fn missing_metadata_names_the_keys() {
    let s = state_with(&["a"]);
    let err = s.frame_window("a").unwrap_err();
    assert!(matches!(err, AnimateError::EventOrdering(_)));
    assert!(err.to_string().contains("fs/fc"));
}
