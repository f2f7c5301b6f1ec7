use super::*;

#[test]
fn window_of_four_decays_from_max_to_rest() {
    assert_eq!(highlight_multiplier(0, 4, 1.0, 3.0), Some(3.0));
    assert_eq!(highlight_multiplier(1, 4, 1.0, 3.0), Some(2.5));
    assert_eq!(highlight_multiplier(2, 4, 1.0, 3.0), Some(2.0));
    assert_eq!(highlight_multiplier(3, 4, 1.0, 3.0), None);
    assert_eq!(highlight_multiplier(40, 4, 1.0, 3.0), None);
}

#[test]
fn single_frame_window_never_highlights() {
    assert_eq!(highlight_multiplier(0, 1, 1.0, 3.0), None);
    assert_eq!(highlight_multiplier(0, 0, 1.0, 3.0), None);
}

#[test]
fn sizes_round_to_nearest() {
    assert_eq!(highlighted_size(10, 3.0), 30);
    assert_eq!(highlighted_size(10, 2.5), 25);
    assert_eq!(highlighted_size(3, 2.5), 8);
    assert_eq!(highlighted_size(7, 0.0), 0);
    assert_eq!(highlighted_size(u32::MAX, 3.0), u32::MAX);
}

#[test]
fn offsets_near_u64_max_are_past_the_window() {
    assert_eq!(highlight_multiplier(u64::MAX, 4, 1.0, 3.0), None);
    assert_eq!(highlight_multiplier(u64::MAX - 1, 4, 1.0, 3.0), None);
}
