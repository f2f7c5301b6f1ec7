/// Size multiplier of a node `offset` frames into a highlight window of `count` frames.
///
/// Returns `None` once `offset >= count - 1`: the node is back at rest size and loses the
/// highlight class. At offset 0 the multiplier is exactly `max`.
pub fn highlight_multiplier(offset: u64, count: u32, min: f64, max: f64) -> Option<f64> {
    let count = u64::from(count);
    if offset.saturating_add(1) >= count {
        return None;
    }
    let remaining = (count - offset) as f64 / count as f64;
    Some(min + remaining * (max - min))
}

/// `round(rest * multiplier)`, saturating at `u32::MAX`.
pub fn highlighted_size(rest: u32, multiplier: f64) -> u32 {
    let v = (f64::from(rest) * multiplier).round();
    if v <= 0.0 {
        0
    } else if v >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        v as u32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/highlight.rs"]
mod tests;
