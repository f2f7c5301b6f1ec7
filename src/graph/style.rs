use crate::foundation::error::{AnimateError, AnimateResult};

/// Shape rule that precedes the fill rule in a node style string.
pub const PIE_CHART_SHAPE: &str = "shape: pie-chart;";

/// Parsed `c` attribute: ordered community colors and their equal pie shares.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct CommunityColors {
    /// Color tokens in attribute order.
    pub colors: Vec<String>,
    /// One share per color, each `1/k`.
    pub shares: Vec<f64>,
}

impl CommunityColors {
    /// Style string in the `shape: …; fill-color: …;` form, or `None` when there are no colors.
    pub fn style(&self) -> Option<String> {
        if self.colors.is_empty() {
            return None;
        }
        Some(format!(
            "{PIE_CHART_SHAPE} fill-color: {};",
            self.colors.join(",")
        ))
    }
}

/// A color name (`red`) or `#rgb`/`#rgba`/`#rrggbb`/`#rrggbbaa` hex value.
pub fn is_color_token(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()),
    }
}

/// Parse a comma-separated color list. An empty value yields no colors.
pub fn parse_community_colors(value: &str) -> AnimateResult<CommunityColors> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(CommunityColors::default());
    }

    let mut colors = Vec::new();
    for token in value.split(',') {
        let token = token.trim();
        if !is_color_token(token) {
            return Err(AnimateError::attribute_parse(format!(
                "invalid color token '{token}' in community list '{value}'"
            )));
        }
        colors.push(token.to_string());
    }

    let share = 1.0 / colors.len() as f64;
    let shares = vec![share; colors.len()];
    Ok(CommunityColors { colors, shares })
}

/// Style inherited by an edge from its source node: everything after the first rule
/// separator, i.e. the fill portion without the shape portion.
pub fn edge_style_from(node_style: Option<&str>) -> Option<String> {
    let (_, rest) = node_style?.split_once(';')?;
    let rest = rest.trim();
    if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}

/// Color tokens of the `fill-color` rule in a style string.
pub fn fill_colors(style: &str) -> Vec<&str> {
    style
        .split(';')
        .filter_map(|rule| rule.split_once(':'))
        .filter(|(k, _)| k.trim() == "fill-color")
        .flat_map(|(_, v)| v.split(','))
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/graph/style.rs"]
mod tests;
