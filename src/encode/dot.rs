use crate::{
    foundation::core::Positions,
    foundation::error::{AnimateError, AnimateResult},
    graph::model::GraphModel,
};

/// Naming, scaling and label options of a snapshot document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotOptions<'a> {
    /// Graph name written after `graph`/`digraph`.
    pub graph_name: &'a str,
    /// Multiplier applied to layout coordinates.
    pub scale: f64,
    /// Write a `label` per node (its `l` text, else its id).
    pub labels: bool,
}

/// Render the graph as a Graphviz document with fixed node positions.
///
/// The document is a `digraph` when any edge is directed (undirected edges then carry
/// `dir=none`), otherwise a `graph`. Each node lists its persisted attributes, its label when
/// labels are enabled, then `pos` (layout coordinates times `scale`), `width` and `height`.
/// Each edge lists its id, its size and the style inherited from its source node.
pub fn write_dot(graph: &GraphModel, positions: &Positions, opts: &DotOptions<'_>) -> AnimateResult<String> {
    let directed = graph.edges().any(|e| e.directed);
    let (kind, arrow) = if directed { ("digraph", "->") } else { ("graph", "--") };

    let mut out = format!("{kind} {} {{\n", quote(opts.graph_name));
    for node in graph.nodes() {
        let p = positions.get(&node.id).ok_or_else(|| {
            AnimateError::io(format!("no layout position for node '{}'", node.id))
        })?;

        let mut attrs = node
            .attributes
            .iter()
            .map(|(k, v)| format!("{}={}", quote(k), quote(v)))
            .collect::<Vec<_>>();
        if opts.labels {
            let label = node.label.as_deref().unwrap_or(&node.id);
            if !label.is_empty() {
                attrs.push(format!("label={}", quote(label)));
            }
        }
        attrs.push(format!("pos=\"{},{}\"", p.x * opts.scale, p.y * opts.scale));
        attrs.push("width=\"0.5\"".to_string());
        attrs.push("height=\"0.5\"".to_string());
        out.push_str(&format!("  {} [{}];\n", quote(&node.id), attrs.join(", ")));
    }
    for edge in graph.edges() {
        let mut attrs = vec![
            format!("id={}", quote(&edge.id)),
            format!("\"ui.size\"=\"{}\"", edge.size),
        ];
        if let Some(style) = &edge.style {
            attrs.push(format!("\"ui.style\"={}", quote(style)));
        }
        if directed && !edge.directed {
            attrs.push("dir=none".to_string());
        }
        out.push_str(&format!(
            "  {} {arrow} {} [{}];\n",
            quote(&edge.from),
            quote(&edge.to),
            attrs.join(", ")
        ));
    }
    out.push_str("}\n");
    Ok(out)
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
#[path = "../../tests/unit/encode/dot.rs"]
mod tests;
