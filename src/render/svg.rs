use std::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{CircleSegment, Shape as _};

use crate::render::scene::{FrameScene, SceneNode};

const DEFAULT_COLOR: &str = "black";
const HALO_SCALE: f64 = 1.6;
const HALO_BLUR: f64 = 4.0;
const PATH_TOLERANCE: f64 = 0.05;

/// Serialize a scene to a standalone SVG document.
///
/// Draw order: background, edges, then nodes in insertion order (halo, body, label).
pub fn scene_to_svg(scene: &FrameScene) -> String {
    let w = scene.style.canvas.width;
    let h = scene.style.canvas.height;
    let mut out = String::with_capacity(256 + 160 * (scene.nodes.len() + scene.edges.len()));

    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    ));
    out.push('\n');
    if scene.style.shadow.is_some() {
        out.push_str(&format!(
            r#"<defs><filter id="halo" x="-100%" y="-100%" width="300%" height="300%"><feGaussianBlur stdDeviation="{HALO_BLUR}"/></filter></defs>"#
        ));
        out.push('\n');
    }
    out.push_str(&format!(
        r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{}"/>"#,
        escape_xml(&scene.style.background)
    ));
    out.push('\n');

    out.push_str("<g id=\"edges\">\n");
    for e in &scene.edges {
        if e.size == 0 {
            continue;
        }
        out.push_str(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"/>"#,
            e.from.x,
            e.from.y,
            e.to.x,
            e.to.y,
            escape_xml(e.color.as_deref().unwrap_or(DEFAULT_COLOR)),
            e.size
        ));
        out.push('\n');
    }
    out.push_str("</g>\n<g id=\"nodes\">\n");
    for n in &scene.nodes {
        if n.size == 0 {
            continue;
        }
        write_node(&mut out, scene, n);
    }
    out.push_str("</g>\n</svg>\n");
    out
}

fn write_node(out: &mut String, scene: &FrameScene, n: &SceneNode) {
    let r = f64::from(n.size) / 2.0;
    let (cx, cy) = (n.center.x, n.center.y);

    out.push_str(&format!(r#"<g id="node-{}">"#, escape_xml(&n.id)));
    if n.highlighted
        && let Some(shadow) = scene.style.shadow.as_deref()
    {
        out.push_str(&format!(
            r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{:.2}" fill="{}" filter="url(#halo)"/>"#,
            r * HALO_SCALE,
            escape_xml(shadow)
        ));
    }

    if n.colors.len() < 2 {
        let fill = n.colors.first().map_or(DEFAULT_COLOR, String::as_str);
        out.push_str(&format!(
            r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" fill="{}"/>"#,
            escape_xml(fill)
        ));
    } else {
        let sweep = TAU / n.colors.len() as f64;
        for (i, color) in n.colors.iter().enumerate() {
            let start = -FRAC_PI_2 + sweep * i as f64;
            let slice = CircleSegment::new(n.center, r, 0.0, start, sweep).to_path(PATH_TOLERANCE);
            out.push_str(&format!(
                r#"<path d="{}" fill="{}"/>"#,
                slice.to_svg(),
                escape_xml(color)
            ));
        }
    }

    if let Some(label) = &n.label {
        let size = scene.style.label_size;
        out.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{size}" fill="{DEFAULT_COLOR}">{}</text>"#,
            cx + r + 2.0,
            cy + f64::from(size) / 3.0,
            escape_xml(label)
        ));
    }
    out.push_str("</g>\n");
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
