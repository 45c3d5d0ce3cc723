use std::fmt::Write as _;

use unicode_width::UnicodeWidthStr;

use crate::model::{MapRenderModel, MapRenderNode};

/// Options for the headless SVG backend.
#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Pixels per layout unit.
    pub scale: f64,
    /// Margin around the diagram, in pixels.
    pub margin: f64,
    pub background: Option<String>,
    pub font_family: String,
    pub edge_color: String,
    pub label_background: String,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            scale: 100.0,
            margin: 80.0,
            background: Some("white".to_string()),
            font_family: "sans-serif".to_string(),
            edge_color: "#dddddd".to_string(),
            label_background: "white".to_string(),
        }
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn fmt_px(v: f64) -> String {
    // Trim trailing zeros so output stays stable and diff-friendly.
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() { "0".to_string() } else { s.to_string() }
}

// Deterministic width estimate for the label backdrop: east-asian-wide
// characters count double via unicode-width, then a per-font-size factor.
const CHAR_WIDTH_FACTOR: f64 = 0.6;
const LINE_HEIGHT_FACTOR: f64 = 1.2;

fn label_extent(node: &MapRenderNode) -> (f64, f64) {
    let lines: Vec<&str> = node.label.split('\n').collect();
    let max_cols = lines.iter().map(|l| l.width()).max().unwrap_or(0);
    let width = max_cols as f64 * node.font_size * CHAR_WIDTH_FACTOR;
    let height = lines.len() as f64 * node.font_size * LINE_HEIGHT_FACTOR;
    (width, height)
}

/// Renders a mind-map render model to a standalone SVG document.
///
/// Edges are drawn first, then node circles, then labels on a white rounded
/// backdrop so text stays readable where it overhangs its circle. String
/// building only; this function cannot fail.
pub fn render_svg(model: &MapRenderModel, options: &SvgRenderOptions) -> String {
    let max_radius = model.nodes.iter().map(|n| n.radius).fold(0.0, f64::max);
    let bounds = crate::layout::Bounds::from_points(model.nodes.iter().map(|n| (n.x, n.y)))
        .unwrap_or(crate::layout::Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0,
        });

    let pad = options.margin + max_radius;
    let width = bounds.width() * options.scale + 2.0 * pad;
    let height = bounds.height() * options.scale + 2.0 * pad;

    // Layout y grows upward (root on top, children below at lower y); SVG y
    // grows downward, so flip around the top edge.
    let sx = |x: f64| (x - bounds.min_x) * options.scale + pad;
    let sy = |y: f64| (bounds.max_y - y) * options.scale + pad;

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{font}">"#,
        w = fmt_px(width),
        h = fmt_px(height),
        font = escape_xml(&options.font_family),
    );

    if let Some(background) = &options.background {
        let _ = write!(
            &mut out,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            escape_xml(background)
        );
    }

    let node_by_id =
        |id: &str| -> Option<&MapRenderNode> { model.nodes.iter().find(|n| n.id == id) };

    for edge in &model.edges {
        let (Some(a), Some(b)) = (node_by_id(&edge.start), node_by_id(&edge.end)) else {
            continue;
        };
        let _ = write!(
            &mut out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="2"/>"#,
            fmt_px(sx(a.x)),
            fmt_px(sy(a.y)),
            fmt_px(sx(b.x)),
            fmt_px(sy(b.y)),
            escape_xml(&options.edge_color),
        );
    }

    for node in &model.nodes {
        let _ = write!(
            &mut out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" fill-opacity="0.9"/>"#,
            fmt_px(sx(node.x)),
            fmt_px(sy(node.y)),
            fmt_px(node.radius),
            escape_xml(&node.color),
        );
    }

    for node in &model.nodes {
        let (label_w, label_h) = label_extent(node);
        let cx = sx(node.x);
        let cy = sy(node.y);

        if label_w > 0.0 {
            let _ = write!(
                &mut out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" rx="4" fill="{}" fill-opacity="0.8"/>"#,
                fmt_px(cx - label_w / 2.0 - 3.0),
                fmt_px(cy - label_h / 2.0 - 2.0),
                fmt_px(label_w + 6.0),
                fmt_px(label_h + 4.0),
                escape_xml(&options.label_background),
            );
        }

        let lines: Vec<&str> = node.label.split('\n').collect();
        let line_height = node.font_size * LINE_HEIGHT_FACTOR;
        let first_y = cy - (lines.len() as f64 - 1.0) * line_height / 2.0;
        let _ = write!(
            &mut out,
            r#"<text x="{}" y="{}" font-size="{}" text-anchor="middle" dominant-baseline="middle">"#,
            fmt_px(cx),
            fmt_px(first_y),
            fmt_px(node.font_size),
        );
        for (i, line) in lines.iter().enumerate() {
            let _ = write!(
                &mut out,
                r#"<tspan x="{}" dy="{}">{}</tspan>"#,
                fmt_px(cx),
                fmt_px(if i == 0 { 0.0 } else { line_height }),
                escape_xml(line),
            );
        }
        out.push_str("</text>");
    }

    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutOptions, layout_tree};
    use crate::model::build_render_model;
    use crate::theme::Theme;
    use mapling_core::build_diagram;

    fn svg_for(text: &str) -> String {
        let tree = build_diagram(text);
        let layout = layout_tree(&tree, &LayoutOptions::default());
        let model = build_render_model(&tree, &layout, &Theme::default(), 20).unwrap();
        render_svg(&model, &SvgRenderOptions::default())
    }

    #[test]
    fn produces_a_standalone_svg_document() {
        let svg = svg_for(r#"{"title": "T", "children": [{"name": "a"}, {"name": "b"}]}"#);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert_eq!(svg.matches("<line").count(), 2);
        assert_eq!(svg.matches("<text").count(), 3);
    }

    #[test]
    fn labels_are_xml_escaped() {
        let svg = svg_for(r#"{"title": "a < b & c", "children": []}"#);
        assert!(svg.contains("a &lt; b &amp; c"));
        assert!(!svg.contains("a < b & c"));
    }

    #[test]
    fn wrapped_labels_become_tspans() {
        let svg =
            svg_for(r#"{"title": "T", "children": [{"name": "a rather long label that wraps"}]}"#);
        // Root "T" stays one line; the 30-char child wraps to two at width 20.
        assert_eq!(svg.matches("<tspan").count(), 3);
    }

    #[test]
    fn same_input_same_svg() {
        let text = r#"{"title": "T", "children": [{"name": "a"}, {"name": "b"}]}"#;
        assert_eq!(svg_for(text), svg_for(text));
    }

    #[test]
    fn background_is_optional() {
        let tree = build_diagram(r#"{"title": "T"}"#);
        let layout = layout_tree(&tree, &LayoutOptions::default());
        let model = build_render_model(&tree, &layout, &Theme::default(), 20).unwrap();
        let options = SvgRenderOptions {
            background: None,
            ..SvgRenderOptions::default()
        };
        let svg = render_svg(&model, &options);
        assert!(!svg.contains(r#"width="100%""#));
    }

    #[test]
    fn escape_xml_covers_significant_characters() {
        assert_eq!(escape_xml(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
        assert_eq!(escape_xml("plain"), "plain");
    }
}
