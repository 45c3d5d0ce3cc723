use mapling_core::MapTree;
use serde::{Deserialize, Serialize};

use crate::layout::MapLayout;
use crate::text::wrap_label;
use crate::theme::Theme;
use crate::{Error, Result};

/// Everything a drawing backend needs, and nothing it has to recompute:
/// per-node position, wrapped label, level-derived color/size/font, and the
/// parent/child edge list.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MapRenderModel {
    #[serde(default)]
    pub nodes: Vec<MapRenderNode>,
    #[serde(default)]
    pub edges: Vec<MapRenderEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRenderNode {
    pub id: String,
    /// Label after math-aware wrapping; may contain embedded `\n`.
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: String,
    pub font_size: f64,
    #[serde(default)]
    pub has_math: bool,
    #[serde(default)]
    pub level: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRenderEdge {
    pub id: String,
    pub start: String,
    pub end: String,
}

/// Default maximum label line width, in characters.
pub const DEFAULT_WRAP_WIDTH: usize = 20;

/// Builds the renderer-facing model from a tree and its layout.
///
/// Fails only when `layout` does not cover the tree — a contract violation
/// by the caller (layouts produced by [`crate::layout_tree`] for the same
/// tree always cover it).
pub fn build_render_model(
    tree: &MapTree,
    layout: &MapLayout,
    theme: &Theme,
    wrap_width: usize,
) -> Result<MapRenderModel> {
    let mut nodes = Vec::with_capacity(layout.positions.len());
    for node in tree.iter() {
        let pos = layout
            .position(&node.id)
            .ok_or_else(|| Error::MissingPosition {
                id: node.id.clone(),
            })?;
        nodes.push(MapRenderNode {
            id: node.id.clone(),
            label: wrap_label(&node.label, wrap_width),
            x: pos.x,
            y: pos.y,
            radius: theme.radius(node.level),
            color: theme.color(node.level).to_string(),
            font_size: theme.font_size(node.level),
            has_math: node.has_math,
            level: node.level,
        });
    }

    let edges = tree
        .edges()
        .into_iter()
        .map(|(parent, child)| MapRenderEdge {
            id: format!("edge_{parent}_{child}"),
            start: parent.to_string(),
            end: child.to_string(),
        })
        .collect();

    Ok(MapRenderModel { nodes, edges })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutOptions, layout_tree};
    use mapling_core::{ROOT_ID, build_diagram};

    fn model(text: &str) -> MapRenderModel {
        let tree = build_diagram(text);
        let layout = layout_tree(&tree, &LayoutOptions::default());
        build_render_model(&tree, &layout, &Theme::default(), DEFAULT_WRAP_WIDTH).unwrap()
    }

    #[test]
    fn covers_every_node_and_edge() {
        let m = model(
            r#"{"title": "T", "children": [{"name": "a", "children": [{"name": "b"}]}, {"name": "c"}]}"#,
        );
        assert_eq!(m.nodes.len(), 4);
        assert_eq!(m.edges.len(), 3);
        assert_eq!(m.nodes[0].id, ROOT_ID);
        assert_eq!(m.edges[0].id, format!("edge_{ROOT_ID}_{}", m.edges[0].end));
    }

    #[test]
    fn same_level_nodes_share_color_and_size() {
        let m = model(r#"{"title": "T", "children": [{"name": "a"}, {"name": "b"}, {"name": "c"}]}"#);
        let level1: Vec<&MapRenderNode> = m.nodes.iter().filter(|n| n.level == 1).collect();
        assert_eq!(level1.len(), 3);
        for n in &level1 {
            assert_eq!(n.color, level1[0].color);
            assert_eq!(n.radius, level1[0].radius);
            assert_eq!(n.font_size, level1[0].font_size);
        }
        assert_ne!(m.nodes[0].color, level1[0].color);
    }

    #[test]
    fn labels_are_wrapped_math_preserved() {
        let m = model(
            r#"{"title": "T", "children": [{"name": "a very long label that must surely wrap $a+b=c$"}]}"#,
        );
        let child = &m.nodes[1];
        assert!(child.label.contains('\n'));
        assert!(child.label.contains("$a+b=c$"));
        assert!(child.has_math);
    }

    #[test]
    fn missing_position_is_a_contract_error() {
        let tree = build_diagram(r#"{"title": "T", "children": [{"name": "a"}]}"#);
        let empty = MapLayout::default();
        let err = build_render_model(&tree, &empty, &Theme::default(), 20).unwrap_err();
        assert!(matches!(err, Error::MissingPosition { .. }));
    }

    #[test]
    fn model_serializes_camel_case() {
        let m = model(r#"{"title": "T", "children": [{"name": "$x$"}]}"#);
        let json = serde_json::to_value(&m).unwrap();
        assert!(json["nodes"][0]["fontSize"].is_number());
        assert_eq!(json["nodes"][1]["hasMath"], serde_json::json!(true));
    }
}
