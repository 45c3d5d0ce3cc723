use serde::Serialize;

use crate::structure::{DEFAULT_TITLE, MapBranch, MapStructure};

/// Reserved identifier of the root node of every tree.
pub const ROOT_ID: &str = "root";

/// One node of a canonical mind-map tree.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapNode {
    pub id: String,
    pub label: String,
    /// Depth from the root (root = 0).
    pub level: u32,
    /// True iff the label carries the inline-math delimiter `$`.
    pub has_math: bool,
    pub children: Vec<MapNode>,
}

/// A canonical mind-map tree: exactly one root, unique ids, child order
/// preserved from the recovered structure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapTree {
    pub root: MapNode,
}

/// Mints the synthetic ids handed to non-root nodes.
///
/// An explicit counter passed down the build recursion; ids are unique and
/// follow pre-order traversal order.
#[derive(Debug, Default)]
struct IdGen {
    next: u64,
}

impl IdGen {
    fn mint(&mut self) -> String {
        let id = format!("node_{}", self.next);
        self.next += 1;
        id
    }
}

fn label_has_math(label: &str) -> bool {
    label.contains('$')
}

fn build_node(branch: &MapBranch, level: u32, ids: &mut IdGen) -> MapNode {
    let id = ids.mint();
    MapNode {
        id,
        label: branch.name.clone(),
        level,
        has_math: label_has_math(&branch.name),
        children: branch
            .children
            .iter()
            .map(|child| build_node(child, level + 1, ids))
            .collect(),
    }
}

impl MapTree {
    /// Canonicalizes a recovered structure: pre-order walk, root keeps the
    /// reserved [`ROOT_ID`], every other node gets a freshly minted id.
    ///
    /// The builder only descends into children it is itself constructing, so
    /// cycles and shared nodes cannot occur.
    pub fn from_structure(structure: &MapStructure) -> Self {
        let mut ids = IdGen::default();
        let title = if structure.title.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            structure.title.clone()
        };
        let root = MapNode {
            id: ROOT_ID.to_string(),
            has_math: label_has_math(&title),
            label: title,
            level: 0,
            children: structure
                .children
                .iter()
                .map(|child| build_node(child, 1, &mut ids))
                .collect(),
        };
        Self { root }
    }

    /// Pre-order iteration over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = &MapNode> {
        let mut stack = vec![&self.root];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            // Children are pushed in reverse so they pop left-to-right.
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// `(parent_id, child_id)` pairs in pre-order.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut out = Vec::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            for child in node.children.iter() {
                out.push((node.id.as_str(), child.id.as_str()));
            }
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Looks a node up by id.
    pub fn node(&self, id: &str) -> Option<&MapNode> {
        self.iter().find(|n| n.id == id)
    }
}
