use indexmap::IndexMap;
use mapling_core::{MapNode, MapTree};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Visual tuning knobs for the hierarchical layout.
///
/// The horizontal spacing constants are a per-level dispatch table; a level
/// past the end of the table uses the last entry. Keeping them monotonically
/// non-increasing avoids crowding near the root while keeping deep subtrees
/// compact.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Horizontal spacing between siblings, indexed by the parent's level.
    pub level_spacing: Vec<f64>,
    /// Constant vertical distance between a parent and its children.
    pub vertical_step: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            level_spacing: vec![6.0, 3.0, 1.5],
            vertical_step: 2.0,
        }
    }
}

impl LayoutOptions {
    fn spacing(&self, level: u32) -> f64 {
        let idx = (level as usize).min(self.level_spacing.len().saturating_sub(1));
        self.level_spacing.get(idx).copied().unwrap_or(1.0)
    }
}

/// Positions keyed by canonical node id, in pre-order insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapLayout {
    pub positions: IndexMap<String, LayoutPoint>,
}

impl MapLayout {
    pub fn position(&self, id: &str) -> Option<LayoutPoint> {
        self.positions.get(id).copied()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.positions.values().map(|p| (p.x, p.y)))
    }
}

/// Assigns a deterministic position to every node of the tree.
///
/// The root sits at the origin; the `n` children of a node at `(x, y)` are
/// evenly spaced by the parent-level spacing, centered so their mean x equals
/// `x`, one vertical step below `y`. No overlap detection is attempted:
/// pathologically wide sibling sets at different branches can collide, which
/// is accepted for outline-shaped content.
///
/// Positions are keyed by the canonical ids the tree already carries; a tree
/// that violates the id-uniqueness invariant is a caller bug and is not
/// detected here.
pub fn layout_tree(tree: &MapTree, options: &LayoutOptions) -> MapLayout {
    let mut layout = MapLayout::default();
    place(&tree.root, 0.0, 0.0, options, &mut layout);
    layout
}

fn place(node: &MapNode, x: f64, y: f64, options: &LayoutOptions, layout: &mut MapLayout) {
    layout.positions.insert(node.id.clone(), LayoutPoint { x, y });

    let n = node.children.len();
    if n == 0 {
        return;
    }

    let spacing = options.spacing(node.level);
    let start_x = x - (n as f64 - 1.0) * spacing / 2.0;
    let child_y = y - options.vertical_step;
    for (i, child) in node.children.iter().enumerate() {
        place(child, start_x + i as f64 * spacing, child_y, options, layout);
    }
}
