#![forbid(unsafe_code)]

//! Headless layout + SVG rendering for mapling mind maps.
//!
//! The pipeline is deterministic end to end: the same canonical tree always
//! yields the same positions, the same wrapped labels and the same SVG text.

pub mod layout;
pub mod model;
pub mod svg;
pub mod text;
pub mod theme;

pub use layout::{Bounds, LayoutOptions, LayoutPoint, MapLayout, layout_tree};
pub use model::{
    DEFAULT_WRAP_WIDTH, MapRenderEdge, MapRenderModel, MapRenderNode, build_render_model,
};
pub use svg::{SvgRenderOptions, render_svg};
pub use text::wrap_label;
pub use theme::Theme;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("layout has no position for node {id}")]
    MissingPosition { id: String },

    #[error("render model JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
