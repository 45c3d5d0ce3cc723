#![forbid(unsafe_code)]

//! `mapling` turns free-form language-model output into a rendered mind map.
//!
//! The core (always available) recovers a tree from loose text and
//! canonicalizes it; see [`build_diagram`]. Everything downstream is opt-in:
//!
//! # Features
//!
//! - `render`: layout, math-aware label wrapping and headless SVG output
//!   (`mapling::render`)
//! - `raster`: PNG/JPG artifacts via pure-Rust SVG rasterization, plus
//!   collision-free output file naming

pub use mapling_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use mapling_render::{
        Bounds, DEFAULT_WRAP_WIDTH, LayoutOptions, LayoutPoint, MapLayout, MapRenderEdge,
        MapRenderModel, MapRenderNode, SvgRenderOptions, Theme, build_render_model, layout_tree,
        render_svg, wrap_label,
    };

    #[cfg(feature = "raster")]
    pub mod artifact;
    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Render(#[from] mapling_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// One bundle of knobs for the whole text-to-SVG pipeline.
    #[derive(Debug, Clone)]
    pub struct GenerateOptions {
        pub layout: LayoutOptions,
        pub theme: Theme,
        /// Maximum label line width, in characters.
        pub wrap_width: usize,
        pub svg: SvgRenderOptions,
    }

    impl Default for GenerateOptions {
        fn default() -> Self {
            Self {
                layout: LayoutOptions::default(),
                theme: Theme::default(),
                wrap_width: DEFAULT_WRAP_WIDTH,
                svg: SvgRenderOptions::default(),
            }
        }
    }

    /// Text in, SVG out: recover + canonicalize + layout + wrap + draw.
    ///
    /// Structure problems never surface here (the tree degrades to the
    /// default skeleton); the only error path is the renderer-facing adapter
    /// contract, which a composed pipeline cannot actually violate.
    pub fn render_mindmap_svg(text: &str, options: &GenerateOptions) -> Result<String> {
        let tree = mapling_core::build_diagram(text);
        let model = layout_render_model(&tree, options)?;
        Ok(render_svg(&model, &options.svg))
    }

    /// Lays a canonical tree out and builds its render model.
    pub fn layout_render_model(
        tree: &mapling_core::MapTree,
        options: &GenerateOptions,
    ) -> Result<MapRenderModel> {
        let layout = layout_tree(tree, &options.layout);
        Ok(build_render_model(
            tree,
            &layout,
            &options.theme,
            options.wrap_width,
        )?)
    }

}
