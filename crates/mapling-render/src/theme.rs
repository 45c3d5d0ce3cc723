use serde::{Deserialize, Serialize};

/// Level-indexed visual configuration: an ordered color palette plus the
/// size and font curves.
///
/// Everything here is a pure function of `level`; two nodes at the same
/// level always look the same. The palette cycles (`level mod len`), the
/// curves decrease linearly down to a floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub palette: Vec<String>,
    pub base_radius: f64,
    pub radius_step: f64,
    pub min_radius: f64,
    pub base_font_size: f64,
    pub font_size_step: f64,
    pub min_font_size: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            palette: [
                "#ff6b6b", "#4ecdc4", "#45b7d1", "#f9ca24", "#6c5ce7", "#fd79a8",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            base_radius: 48.0,
            radius_step: 8.0,
            min_radius: 26.0,
            base_font_size: 14.0,
            font_size_step: 2.0,
            min_font_size: 8.0,
        }
    }
}

impl Theme {
    pub fn color(&self, level: u32) -> &str {
        if self.palette.is_empty() {
            return "#888888";
        }
        &self.palette[level as usize % self.palette.len()]
    }

    pub fn radius(&self, level: u32) -> f64 {
        (self.base_radius - level as f64 * self.radius_step).max(self.min_radius)
    }

    pub fn font_size(&self, level: u32) -> f64 {
        (self.base_font_size - level as f64 * self.font_size_step).max(self.min_font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_by_level() {
        let theme = Theme::default();
        let len = theme.palette.len() as u32;
        for level in 0..len * 2 {
            assert_eq!(theme.color(level), theme.color(level % len));
        }
        assert_eq!(theme.color(0), "#ff6b6b");
        assert_eq!(theme.color(len), "#ff6b6b");
    }

    #[test]
    fn curves_decrease_to_a_floor() {
        let theme = Theme::default();
        for level in 0..20u32 {
            assert!(theme.radius(level + 1) <= theme.radius(level));
            assert!(theme.font_size(level + 1) <= theme.font_size(level));
        }
        assert_eq!(theme.radius(19), theme.min_radius);
        assert_eq!(theme.font_size(19), theme.min_font_size);
    }

    #[test]
    fn same_level_same_style() {
        let theme = Theme::default();
        assert_eq!(theme.color(3), theme.color(3));
        assert_eq!(theme.radius(3), theme.radius(3));
        assert_eq!(theme.font_size(3), theme.font_size(3));
    }

    #[test]
    fn empty_palette_has_a_fallback_color() {
        let theme = Theme {
            palette: Vec::new(),
            ..Theme::default()
        };
        assert_eq!(theme.color(0), "#888888");
    }
}
