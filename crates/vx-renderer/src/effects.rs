//! Per-draw effect toggles.

/// Effect toggles applied to a single draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderEffects {
    /// Skip depth testing (and depth writes) for overlay passes.
    pub no_depth_test: bool,
    /// Cull front faces instead of back faces and flip the light, for
    /// see-through rendering.
    pub see_back: bool,
    /// Draw fully emissive even when a light direction is supplied.
    pub no_shading: bool,
    /// Blend the procedural grid overlay over solid faces.
    pub grid: bool,
}

impl RenderEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_no_depth_test(mut self) -> Self {
        self.no_depth_test = true;
        self
    }

    pub fn with_see_back(mut self) -> Self {
        self.see_back = true;
        self
    }

    pub fn with_no_shading(mut self) -> Self {
        self.no_shading = true;
        self
    }

    pub fn with_grid(mut self) -> Self {
        self.grid = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_everything_off() {
        assert_eq!(
            RenderEffects::default(),
            RenderEffects {
                no_depth_test: false,
                see_back: false,
                no_shading: false,
                grid: false,
            }
        );
    }

    #[test]
    fn test_builders_compose() {
        let effects = RenderEffects::new().with_see_back().with_grid();
        assert!(effects.see_back);
        assert!(effects.grid);
        assert!(!effects.no_depth_test);
        assert!(!effects.no_shading);
    }
}
