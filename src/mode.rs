use std::fmt;

use glow::HasContext;
use log::warn;

use crate::shader::ShaderProgram;

/// Point size used while rasterizing vertices only.
pub const POINT_SIZE: f32 = 5.;
/// Vertex shader uniform copied into `gl_PointSize`.
pub const POINT_SIZE_UNIFORM: &str = "uPointSize";

/// Lets the vertex shader size points and hands it [`POINT_SIZE`]. Core profile
/// has no fixed-function point size, so this only matters in [`PolygonMode::Point`].
pub fn enable_point_size(gl: &glow::Context, program: &ShaderProgram) {
    unsafe { gl.enable(glow::PROGRAM_POINT_SIZE) };

    if !program.set_uniform_f32(gl, POINT_SIZE_UNIFORM, POINT_SIZE) {
        warn!("Vertex shader has no {POINT_SIZE_UNIFORM} uniform, points keep the default size");
    }
}

/// Rasterizer polygon mode, cycled by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PolygonMode {
    #[default]
    Fill,
    Line,
    Point,
}

impl PolygonMode {
    pub fn next(self) -> Self {
        match self {
            Self::Fill => Self::Line,
            Self::Line => Self::Point,
            Self::Point => Self::Fill,
        }
    }

    pub fn gl_enum(self) -> u32 {
        match self {
            Self::Fill => glow::FILL,
            Self::Line => glow::LINE,
            Self::Point => glow::POINT,
        }
    }

    pub fn apply(self, gl: &glow::Context) {
        unsafe { gl.polygon_mode(glow::FRONT_AND_BACK, self.gl_enum()) }
    }
}

impl fmt::Display for PolygonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fill => "fill",
            Self::Line => "line",
            Self::Point => "point",
        })
    }
}

/// Turns a held key into a single trigger until it is released.
#[derive(Debug, Default)]
pub struct KeyLatch {
    held: bool,
}

impl KeyLatch {
    /// True only for the first press since the last release.
    pub fn press(&mut self) -> bool {
        !std::mem::replace(&mut self.held, true)
    }

    pub fn release(&mut self) {
        self.held = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_filled() {
        assert_eq!(PolygonMode::default(), PolygonMode::Fill);
    }

    #[test]
    fn cycles_fill_line_point() {
        let mut mode = PolygonMode::Fill;
        let mut seen = Vec::new();
        for _ in 0..4 {
            mode = mode.next();
            seen.push(mode);
        }
        assert_eq!(
            seen,
            [
                PolygonMode::Line,
                PolygonMode::Point,
                PolygonMode::Fill,
                PolygonMode::Line
            ]
        );
    }

    #[test]
    fn modes_map_to_gl() {
        assert_eq!(PolygonMode::Fill.gl_enum(), glow::FILL);
        assert_eq!(PolygonMode::Line.gl_enum(), glow::LINE);
        assert_eq!(PolygonMode::Point.gl_enum(), glow::POINT);
    }

    #[test]
    fn shipped_vertex_shader_sizes_points() {
        let source = include_str!("../Shaders/vertex.shader");

        assert!(source.contains(&format!("uniform float {POINT_SIZE_UNIFORM};")));
        assert!(source.contains(&format!("gl_PointSize = {POINT_SIZE_UNIFORM};")));
        assert_eq!(POINT_SIZE, 5.);
    }

    #[test]
    fn held_key_triggers_once() {
        let mut latch = KeyLatch::default();
        assert!(latch.press());
        assert!(!latch.press());
        assert!(!latch.press());
    }

    #[test]
    fn release_rearms() {
        let mut latch = KeyLatch::default();
        assert!(latch.press());
        latch.release();
        assert!(latch.press());
    }

    #[test]
    fn release_without_press_is_harmless() {
        let mut latch = KeyLatch::default();
        latch.release();
        latch.release();
        assert!(latch.press());
    }
}
