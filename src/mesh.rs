use ultraviolet::Vec3;

use crate::layout::{AttributeKind, VertexLayout};

const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// Corners of the quad, counter-clockwise from bottom left.
pub fn vertices() -> [Vec3; 4] {
    [
        Vec3::new(-0.5, -0.5, 0.),
        Vec3::new(0.5, -0.5, 0.),
        Vec3::new(0.5, 0.5, 0.),
        Vec3::new(-0.5, 0.5, 0.),
    ]
}

/// Two triangles sharing the diagonal between corners 1 and 3.
pub fn indices() -> &'static [u32] {
    &QUAD_INDICES
}

/// Position only, three floats per vertex.
pub fn layout() -> VertexLayout {
    VertexLayout::new().with(AttributeKind::Float, 3)
}

#[cfg(test)]
mod tests {
    use std::mem::size_of;

    use super::*;

    #[test]
    fn indices_form_whole_triangles() {
        assert_eq!(indices().len() % 3, 0);
        assert_eq!(indices().len() / 3, 2);
    }

    #[test]
    fn indices_stay_in_range() {
        let count = vertices().len() as u32;
        assert!(indices().iter().all(|&i| i < count));
    }

    #[test]
    fn every_corner_is_used() {
        for corner in 0..vertices().len() as u32 {
            assert!(indices().contains(&corner), "corner {corner} unused");
        }
    }

    #[test]
    fn layout_stride_matches_vertex_type() {
        assert_eq!(layout().stride() as usize, size_of::<Vec3>());
        assert_eq!(bytemuck::cast_slice::<Vec3, u8>(&vertices()).len(), 48);
    }

    #[test]
    fn quad_lies_in_the_z_plane() {
        assert!(vertices().iter().all(|v| v.z == 0.));
        assert!(vertices().iter().all(|v| v.x.abs() == 0.5 && v.y.abs() == 0.5));
    }
}
