use anyhow::{anyhow, Result};
use bytemuck::Pod;
use glow::HasContext;

/// GL type of every element buffer entry.
pub const INDEX_TYPE: u32 = glow::UNSIGNED_INT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    Vertex,
    Element,
}

impl BufferTarget {
    pub fn gl_enum(self) -> u32 {
        match self {
            Self::Vertex => glow::ARRAY_BUFFER,
            Self::Element => glow::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// A single GPU buffer object filled once with static data.
///
/// Not freed on drop since deletion needs the GL context; call [`Buffer::free`].
pub struct Buffer {
    pub buffer: glow::Buffer,
    target: BufferTarget,
    count: usize,
}

impl Buffer {
    /// Creates the buffer and uploads `data`. The buffer is left bound.
    pub fn new<T: Pod>(gl: &glow::Context, target: BufferTarget, data: &[T]) -> Result<Self> {
        let buffer = unsafe { gl.create_buffer() }
            .map_err(|e| anyhow!("Couldn't create a {target:?} buffer: {e}"))?;

        let this = Self {
            buffer,
            target,
            count: data.len(),
        };

        this.bind(gl);
        unsafe {
            gl.buffer_data_u8_slice(
                target.gl_enum(),
                bytemuck::cast_slice(data),
                glow::STATIC_DRAW,
            );
        }

        Ok(this)
    }

    pub fn vertex<T: Pod>(gl: &glow::Context, data: &[T]) -> Result<Self> {
        Self::new(gl, BufferTarget::Vertex, data)
    }

    pub fn element(gl: &glow::Context, indices: &[u32]) -> Result<Self> {
        Self::new(gl, BufferTarget::Element, indices)
    }

    pub fn bind(&self, gl: &glow::Context) {
        unsafe { gl.bind_buffer(self.target.gl_enum(), Some(self.buffer)) }
    }

    pub fn unbind(&self, gl: &glow::Context) {
        unsafe { gl.bind_buffer(self.target.gl_enum(), None) }
    }

    pub fn target(&self) -> BufferTarget {
        self.target
    }

    /// Number of elements uploaded; the index count for element buffers.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn free(&self, gl: &glow::Context) {
        unsafe { gl.delete_buffer(self.buffer) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_map_to_gl_binding_points() {
        assert_eq!(BufferTarget::Vertex.gl_enum(), glow::ARRAY_BUFFER);
        assert_eq!(BufferTarget::Element.gl_enum(), glow::ELEMENT_ARRAY_BUFFER);
    }

    #[test]
    fn index_type_matches_element_width() {
        assert_eq!(INDEX_TYPE, glow::UNSIGNED_INT);
        assert_eq!(std::mem::size_of::<u32>(), 4);
    }
}
