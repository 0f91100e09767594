use anyhow::{anyhow, bail, Result};
use glow::HasContext;

use crate::{
    buffer::{Buffer, BufferTarget},
    layout::VertexLayout,
};

pub struct VertexArray {
    pub vao: glow::VertexArray,
}

impl VertexArray {
    pub fn new(gl: &glow::Context) -> Result<Self> {
        let vao = unsafe { gl.create_vertex_array() }
            .map_err(|e| anyhow!("Couldn't create a vertex array: {e}"))?;

        Ok(Self { vao })
    }

    /// Binds the array and `buffer`, then declares every attribute of `layout`
    /// against it. The array stays bound.
    pub fn add_buffer(
        &self,
        gl: &glow::Context,
        buffer: &Buffer,
        layout: &VertexLayout,
    ) -> Result<()> {
        if buffer.target() != BufferTarget::Vertex {
            bail!("Only vertex buffers carry attributes");
        }

        self.bind(gl);
        buffer.bind(gl);

        for (location, offset, attribute) in layout.attributes() {
            unsafe {
                gl.vertex_attrib_pointer_f32(
                    location,
                    attribute.components,
                    attribute.kind.gl_enum(),
                    attribute.normalized,
                    layout.stride(),
                    offset,
                );
                gl.enable_vertex_attrib_array(location);
            }
        }

        Ok(())
    }

    pub fn bind(&self, gl: &glow::Context) {
        unsafe { gl.bind_vertex_array(Some(self.vao)) }
    }

    pub fn unbind(&self, gl: &glow::Context) {
        unsafe { gl.bind_vertex_array(None) }
    }

    pub fn free(&self, gl: &glow::Context) {
        unsafe { gl.delete_vertex_array(self.vao) }
    }
}
