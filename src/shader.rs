use std::{fmt, fs, path::Path};

use anyhow::{anyhow, bail, Context as AnyhowContext, Result};
use glow::HasContext;
use log::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    pub fn gl_enum(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "Vertex",
            Self::Fragment => "Fragment",
        })
    }
}

/// Reads a whole shader source file.
pub fn read_source(stage: Stage, path: &Path) -> Result<String> {
    info!("Loading {stage} Shader");

    fs::read_to_string(path)
        .inspect_err(|_| error!("Unable to open {stage} Shader"))
        .with_context(|| format!("Unable to open {stage} shader at {}", path.display()))
}

/// Linked vertex + fragment program.
pub struct ShaderProgram {
    pub program: glow::Program,
}

impl ShaderProgram {
    /// Reads both stages from disk, compiles and links them, and makes the
    /// program current.
    pub fn load(gl: &glow::Context, vertex_path: &Path, fragment_path: &Path) -> Result<Self> {
        let vertex_source = read_source(Stage::Vertex, vertex_path)?;
        let fragment_source = read_source(Stage::Fragment, fragment_path)?;

        info!("Compiling Shaders");
        Self::from_sources(gl, &vertex_source, &fragment_source)
    }

    pub fn from_sources(gl: &glow::Context, vertex: &str, fragment: &str) -> Result<Self> {
        let vertex = compile(gl, Stage::Vertex, vertex)?;
        let fragment = match compile(gl, Stage::Fragment, fragment) {
            Ok(shader) => shader,
            Err(e) => {
                unsafe { gl.delete_shader(vertex) };
                return Err(e);
            }
        };

        unsafe {
            let program = match gl.create_program() {
                Ok(program) => program,
                Err(e) => {
                    gl.delete_shader(vertex);
                    gl.delete_shader(fragment);
                    bail!("Couldn't create a shader program: {e}");
                }
            };

            gl.attach_shader(program, vertex);
            gl.attach_shader(program, fragment);
            gl.link_program(program);

            gl.detach_shader(program, vertex);
            gl.detach_shader(program, fragment);
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                bail!("Failed to link shader program: {}", log.trim_end());
            }

            let this = Self { program };
            this.bind(gl);
            Ok(this)
        }
    }

    pub fn bind(&self, gl: &glow::Context) {
        unsafe { gl.use_program(Some(self.program)) }
    }

    /// Binds the program and sets `name`. False when the shader has no such
    /// active uniform.
    pub fn set_uniform_f32(&self, gl: &glow::Context, name: &str, value: f32) -> bool {
        self.bind(gl);
        unsafe {
            let location = gl.get_uniform_location(self.program, name);
            gl.uniform_1_f32(location.as_ref(), value);
            location.is_some()
        }
    }

    pub fn free(&self, gl: &glow::Context) {
        unsafe { gl.delete_program(self.program) }
    }
}

fn compile(gl: &glow::Context, stage: Stage, source: &str) -> Result<glow::Shader> {
    unsafe {
        let shader = gl
            .create_shader(stage.gl_enum())
            .map_err(|e| anyhow!("Couldn't create a {stage} shader: {e}"))?;

        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            bail!("Failed to compile {stage} shader: {}", log.trim_end());
        }

        Ok(shader)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn stages_map_to_gl_kinds() {
        assert_eq!(Stage::Vertex.gl_enum(), glow::VERTEX_SHADER);
        assert_eq!(Stage::Fragment.gl_enum(), glow::FRAGMENT_SHADER);
        assert_eq!(Stage::Fragment.to_string(), "Fragment");
    }

    #[test]
    fn reads_whole_source_file() {
        let source = "#version 330 core\nvoid main() {}\n";
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(source.as_bytes()).unwrap();

        assert_eq!(read_source(Stage::Vertex, file.path()).unwrap(), source);
    }

    #[test]
    fn missing_file_names_stage_and_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fragment.shader");

        let err = read_source(Stage::Fragment, &path).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Fragment"), "{message}");
        assert!(message.contains("fragment.shader"), "{message}");
    }
}
