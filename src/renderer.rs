use anyhow::Result;
use glow::HasContext;
use log::{error, info};
use ultraviolet::Vec4;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{Key, KeyCode, NamedKey, PhysicalKey},
    window::WindowId,
};

use crate::{
    buffer::{Buffer, INDEX_TYPE},
    config::Config,
    context::Context,
    mesh,
    mode::{self, KeyLatch, PolygonMode},
    shader::ShaderProgram,
    vertex_array::VertexArray,
};

const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.];

/// GPU resources of the one mesh being drawn.
struct Scene {
    program: ShaderProgram,
    vertex_array: VertexArray,
    vertex_buffer: Buffer,
    element_buffer: Buffer,
}

impl Scene {
    fn new(gl: &glow::Context, config: &Config) -> Result<Self> {
        let program = ShaderProgram::load(gl, &config.vertex_shader, &config.fragment_shader)?;
        mode::enable_point_size(gl, &program);

        // The element buffer binding is recorded into the VAO, so upload
        // both buffers while it is bound.
        let vertex_array = VertexArray::new(gl)?;
        vertex_array.bind(gl);

        let vertex_buffer = Buffer::vertex(gl, &mesh::vertices())?;
        let element_buffer = Buffer::element(gl, mesh::indices())?;
        vertex_array.add_buffer(gl, &vertex_buffer, &mesh::layout())?;

        vertex_buffer.unbind(gl);
        vertex_array.unbind(gl);

        Ok(Self {
            program,
            vertex_array,
            vertex_buffer,
            element_buffer,
        })
    }

    fn draw(&self, gl: &glow::Context) {
        self.program.bind(gl);
        self.vertex_array.bind(gl);
        unsafe {
            gl.draw_elements(
                glow::TRIANGLES,
                self.element_buffer.count() as i32,
                INDEX_TYPE,
                0,
            );
        }
    }

    fn free(&self, gl: &glow::Context) {
        self.vertex_array.free(gl);
        self.vertex_buffer.free(gl);
        self.element_buffer.free(gl);
        self.program.free(gl);
    }
}

pub struct Renderer {
    config: Config,
    ctx: Option<Context>,
    scene: Option<Scene>,

    polygon_mode: PolygonMode,
    toggle_key: KeyLatch,

    error: Option<anyhow::Error>,
}

impl Renderer {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ctx: None,
            scene: None,
            polygon_mode: PolygonMode::default(),
            toggle_key: KeyLatch::default(),
            error: None,
        }
    }

    /// The setup or frame error that stopped the event loop, if any.
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let ctx = Context::new(event_loop, &self.config)?;
        let scene = Scene::new(&ctx.gl, &self.config)?;

        set_viewport(&ctx.gl, ctx.window.inner_size());
        ctx.window.request_redraw();

        self.scene = Some(scene);
        self.ctx = Some(ctx);

        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("{err:#}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn resize(&self, size: PhysicalSize<u32>) {
        if let Some(ctx) = &self.ctx {
            ctx.resize(size);
            set_viewport(&ctx.gl, size);
        }
    }

    fn cycle_polygon_mode(&mut self) {
        let Some(ctx) = &self.ctx else {
            return;
        };

        info!("Polygon mode: {}", self.polygon_mode);
        self.polygon_mode = self.polygon_mode.next();
        self.polygon_mode.apply(&ctx.gl);
    }

    fn draw(&self) -> Result<()> {
        let (Some(ctx), Some(scene)) = (&self.ctx, &self.scene) else {
            return Ok(());
        };

        let clear = Vec4::from(CLEAR_COLOR);
        unsafe {
            ctx.gl.clear_color(clear.x, clear.y, clear.z, clear.w);
            ctx.gl.clear(glow::COLOR_BUFFER_BIT);
        }

        scene.draw(&ctx.gl);

        ctx.swap_buffers()?;
        ctx.window.request_redraw();

        Ok(())
    }
}

impl ApplicationHandler for Renderer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.ctx.is_some() {
            return;
        }

        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        logical_key: Key::Named(NamedKey::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::KeyW),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => {
                    if self.toggle_key.press() {
                        self.cycle_polygon_mode();
                    }
                }
                ElementState::Released => self.toggle_key.release(),
            },
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.draw() {
                    self.fail(event_loop, err);
                }
            }
            _ => (),
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        if let (Some(ctx), Some(scene)) = (self.ctx.as_ref(), self.scene.take()) {
            scene.free(&ctx.gl);
        }
    }
}

fn set_viewport(gl: &glow::Context, size: PhysicalSize<u32>) {
    unsafe { gl.viewport(0, 0, size.width as i32, size.height as i32) }
}
