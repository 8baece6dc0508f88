use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use tracing::info;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::camera::{Camera, Intents};
use crate::canvas::Canvas;
use crate::math::Vec2;
use crate::scale::Blitter;
use crate::scene::{Scene, starter_scene};

mod camera;
mod canvas;
mod math;
mod minimap;
mod raycast;
mod renderer;
mod scale;
mod scene;

// Internal framebuffer; the window stretches it, not the other way
// around, so ray count stays constant across resizes.
const FB_W: usize = 640;
const FB_H: usize = 480;

const MINIMAP_MARGIN: f32 = 8.0;
const MINIMAP_SIZE: f32 = 120.0;

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    scene: Scene,
    camera: Camera,
    intents: Intents,

    // Frame clock; None until the first redraw seeds it.
    prev_frame: Option<Instant>,

    fb: Vec<u32>,
    blitter: Blitter,

    frame_counter: u32,
    last_fps_log: Instant,
}

impl Default for App {
    fn default() -> Self {
        Self {
            window: None,
            surface: None,
            scene: starter_scene(),
            camera: Camera::new(
                Vec2::new(8.0 * 0.63, 7.0 * 0.63),
                5.0 * std::f32::consts::FRAC_PI_4,
            ),
            intents: Intents::default(),
            prev_frame: None,
            fb: vec![0; FB_W * FB_H],
            blitter: Blitter::new(0, 0, FB_W, FB_H),
            frame_counter: 0,
            last_fps_log: Instant::now(),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let attributes = Window::default_attributes()
            .with_title("gridcaster")
            .with_inner_size(LogicalSize::new(800.0, 600.0));

        let window = Rc::new(event_loop.create_window(attributes).expect("create window"));

        let context = softbuffer::Context::new(window.clone()).expect("softbuffer context");
        let surface =
            softbuffer::Surface::new(&context, window.clone()).expect("softbuffer surface");

        info!(
            rows = self.scene.height(),
            cols = self.scene.width(),
            "scene loaded"
        );

        self.surface = Some(surface);
        self.window = Some(window);
        self.window.as_ref().unwrap().request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                // Intents are edge-triggered; held-key repeats are noise.
                if repeat {
                    return;
                }
                if let PhysicalKey::Code(code) = physical_key {
                    let down = state == ElementState::Pressed;
                    match code {
                        KeyCode::KeyW | KeyCode::ArrowUp => self.intents.forward = down,
                        KeyCode::KeyS | KeyCode::ArrowDown => self.intents.backward = down,
                        KeyCode::KeyA | KeyCode::ArrowLeft => self.intents.turn_left = down,
                        KeyCode::KeyD | KeyCode::ArrowRight => self.intents.turn_right = down,
                        _ => {}
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                self.tick();

                let (window, surface) = match (&self.window, &mut self.surface) {
                    (Some(w), Some(s)) if w.id() == id => (w, s),
                    _ => return,
                };

                let size = window.inner_size();
                let (dw, dh) = (size.width as usize, size.height as usize);
                if dw == 0 || dh == 0 {
                    return; // Minimized window, skip drawing
                }

                surface
                    .resize(
                        NonZeroU32::new(dw as u32).unwrap(),
                        NonZeroU32::new(dh as u32).unwrap(),
                    )
                    .expect("resize surface");

                if self.blitter.dst_dims() != (dw, dh) {
                    self.blitter = Blitter::new(dw, dh, FB_W, FB_H);
                }

                let mut canvas = Canvas::new(&mut self.fb, FB_W, FB_H);
                renderer::render_view(&mut canvas, &self.scene, &self.camera);
                minimap::draw(
                    &mut canvas,
                    &self.scene,
                    &self.camera,
                    Vec2::new(MINIMAP_MARGIN, MINIMAP_MARGIN),
                    Vec2::new(MINIMAP_SIZE, MINIMAP_SIZE),
                );

                let mut buf = surface.buffer_mut().expect("surface buffer");
                self.blitter.stretch(&mut buf, &self.fb, FB_W);
                buf.present().expect("present frame");

                self.frame_counter += 1;
                let now = Instant::now();
                let elapsed = now.duration_since(self.last_fps_log).as_secs_f32();
                if elapsed >= 1.0 {
                    info!("fps: {:.1}", self.frame_counter as f32 / elapsed);
                    self.frame_counter = 0;
                    self.last_fps_log = now;
                }

                self.window.as_ref().unwrap().request_redraw();
            }

            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl App {
    /// Integrate one frame of motion. The first call only seeds the
    /// clock; a cap keeps dt sane after the app was paused.
    fn tick(&mut self) {
        let now = Instant::now();
        let dt = match self.prev_frame {
            Some(prev) => now.duration_since(prev).min(Duration::from_millis(100)),
            None => Duration::ZERO,
        };
        self.prev_frame = Some(now);
        self.camera.advance(&self.intents, dt.as_secs_f32());
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let event_loop = EventLoop::new().context("create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::default();
    event_loop.run_app(&mut app).context("run event loop")?;
    Ok(())
}
