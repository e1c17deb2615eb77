use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::{error, info, trace, warn};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowBuilder};

use crate::gpu::GpuState;
use crate::params::{FieldParams, ParamAction};
use crate::types::RendererConfig;

/// Aggregates the GPU state and interaction state for the one window this
/// demo ever opens. The parameters live here, not in a global: the event
/// loop is the only writer and the render call the only reader.
struct WindowState {
    window: Arc<Window>,
    gpu: GpuState,
    params: FieldParams,
    mouse: MouseState,
    forward_mouse: bool,
}

impl WindowState {
    fn new(window: Arc<Window>, config: &RendererConfig) -> Result<Self> {
        let size = window.inner_size();
        let gpu = GpuState::new(window.as_ref(), size, config.initial_params)?;
        Ok(Self {
            window,
            gpu,
            params: config.initial_params,
            mouse: MouseState::default(),
            forward_mouse: config.forward_mouse,
        })
    }

    fn size(&self) -> PhysicalSize<u32> {
        self.gpu.size()
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.gpu.resize(new_size);
    }

    fn handle_param_key(&mut self, key: &Key) {
        if let Some(action) = action_for_key(key) {
            self.params.apply(action);
            trace!(
                ?action,
                zoom = self.params.zoom,
                duration = self.params.duration,
                power = self.params.power,
                "adjusted field parameters"
            );
        }
    }

    fn render_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let mouse_uniform = if self.forward_mouse {
            self.mouse.as_uniform(self.size().height.max(1) as f32)
        } else {
            [0.0; 4]
        };
        self.gpu.render(self.params, mouse_uniform)
    }
}

/// Opens the window and drives the render loop until the user closes it.
///
/// The loop has exactly two states, running and closed; the only transition
/// is the window-close request. Every iteration clears, pushes the current
/// uniforms, issues the single quad draw, and presents (vsync-gated by the
/// Fifo swapchain, no pacing of our own).
pub fn run_windowed(config: RendererConfig) -> Result<()> {
    let event_loop =
        EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;

    let window_size = PhysicalSize::new(config.surface_size.0, config.surface_size.1);
    let window = WindowBuilder::new()
        .with_title(config.window_title.clone())
        .with_inner_size(window_size)
        .with_resizable(false)
        .build(&event_loop)
        .map_err(|err| anyhow!("failed to create window: {err}"))?;
    let window = Arc::new(window);

    let mut state = WindowState::new(window.clone(), &config)?;
    info!(
        width = window_size.width,
        height = window_size.height,
        forward_mouse = config.forward_mouse,
        "particle field renderer ready"
    );

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { window_id, event } if window_id == state.window.id() => {
                    match event {
                        WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                            elwt.exit();
                        }
                        WindowEvent::KeyboardInput { event, .. } => {
                            // Presses and key repeats both step the value;
                            // releases are a no-op.
                            if event.state == ElementState::Pressed {
                                state.handle_param_key(&event.logical_key);
                            }
                        }
                        WindowEvent::CursorMoved { position, .. } => {
                            if state.forward_mouse {
                                state.mouse.handle_cursor_moved(position);
                            }
                        }
                        WindowEvent::MouseInput {
                            state: button_state,
                            button: MouseButton::Left,
                            ..
                        } => {
                            if state.forward_mouse {
                                state.mouse.handle_button(button_state);
                            }
                        }
                        WindowEvent::Resized(new_size) => {
                            state.resize(new_size);
                        }
                        WindowEvent::RedrawRequested => match state.render_frame() {
                            Ok(()) => {}
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                state.resize(state.size());
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                error!("surface out of memory; exiting");
                                elwt.exit();
                            }
                            Err(err) => {
                                warn!(error = ?err, "surface error; retrying next frame");
                            }
                        },
                        _ => {}
                    }
                }
                Event::AboutToWait => {
                    state.window.request_redraw();
                }
                _ => {}
            }
        })
        .map_err(|err| anyhow!("window event loop error: {err}"))
}

/// Maps the six bound keys to parameter adjustments. Everything else is
/// ignored.
fn action_for_key(key: &Key) -> Option<ParamAction> {
    match key {
        Key::Named(NamedKey::ArrowUp) => Some(ParamAction::ZoomIn),
        Key::Named(NamedKey::ArrowDown) => Some(ParamAction::ZoomOut),
        Key::Named(NamedKey::ArrowLeft) => Some(ParamAction::PowerDown),
        Key::Named(NamedKey::ArrowRight) => Some(ParamAction::PowerUp),
        Key::Character(value) => match value.as_str() {
            "w" | "W" => Some(ParamAction::DurationUp),
            "s" | "S" => Some(ParamAction::DurationDown),
            _ => None,
        },
        _ => None,
    }
}

/// Cursor and button state forwarded to the shader's `iMouse` uniform when
/// `--mouse` is set. The y coordinate is flipped to the shader's bottom-left
/// origin; `z` carries the held-button flag the override branch checks.
#[derive(Default)]
struct MouseState {
    position: Option<PhysicalPosition<f64>>,
    is_pressed: bool,
}

impl MouseState {
    fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.position = Some(position);
    }

    fn handle_button(&mut self, state: ElementState) {
        self.is_pressed = matches!(state, ElementState::Pressed);
    }

    fn as_uniform(&self, height: f32) -> [f32; 4] {
        let mut data = [0.0; 4];

        if let Some(pos) = self.position {
            data[0] = pos.x as f32;
            data[1] = height - pos.y as f32;
        }
        if self.is_pressed {
            data[2] = 1.0;
        }

        data
    }
}

#[cfg(test)]
mod tests {
    use winit::keyboard::SmolStr;

    use super::*;

    #[test]
    fn arrow_and_letter_keys_map_to_actions() {
        assert_eq!(
            action_for_key(&Key::Named(NamedKey::ArrowUp)),
            Some(ParamAction::ZoomIn)
        );
        assert_eq!(
            action_for_key(&Key::Named(NamedKey::ArrowDown)),
            Some(ParamAction::ZoomOut)
        );
        assert_eq!(
            action_for_key(&Key::Named(NamedKey::ArrowLeft)),
            Some(ParamAction::PowerDown)
        );
        assert_eq!(
            action_for_key(&Key::Named(NamedKey::ArrowRight)),
            Some(ParamAction::PowerUp)
        );
        assert_eq!(
            action_for_key(&Key::Character(SmolStr::new("w"))),
            Some(ParamAction::DurationUp)
        );
        assert_eq!(
            action_for_key(&Key::Character(SmolStr::new("S"))),
            Some(ParamAction::DurationDown)
        );
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(action_for_key(&Key::Named(NamedKey::Space)), None);
        assert_eq!(action_for_key(&Key::Named(NamedKey::Escape)), None);
        assert_eq!(action_for_key(&Key::Character(SmolStr::new("q"))), None);
    }

    #[test]
    fn mouse_uniform_flips_y_and_flags_the_button() {
        let mut mouse = MouseState::default();
        mouse.handle_cursor_moved(PhysicalPosition::new(100.0, 50.0));
        mouse.handle_button(ElementState::Pressed);
        assert_eq!(mouse.as_uniform(600.0), [100.0, 550.0, 1.0, 0.0]);

        mouse.handle_button(ElementState::Released);
        assert_eq!(mouse.as_uniform(600.0), [100.0, 550.0, 0.0, 0.0]);
    }
}
