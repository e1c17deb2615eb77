use crate::params::FieldParams;

/// Immutable configuration passed to the renderer at start-up.
///
/// `RendererConfig` mirrors CLI flags and tells the renderer how large the
/// window should be, what to call it, which parameter values to start from,
/// and whether mouse state should be forwarded to the shader.
#[derive(Clone, Debug)]
pub struct RendererConfig {
    /// Window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Title of the preview window.
    pub window_title: String,
    /// Initial zoom/duration/power values.
    pub initial_params: FieldParams,
    /// Forward cursor position and left-button state as the `iMouse` uniform.
    ///
    /// The shader carries a view override that only activates while a button
    /// is held; with forwarding disabled the uniform stays zero and the
    /// branch is inert.
    pub forward_mouse: bool,
}

impl Default for RendererConfig {
    /// Provides the classic 800x600 window with the stock parameters.
    fn default() -> Self {
        Self {
            surface_size: (800, 600),
            window_title: "Dynamic OpenGL Shader".to_string(),
            initial_params: FieldParams::default(),
            forward_mouse: false,
        }
    }
}
