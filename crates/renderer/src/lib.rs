//! Renderer crate for the particle-field demo.
//!
//! The flow is intentionally small:
//!
//! ```text
//!   CLI / particlefield
//!          │ RendererConfig
//!          ▼
//!   run_windowed ──▶ WindowState ──▶ winit event loop ──▶ render_frame()
//!          ▲                                   │
//!          │                                   └─▶ FieldUniforms ─▶ GPU UBO
//! ```
//!
//! `WindowState` owns the GPU resources (surface, device, pipeline, quad,
//! uniform buffer) plus the three interaction parameters mutated by the
//! keyboard. The fragment shader itself is embedded in [`compile`] and ported
//! verbatim from the original demo; [`field`] carries a CPU port of the same
//! math so the per-pixel function can be exercised in tests.

mod compile;
pub mod field;
mod gpu;
mod params;
mod types;
mod window;

pub use compile::ShaderCompileError;
pub use params::{FieldParams, ParamAction};
pub use types::RendererConfig;
pub use window::run_windowed;
