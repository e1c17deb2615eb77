//! GPU plumbing split the same way the work splits: `context` owns the
//! device/surface pair, `pipeline` the compiled program and quad, `uniforms`
//! the per-frame block, and `state` ties them into a render call.

mod context;
mod pipeline;
mod state;
mod uniforms;

pub(crate) use state::GpuState;
