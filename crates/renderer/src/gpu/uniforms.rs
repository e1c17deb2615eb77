use bytemuck::{Pod, Zeroable};

use crate::params::FieldParams;

/// Per-frame shader inputs, laid out to match the std140 `FieldParams`
/// uniform block declared in `compile.rs`.
///
/// Nothing here survives a frame: resolution changes only on resize, time is
/// sampled from the wall clock, and the three interaction values are read
/// from the owning window state each redraw.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug)]
pub(crate) struct FieldUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub zoom: f32,
    pub mouse: [f32; 4],
    pub duration: f32,
    pub power: f32,
    pub _padding: [f32; 2],
}

unsafe impl Zeroable for FieldUniforms {}
unsafe impl Pod for FieldUniforms {}

impl FieldUniforms {
    pub fn new(width: u32, height: u32, params: FieldParams) -> Self {
        let mut uniforms = Self {
            resolution: [width as f32, height as f32],
            time: 0.0,
            zoom: 0.0,
            mouse: [0.0; 4],
            duration: 0.0,
            power: 0.0,
            _padding: [0.0; 2],
        };
        uniforms.set_params(params);
        uniforms
    }

    pub fn set_resolution(&mut self, width: f32, height: f32) {
        self.resolution = [width, height];
    }

    pub fn set_params(&mut self, params: FieldParams) {
        self.zoom = params.zoom;
        self.duration = params.duration;
        self.power = params.power;
    }

    pub fn update_frame(&mut self, seconds: f32, params: FieldParams, mouse: [f32; 4]) {
        self.time = seconds;
        self.mouse = mouse;
        self.set_params(params);
    }
}
