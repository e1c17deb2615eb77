use std::borrow::Cow;

use thiserror::Error;
use wgpu::naga::ShaderStage;

/// Shader compilation failure surfaced from wgpu's validation layer.
///
/// The original demo never inspected compile status and happily drew with a
/// broken program; here a failed stage aborts start-up with the driver log
/// instead.
#[derive(Debug, Error)]
#[error("failed to compile {stage} shader: {message}")]
pub struct ShaderCompileError {
    stage: &'static str,
    message: String,
}

/// Compiles the quad passthrough vertex shader.
pub(crate) fn compile_vertex_shader(
    device: &wgpu::Device,
) -> Result<wgpu::ShaderModule, ShaderCompileError> {
    compile_stage(
        device,
        VERTEX_SHADER_GLSL,
        ShaderStage::Vertex,
        "quad vertex",
    )
}

/// Compiles the particle-field fragment shader.
pub(crate) fn compile_fragment_shader(
    device: &wgpu::Device,
) -> Result<wgpu::ShaderModule, ShaderCompileError> {
    compile_stage(
        device,
        FRAGMENT_SHADER_GLSL,
        ShaderStage::Fragment,
        "particle field fragment",
    )
}

/// Runs one GLSL stage through naga inside a validation error scope so a
/// bad shader comes back as a `Result` rather than an uncaptured error.
fn compile_stage(
    device: &wgpu::Device,
    source: &'static str,
    stage: ShaderStage,
    label: &'static str,
) -> Result<wgpu::ShaderModule, ShaderCompileError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(source),
            stage,
            defines: &[],
        },
    });
    if let Some(error) = pollster::block_on(device.pop_error_scope()) {
        return Err(ShaderCompileError {
            stage: label,
            message: error.to_string(),
        });
    }
    Ok(module)
}

/// Passthrough vertex stage for the full-screen quad. The quad corners are a
/// real vertex buffer (not a generated triangle) so the geometry upload stays
/// a one-time, never-rewritten buffer.
const VERTEX_SHADER_GLSL: &str = r"#version 450
layout(location = 0) in vec3 a_pos;
layout(location = 0) out vec2 v_uv;

void main() {
    v_uv = (a_pos.xy + vec2(1.0)) * 0.5;
    gl_Position = vec4(a_pos, 1.0);
}
";

/// The particle-field evaluator, ported as-is from the original demo. The
/// uniform block layout must match `FieldUniforms` in `gpu/uniforms.rs`; the
/// macros keep the body's original uniform names intact.
const FRAGMENT_SHADER_GLSL: &str = r"#version 450
layout(location = 0) in vec2 v_uv;
layout(location = 0) out vec4 outColor;

layout(std140, set = 0, binding = 0) uniform FieldParams {
    vec2 _iResolution;
    float _iTime;
    float _zoomFactor;
    vec4 _iMouse;
    float _durationFactor;
    float _powerFactor;
    vec2 _padding;
} ubo;

#define iResolution ubo._iResolution
#define iTime ubo._iTime
#define iMouse ubo._iMouse
#define zoomFactor ubo._zoomFactor
#define durationFactor ubo._durationFactor
#define powerFactor ubo._powerFactor

void mainImage(out vec4 fragColor, in vec2 fragCoord) {
    float t = iTime + 5.0;
    float z = zoomFactor;

    const int n = 100; // particle count
    vec3 startColor = vec3(0.5 + 0.5 * sin(iTime * 0.5), 0.5 + 0.5 * sin(iTime * 0.7), 0.5 + 0.5 * sin(iTime * 0.9));
    vec3 endColor = vec3(0.5 + 0.5 * sin(iTime * 0.3), 0.5 + 0.5 * sin(iTime * 0.6), 0.5 + 0.5 * sin(iTime * 0.8));

    float startRadius = 0.84;
    float endRadius = 1.6;

    float power = powerFactor;
    float duration = durationFactor;

    vec2 s = iResolution.xy;
    vec2 v = z * (2.0 * fragCoord - s) / s.y;

    if (iMouse.z > 0.0) v *= iMouse.y / s.y * 20.0;
    if (iMouse.z > 0.0) duration = iMouse.x / s.x * 10.0;

    vec3 col = vec3(0.0);

    float dMax = duration;

    float evo = (sin(iTime * 0.01 + 400.0) * 0.5 + 0.5) * 99.0 + 1.0;
    float mb = 0.0;
    float mbRadius = 0.0;
    float sum = 0.0;

    for (int i = 0; i < n; i++) {
        float d = fract(t * power + 48934.4238 * sin(float(i / int(evo)) * 692.7398));
        float a = 6.28 * float(i) / float(n);
        float x = d * cos(a) * duration;
        float y = d * sin(a) * duration;

        float distRatio = d / dMax;
        mbRadius = mix(startRadius, endRadius, distRatio);

        vec2 p = v - vec2(x, y);
        mb = mbRadius / dot(p, p);

        sum += mb;
        col = mix(col, mix(startColor, endColor, distRatio), mb / sum);
    }

    sum /= float(n);
    col = normalize(col) * sum;
    sum = clamp(sum, 0.0, 0.4);

    vec3 tex = vec3(1.0);
    col *= smoothstep(tex, vec3(0.0), vec3(sum));

    fragColor.rgb = col;
}

void main() {
    vec4 color = vec4(0.0);
    mainImage(color, v_uv * iResolution);
    outColor = vec4(color.rgb, 1.0);
}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_source_keeps_the_original_uniform_surface() {
        for name in [
            "iTime",
            "iResolution",
            "iMouse",
            "zoomFactor",
            "durationFactor",
            "powerFactor",
        ] {
            assert!(
                FRAGMENT_SHADER_GLSL.contains(name),
                "fragment shader lost uniform {name}"
            );
        }
        assert!(FRAGMENT_SHADER_GLSL.contains("mainImage"));
    }

    #[test]
    fn vertex_source_declares_the_quad_attribute() {
        assert!(VERTEX_SHADER_GLSL.contains("layout(location = 0) in vec3 a_pos"));
    }
}
