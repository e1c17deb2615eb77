//! CPU port of the particle-field fragment shader.
//!
//! This mirrors the GLSL in [`crate::compile`] operation for operation so the
//! per-pixel function can be exercised off the GPU. The field is a pure
//! function of `(fragCoord, time, resolution, params, mouse)`: one hundred
//! synthetic particles whose positions are closed-form in the particle index,
//! accumulated with an inverse-square metaball falloff.

use glam::{vec2, vec3, Vec2, Vec3, Vec4};

use crate::params::FieldParams;

/// Particle count baked into the shader.
pub const PARTICLE_COUNT: usize = 100;

/// GLSL `fract`: always the distance above the floor, even for negatives.
/// `f32::fract` truncates toward zero instead, which would diverge from the
/// shader for negative phases (reachable once `power` goes negative).
fn glsl_fract(x: f32) -> f32 {
    x - x.floor()
}

/// GLSL `mix` for scalars.
fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// GLSL `smoothstep`, applied here with edge0 > edge1 like the shader does
/// for its vignette (edge0 = 1, edge1 = 0).
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Evaluates the field for one pixel and returns the RGB color.
///
/// `frag_coord` uses the shader's bottom-left origin convention and `mouse`
/// carries `(x, y, buttonDown, _)`; the override branch only fires while
/// `mouse.z > 0`.
pub fn evaluate(
    frag_coord: Vec2,
    time: f32,
    resolution: Vec2,
    params: FieldParams,
    mouse: Vec4,
) -> Vec3 {
    let t = time + 5.0;
    let z = params.zoom;

    let start_color = vec3(
        0.5 + 0.5 * (time * 0.5).sin(),
        0.5 + 0.5 * (time * 0.7).sin(),
        0.5 + 0.5 * (time * 0.9).sin(),
    );
    let end_color = vec3(
        0.5 + 0.5 * (time * 0.3).sin(),
        0.5 + 0.5 * (time * 0.6).sin(),
        0.5 + 0.5 * (time * 0.8).sin(),
    );

    let start_radius = 0.84_f32;
    let end_radius = 1.6_f32;

    let power = params.power;
    let mut duration = params.duration;

    let s = resolution;
    let mut v = z * (2.0 * frag_coord - s) / s.y;

    if mouse.z > 0.0 {
        v *= mouse.y / s.y * 20.0;
        duration = mouse.x / s.x * 10.0;
    }

    let mut col = Vec3::ZERO;
    let d_max = duration;

    // Slow oscillation between 1 and 100 that groups particle indices into
    // orbit cohorts via integer division below.
    let evo = ((time * 0.01 + 400.0).sin() * 0.5 + 0.5) * 99.0 + 1.0;
    let mut sum = 0.0_f32;

    for i in 0..PARTICLE_COUNT as i32 {
        // Hash-like phase in [0,1); the integer division is deliberate and
        // matches the GLSL `float(i / int(evo))`.
        let d = glsl_fract(t * power + 48934.4238 * ((i / evo as i32) as f32 * 692.7398).sin());
        let a = 6.28 * i as f32 / PARTICLE_COUNT as f32;
        let x = d * a.cos() * duration;
        let y = d * a.sin() * duration;

        let dist_ratio = d / d_max;
        let mb_radius = mix(start_radius, end_radius, dist_ratio);

        let p = v - vec2(x, y);
        let mb = mb_radius / p.dot(p);

        sum += mb;
        col = col.lerp(start_color.lerp(end_color, dist_ratio), mb / sum);
    }

    sum /= PARTICLE_COUNT as f32;
    col = col.normalize() * sum;
    sum = sum.clamp(0.0, 0.4);

    // Vignette: darken toward black as the accumulated field thins out.
    col * smoothstep(1.0, 0.0, sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec4;

    const RESOLUTION: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn glsl_fract_handles_negatives() {
        assert!((glsl_fract(1.25) - 0.25).abs() < 1e-6);
        assert!((glsl_fract(-1.25) - 0.75).abs() < 1e-6);
        assert!(glsl_fract(-0.0) >= 0.0);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let coord = vec2(400.0, 300.0);
        let first = evaluate(coord, 12.5, RESOLUTION, FieldParams::default(), Vec4::ZERO);
        let second = evaluate(coord, 12.5, RESOLUTION, FieldParams::default(), Vec4::ZERO);
        assert_eq!(first.to_array(), second.to_array());
    }

    #[test]
    fn center_pixel_at_start_is_finite_and_bounded() {
        let color = evaluate(
            vec2(400.0, 300.0),
            0.0,
            RESOLUTION,
            FieldParams::default(),
            Vec4::ZERO,
        );
        for channel in color.to_array() {
            assert!(channel.is_finite());
            // The palette is non-negative and so are the blend weights; only
            // the magnitude is unbounded (`sum` scales the color before the
            // clamp), so we do not assert an upper bound here.
            assert!(channel >= 0.0);
        }
    }

    #[test]
    fn sample_grid_stays_finite() {
        let params = FieldParams::default();
        for gx in 0..8 {
            for gy in 0..6 {
                let coord = vec2(gx as f32 * 100.0 + 50.0, gy as f32 * 100.0 + 50.0);
                for time in [0.0, 1.0, 17.3] {
                    let color = evaluate(coord, time, RESOLUTION, params, Vec4::ZERO);
                    assert!(
                        color.to_array().iter().all(|c| c.is_finite()),
                        "non-finite color at {coord:?} t={time}"
                    );
                }
            }
        }
    }

    #[test]
    fn released_mouse_never_influences_output() {
        let coord = vec2(123.0, 456.0);
        let idle = evaluate(coord, 3.0, RESOLUTION, FieldParams::default(), Vec4::ZERO);
        let hover = evaluate(
            coord,
            3.0,
            RESOLUTION,
            FieldParams::default(),
            vec4(640.0, 120.0, 0.0, 0.0),
        );
        assert_eq!(idle.to_array(), hover.to_array());
    }

    #[test]
    fn pressed_mouse_overrides_the_view() {
        let coord = vec2(123.0, 456.0);
        let idle = evaluate(coord, 3.0, RESOLUTION, FieldParams::default(), Vec4::ZERO);
        let dragged = evaluate(
            coord,
            3.0,
            RESOLUTION,
            FieldParams::default(),
            vec4(640.0, 120.0, 1.0, 0.0),
        );
        assert_ne!(idle.to_array(), dragged.to_array());
    }

    #[test]
    fn negative_power_is_tolerated() {
        let params = FieldParams {
            power: -0.25,
            ..FieldParams::default()
        };
        let color = evaluate(vec2(10.0, 10.0), 8.0, RESOLUTION, params, Vec4::ZERO);
        assert!(color.to_array().iter().all(|c| c.is_finite()));
    }
}
