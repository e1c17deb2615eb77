/// The three shader parameters the user can steer from the keyboard.
///
/// These are plain accumulators, not a state machine: each key press (or
/// repeat) nudges one field by a fixed step and nothing clamps the result.
/// The shader math tolerates negative and large values, so drifting out of
/// the "pretty" range is allowed on purpose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParams {
    /// View scale applied to the pixel coordinate before field evaluation.
    pub zoom: f32,
    /// Orbit span: how far particles travel from the center.
    pub duration: f32,
    /// Phase advance rate of the per-particle pseudo-random cycle.
    pub power: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            duration: 4.0,
            power: 0.51,
        }
    }
}

/// One discrete adjustment, produced by the key mapping in the window loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamAction {
    ZoomIn,
    ZoomOut,
    PowerDown,
    PowerUp,
    DurationUp,
    DurationDown,
}

const ZOOM_STEP: f32 = 0.1;
const POWER_STEP: f32 = 0.01;
const DURATION_STEP: f32 = 0.1;

impl FieldParams {
    /// Applies a single adjustment. Key releases and unmapped keys never
    /// produce a `ParamAction`, so this is only called for press/repeat.
    pub fn apply(&mut self, action: ParamAction) {
        match action {
            ParamAction::ZoomIn => self.zoom += ZOOM_STEP,
            ParamAction::ZoomOut => self.zoom -= ZOOM_STEP,
            ParamAction::PowerDown => self.power -= POWER_STEP,
            ParamAction::PowerUp => self.power += POWER_STEP,
            ParamAction::DurationUp => self.duration += DURATION_STEP,
            ParamAction::DurationDown => self.duration -= DURATION_STEP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_zoom_presses_accumulate() {
        let mut params = FieldParams::default();
        for _ in 0..3 {
            params.apply(ParamAction::ZoomIn);
        }
        assert!((params.zoom - 1.3).abs() < 1e-6);
        assert!((params.duration - 4.0).abs() < 1e-6);
        assert!((params.power - 0.51).abs() < 1e-6);
    }

    #[test]
    fn opposite_actions_cancel() {
        let mut params = FieldParams::default();
        params.apply(ParamAction::DurationUp);
        params.apply(ParamAction::DurationDown);
        assert!((params.duration - 4.0).abs() < 1e-6);
    }

    #[test]
    fn no_lower_bound_on_any_field() {
        let mut params = FieldParams::default();
        for _ in 0..100 {
            params.apply(ParamAction::ZoomOut);
            params.apply(ParamAction::PowerDown);
            params.apply(ParamAction::DurationDown);
        }
        assert!(params.zoom < 0.0);
        assert!(params.power < 0.0);
        assert!(params.duration < 0.0);
    }

    #[test]
    fn mixed_sequence_sums_deltas() {
        let mut params = FieldParams::default();
        let sequence = [
            ParamAction::ZoomIn,
            ParamAction::PowerUp,
            ParamAction::PowerUp,
            ParamAction::DurationDown,
            ParamAction::ZoomIn,
        ];
        for action in sequence {
            params.apply(action);
        }
        assert!((params.zoom - 1.2).abs() < 1e-6);
        assert!((params.power - 0.53).abs() < 1e-6);
        assert!((params.duration - 3.9).abs() < 1e-6);
    }
}
