// Math utilities and helper functions

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Clamp a normalized gauge value into [0, 1]
///
/// NaN collapses to 0 so a bad value can never reach a bar or the wire.
pub fn clamp01(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    clamp(value, 0.0, 1.0)
}

/// Move `current` toward `target` by at most `max_step`
///
/// Snaps exactly onto the target once the remaining gap is no larger than
/// one step, so repeated calls always terminate on the target value.
pub fn step_toward(current: f32, target: f32, max_step: f32) -> f32 {
    let step = max_step.abs();
    if current < target && current + step <= target {
        current + step
    } else if current > target && current - step >= target {
        current - step
    } else {
        target
    }
}
