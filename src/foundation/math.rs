//! Scalar interpolation helpers shared by layout, fades and transitions.

/// Linear interpolation.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Position of `value` within `[a, b]` (unclamped).
pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    (value - a) / (b - a)
}

/// Clamp to `[0, 1]`.
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Map `value` from `[start1, stop1]` onto `[start2, stop2]` without clamping.
pub fn remap(value: f64, start1: f64, stop1: f64, start2: f64, stop2: f64) -> f64 {
    inverse_lerp(start1, stop1, value) * (stop2 - start2) + start2
}

/// [`remap`] with the result clamped to the output range (either orientation).
pub fn remap_clamped(value: f64, start1: f64, stop1: f64, start2: f64, stop2: f64) -> f64 {
    let v = remap(value, start1, stop1, start2, stop2);
    v.clamp(start2.min(stop2), start2.max(stop2))
}

/// Step `current` toward `target` by at most `max_delta`, never overshooting.
pub fn move_towards(current: f64, target: f64, max_delta: f64) -> f64 {
    if (target - current).abs() <= max_delta {
        return target;
    }
    current + (target - current).signum() * max_delta
}

/// Frame-rate independent smoothing factor for half-life `h`.
pub fn smooth_t(delta: f64, h: f64) -> f64 {
    1.0 - 2f64.powf(-delta / h)
}

/// Exponential approach of `a` toward `b`: half the remaining distance per `h` seconds.
pub fn lerp_smooth(a: f64, b: f64, delta: f64, h: f64) -> f64 {
    lerp(a, b, smooth_t(delta, h))
}

/// Wrap `value` into `[min, max)`.
pub fn wrap(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    (((value - min) % range) + range) % range + min
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
