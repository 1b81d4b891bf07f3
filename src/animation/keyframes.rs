use crate::{animation::ease::Ease, foundation::color::Color};

/// Linear interpolation between two values of the same type.
pub trait Lerp: Sized {
    /// Interpolate from `a` (at `t = 0`) to `b` (at `t = 1`).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Color {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self::rgba(
            f64::lerp(&a.r, &b.r, t),
            f64::lerp(&a.g, &b.g, t),
            f64::lerp(&a.b, &b.b, t),
            f64::lerp(&a.a, &b.a, t),
        )
    }
}

#[derive(Clone, Debug)]
struct Segment<T> {
    from: T,
    to: T,
    duration: f64,
    ease: Ease,
}

impl<T> Segment<T>
where
    T: Lerp + Clone,
{
    fn sample(&self, time: f64) -> T {
        if time <= 0.0 {
            return self.from.clone();
        }
        if time >= self.duration {
            return self.to.clone();
        }
        T::lerp(&self.from, &self.to, self.ease.apply(time / self.duration))
    }
}

/// A chain of eased segments sampled by elapsed seconds.
///
/// Sampling before the start yields the initial value and sampling past the end yields the final
/// value. A zero-duration segment is an instantaneous jump to its target.
#[derive(Clone, Debug)]
pub struct Keyframes<T> {
    segments: Vec<Segment<T>>,
    last: T,
    duration: f64,
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    /// Start a chain holding `from`.
    pub fn new(from: T) -> Self {
        Self {
            segments: Vec::new(),
            last: from,
            duration: 0.0,
        }
    }

    /// Append a segment easing from the current end value to `value` over `duration` seconds.
    pub fn to(mut self, value: T, duration: f64, ease: Ease) -> Self {
        let duration = duration.max(0.0);
        self.segments.push(Segment {
            from: self.last.clone(),
            to: value.clone(),
            duration,
            ease,
        });
        self.last = value;
        self.duration += duration;
        self
    }

    /// Hold the current end value for `duration` seconds.
    pub fn wait(self, duration: f64) -> Self {
        let value = self.last.clone();
        self.to(value, duration, Ease::Linear)
    }

    /// Total length in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Value at `time` seconds from the start of the chain.
    pub fn sample(&self, time: f64) -> T {
        let mut remaining = time;
        for segment in &self.segments {
            if remaining < segment.duration {
                return segment.sample(remaining);
            }
            remaining -= segment.duration;
        }
        self.last.clone()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
