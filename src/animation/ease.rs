/// Easing curve for a keyframe segment.
///
/// Only the shapes the transitions use: quadratic for the intro fades and a quintic ease-out
/// for the exit overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant rate.
    #[default]
    Linear,
    /// `t²`.
    InQuad,
    /// `1 - (1 - t)²`.
    OutQuad,
    /// `1 - (1 - t)⁵`.
    OutQuint,
}

impl Ease {
    /// Eased progress for `t`, clamped to `[0, 1]` first.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t.powi(2),
            Self::OutQuad => 1.0 - (1.0 - t).powi(2),
            Self::OutQuint => 1.0 - (1.0 - t).powi(5),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
