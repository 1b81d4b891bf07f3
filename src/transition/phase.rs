use std::sync::Arc;

use rand::{Rng, seq::SliceRandom};

use crate::{
    animation::{ease::Ease, keyframes::Keyframes},
    catalog::clip::{Clip, ClipCatalog},
    config::{Palette, TransitionTuning},
    content::model::Link,
    foundation::{color::Color, math::remap_clamped},
    layout::char::Character,
    timeline::clip_timeline::ClipTimeline,
};

/// Discriminant of a [`Transition`], used for idempotent phase switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// First load.
    Intro,
    /// Return from the player.
    FastIntro,
    /// Navigation into the player.
    Exit,
}

/// Which clips drive the lit cells this frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Illumination {
    /// Whatever is playing now (or the hovered link's clips).
    Current,
    /// An explicit list.
    Clips(Vec<Clip>),
}

/// Global animation parameters produced by one [`Transition::apply`].
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionSample {
    /// Page background.
    pub background: Color,
    /// Full-screen overlay drawn above the grid.
    pub overlay: Color,
    /// Whether link hit regions accept input.
    pub links_enabled: bool,
    /// Source of the lit cells.
    pub illumination: Illumination,
}

#[derive(Clone, Debug)]
/// Slow typewriter reveal synchronized with the first loop.
pub struct Intro {
    text_start: f64,
    background: Keyframes<Color>,
    overlay: Keyframes<Color>,
}

#[derive(Clone, Debug)]
/// Quick ripple reveal used when returning from the player.
pub struct FastIntro {
    stagger: f64,
    background: Keyframes<Color>,
    overlay: Keyframes<Color>,
}

#[derive(Clone, Debug)]
/// Fade-out toward the player; the link's clips go dark one by one.
pub struct Exit {
    link: Option<Arc<Link>>,
    order: Vec<Clip>,
    lights_duration: f64,
    duration: f64,
    background: Keyframes<Color>,
    overlay: Keyframes<Color>,
}

/// The active global phase. Each variant is a pure function of phase-local time.
#[derive(Clone, Debug)]
pub enum Transition {
    /// First load.
    Intro(Intro),
    /// Return from the player.
    FastIntro(FastIntro),
    /// Navigation into the player.
    Exit(Exit),
}

impl Transition {
    /// Intro whose text reveal starts with the first loop of `timeline`.
    pub fn intro(timeline: &ClipTimeline, palette: &Palette) -> Self {
        let clip_start = timeline.initial_delay();
        Self::Intro(Intro {
            text_start: timeline.loop_start_time(0),
            background: Keyframes::new(palette.black).to(palette.grey, clip_start, Ease::OutQuad),
            overlay: Keyframes::new(palette.black)
                .to(palette.white, clip_start, Ease::InQuad)
                .to(palette.transparent_white, 0.0, Ease::Linear),
        })
    }

    /// Fast intro with the configured ramp and stagger.
    pub fn fast_intro(tuning: &TransitionTuning, palette: &Palette) -> Self {
        let d = tuning.fast_intro_duration;
        Self::FastIntro(FastIntro {
            stagger: tuning.fast_intro_stagger,
            background: Keyframes::new(palette.black).to(palette.grey, d, Ease::OutQuad),
            overlay: Keyframes::new(palette.white).to(palette.transparent_white, d, Ease::InQuad),
        })
    }

    /// Exit toward `link`, shuffling its clips once with `rng`.
    pub fn exit<R: Rng + ?Sized>(
        link: Option<Arc<Link>>,
        catalog: &ClipCatalog,
        rng: &mut R,
        tuning: &TransitionTuning,
        palette: &Palette,
    ) -> Self {
        let mut order: Vec<Clip> = link
            .as_deref()
            .map(|l| catalog.clips_for_link(l).into_iter().cloned().collect())
            .unwrap_or_default();
        order.shuffle(rng);
        Self::Exit(Exit {
            link,
            order,
            lights_duration: tuning.exit_lights_duration,
            duration: tuning.exit_duration,
            background: Keyframes::new(palette.grey).to(
                palette.black,
                tuning.exit_background_duration,
                Ease::InQuad,
            ),
            overlay: Keyframes::new(palette.white).to(
                palette.grey,
                tuning.exit_overlay_duration,
                Ease::OutQuint,
            ),
        })
    }

    /// Phase discriminant.
    pub fn kind(&self) -> TransitionKind {
        match self {
            Self::Intro(_) => TransitionKind::Intro,
            Self::FastIntro(_) => TransitionKind::FastIntro,
            Self::Exit(_) => TransitionKind::Exit,
        }
    }

    /// Link being exited toward, if this is an exit.
    pub fn exit_link(&self) -> Option<&Arc<Link>> {
        match self {
            Self::Exit(e) => e.link.as_ref(),
            _ => None,
        }
    }

    /// Shuffled clips lit during an exit.
    pub fn exit_order(&self) -> &[Clip] {
        match self {
            Self::Exit(e) => &e.order,
            _ => &[],
        }
    }

    /// Whether an exit has run long enough to hand over to the player.
    pub fn is_complete(&self, time: f64) -> bool {
        match self {
            Self::Exit(e) => time >= e.duration,
            _ => false,
        }
    }

    /// Set per-character reveal flags for phase time `time` and sample the global parameters.
    pub fn apply(&self, time: f64, chars: &mut [Character]) -> TransitionSample {
        match self {
            Self::Intro(p) => {
                for c in chars.iter_mut() {
                    c.flags.transition_in = time - p.text_start >= c.reveal_delay;
                    c.flags.transition_out = false;
                }
                TransitionSample {
                    background: p.background.sample(time),
                    overlay: p.overlay.sample(time),
                    links_enabled: time >= p.text_start,
                    illumination: Illumination::Current,
                }
            }
            Self::FastIntro(p) => {
                for c in chars.iter_mut() {
                    c.flags.transition_in = time >= c.index as f64 * p.stagger;
                    c.flags.transition_out = false;
                }
                TransitionSample {
                    background: p.background.sample(time),
                    overlay: p.overlay.sample(time),
                    links_enabled: true,
                    illumination: Illumination::Current,
                }
            }
            Self::Exit(p) => {
                for c in chars.iter_mut() {
                    c.flags.transition_out = true;
                }
                let total = p.order.len() as f64;
                let lit = remap_clamped(time, 0.0, p.lights_duration, total, 0.0).floor() as usize;
                TransitionSample {
                    background: p.background.sample(time),
                    overlay: p.overlay.sample(time),
                    links_enabled: false,
                    illumination: Illumination::Clips(p.order[..lit.min(p.order.len())].to_vec()),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/phase.rs"]
mod tests;
