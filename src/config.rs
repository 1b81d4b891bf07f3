//! Engine tunables.
//!
//! Every field carries a default, so an empty JSON object (`{}`) is a complete configuration.
//! Rates and pauses are in seconds.

use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::{
    color::Color,
    error::{KinetypeError, KinetypeResult},
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Root configuration for an [`crate::Orchestrator`].
pub struct EngineConfig {
    /// Clip timeline shape.
    pub timeline: TimelineTuning,
    /// Text layout pacing and breakpoints.
    pub layout: LayoutTuning,
    /// Per-character fade and light smoothing.
    pub fade: FadeTuning,
    /// Transition phase timings.
    pub transitions: TransitionTuning,
    /// Global colors.
    pub palette: Palette,
    /// Fixed session seed; drawn from entropy when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Warm-up phase and look-ahead of the clip timeline.
pub struct TimelineTuning {
    /// Pre-roll before the first clip slot.
    pub initial_delay: f64,
    /// Number of fixed-length warm-up slots.
    pub initial_clips: u32,
    /// How far ahead clips are preloaded.
    pub preload_window: f64,
}

impl Default for TimelineTuning {
    fn default() -> Self {
        Self {
            initial_delay: 10.0,
            initial_clips: 16,
            preload_window: 5.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Per-character reveal durations.
pub struct RevealRates {
    /// Headers.
    pub slow: f64,
    /// Body and credits.
    pub medium: f64,
    /// Gap lines and padding.
    pub fast: f64,
}

impl Default for RevealRates {
    fn default() -> Self {
        Self {
            slow: 1.0 / 20.0,
            medium: 1.0 / 200.0,
            fast: 1.0 / 800.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Pauses inserted between layout blocks.
pub struct Pauses {
    /// After blocks and header rows.
    pub long: f64,
    /// After each wrapped line.
    pub short: f64,
}

impl Default for Pauses {
    fn default() -> Self {
        Self {
            long: 1.0,
            short: 0.25,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Minimum column widths (in cells) for the wider breakpoints.
pub struct BreakpointThresholds {
    /// Column width selecting the large breakpoint.
    pub large: u32,
    /// Column width selecting the medium breakpoint.
    pub medium: u32,
}

impl Default for BreakpointThresholds {
    fn default() -> Self {
        Self {
            large: 40,
            medium: 27,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// Space run lengths substituted for the `[:]`, `[;]` and `[.]` markers.
pub struct MarkupWidths {
    /// `[:]`
    pub colon: usize,
    /// `[;]`
    pub semicolon: usize,
    /// `[.]`
    pub period: usize,
}

impl MarkupWidths {
    /// Ordered `(token, width)` pairs.
    pub fn tokens(&self) -> [(&'static str, usize); 3] {
        [
            ("[:]", self.colon),
            ("[;]", self.semicolon),
            ("[.]", self.period),
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Layout pacing table.
pub struct LayoutTuning {
    /// Reveal durations per tier.
    pub rates: RevealRates,
    /// Block pauses.
    pub pauses: Pauses,
    /// Breakpoint thresholds.
    pub breakpoints: BreakpointThresholds,
    /// Markup widths on the large breakpoint.
    pub markup_large: MarkupWidths,
    /// Markup widths on the medium and small breakpoints.
    pub markup_compact: MarkupWidths,
    /// Blank lines after the header on the large breakpoint.
    pub gap_lines_large: usize,
    /// Blank lines after the header otherwise.
    pub gap_lines_compact: usize,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            rates: RevealRates::default(),
            pauses: Pauses::default(),
            breakpoints: BreakpointThresholds::default(),
            markup_large: MarkupWidths {
                colon: 2,
                semicolon: 7,
                period: 12,
            },
            markup_compact: MarkupWidths {
                colon: 2,
                semicolon: 4,
                period: 5,
            },
            gap_lines_large: 7,
            gap_lines_compact: 6,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Character opacity and light smoothing.
pub struct FadeTuning {
    /// Time for a full 0 -> 1 opacity ramp.
    pub fade_in: f64,
    /// Time for a full 0.5 -> 0 opacity ramp.
    pub fade_out: f64,
    /// Half-life of the light brightness rise while lit.
    pub light_rise_half_life: f64,
    /// Half-life of the light brightness decay once unlit.
    pub light_decay_half_life: f64,
}

impl Default for FadeTuning {
    fn default() -> Self {
        Self {
            fade_in: 1.0 / 20.0,
            fade_out: 1.0 / 500.0,
            light_rise_half_life: 0.05,
            light_decay_half_life: 0.1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Timings of the intro, fast intro and exit phases.
pub struct TransitionTuning {
    /// Color ramp length of the fast intro.
    pub fast_intro_duration: f64,
    /// Per-character reveal offset of the fast intro.
    pub fast_intro_stagger: f64,
    /// Time for every exit light to go out.
    pub exit_lights_duration: f64,
    /// Background fade to black on exit.
    pub exit_background_duration: f64,
    /// Overlay fade to grey on exit.
    pub exit_overlay_duration: f64,
    /// Phase time after which the exit hands control to the player.
    pub exit_duration: f64,
}

impl Default for TransitionTuning {
    fn default() -> Self {
        Self {
            fast_intro_duration: 2.0,
            fast_intro_stagger: 0.0002,
            exit_lights_duration: 2.0,
            exit_background_duration: 5.0,
            exit_overlay_duration: 1.0,
            exit_duration: 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Global colors used by the transition curves.
pub struct Palette {
    /// Pre-roll background and overlay.
    pub black: Color,
    /// Flash overlay.
    pub white: Color,
    /// Resting overlay.
    pub transparent_white: Color,
    /// Idle background.
    pub grey: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            black: Color::BLACK,
            white: Color::WHITE,
            transparent_white: Color::TRANSPARENT_WHITE,
            grey: Color::rgba(43.0 / 255.0, 43.0 / 255.0, 43.0 / 255.0, 1.0),
        }
    }
}

impl EngineConfig {
    /// Parse configuration JSON from a reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> KinetypeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| KinetypeError::serde(format!("parse config JSON: {e}")))
    }

    /// Parse configuration JSON from a string.
    pub fn from_json_str(s: &str) -> KinetypeResult<Self> {
        serde_json::from_str(s).map_err(|e| KinetypeError::serde(format!("parse config JSON: {e}")))
    }

    /// Parse configuration JSON from a file.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> KinetypeResult<Self> {
        let f = File::open(path).map_err(|e| {
            KinetypeError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject values that would stall or reverse the schedule.
    pub fn validate(&self) -> KinetypeResult<()> {
        fn non_negative(name: &str, v: f64) -> KinetypeResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(KinetypeError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
            Ok(())
        }

        fn positive(name: &str, v: f64) -> KinetypeResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(KinetypeError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
            Ok(())
        }

        let t = &self.timeline;
        non_negative("timeline.initial_delay", t.initial_delay)?;
        non_negative("timeline.preload_window", t.preload_window)?;

        let l = &self.layout;
        positive("layout.rates.slow", l.rates.slow)?;
        positive("layout.rates.medium", l.rates.medium)?;
        positive("layout.rates.fast", l.rates.fast)?;
        non_negative("layout.pauses.long", l.pauses.long)?;
        non_negative("layout.pauses.short", l.pauses.short)?;
        if l.breakpoints.large < l.breakpoints.medium {
            return Err(KinetypeError::validation(
                "layout.breakpoints.large must be >= layout.breakpoints.medium",
            ));
        }

        let f = &self.fade;
        positive("fade.fade_in", f.fade_in)?;
        positive("fade.fade_out", f.fade_out)?;
        positive("fade.light_rise_half_life", f.light_rise_half_life)?;
        positive("fade.light_decay_half_life", f.light_decay_half_life)?;

        let tr = &self.transitions;
        non_negative("transitions.fast_intro_duration", tr.fast_intro_duration)?;
        non_negative("transitions.fast_intro_stagger", tr.fast_intro_stagger)?;
        positive("transitions.exit_lights_duration", tr.exit_lights_duration)?;
        non_negative("transitions.exit_background_duration", tr.exit_background_duration)?;
        non_negative("transitions.exit_overlay_duration", tr.exit_overlay_duration)?;
        non_negative("transitions.exit_duration", tr.exit_duration)?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
