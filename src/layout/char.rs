use std::sync::Arc;

use crate::{
    config::FadeTuning,
    content::model::Link,
    foundation::{
        core::Rect,
        math::{lerp_smooth, move_towards},
    },
};

/// Category of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CharKind {
    /// Sequence title.
    Title,
    /// Header entry of a film with a link.
    Link,
    /// Header entry of a film without a link; shown but not clickable.
    InactiveLink,
    /// Body and credit copy.
    Body,
    /// Blank padding and separator cells.
    Gap,
}

/// Visibility causes.
///
/// All flags are recomputed every frame except `light`, which stays set for the lifetime of the
/// layout once a clip has lit the cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharFlags {
    /// Reached by the active reveal.
    pub transition_in: bool,
    /// Forced off by the exit.
    pub transition_out: bool,
    /// Selected as a light for a playing clip this frame.
    pub lit: bool,
    /// Lit at some point since the layout was built.
    pub light: bool,
    /// Not dimmed by a hovered link elsewhere.
    pub hover: bool,
    /// Not hidden by the collapsed body on narrow screens.
    pub body_revealed: bool,
}

impl Default for CharFlags {
    fn default() -> Self {
        Self {
            transition_in: false,
            transition_out: false,
            lit: false,
            light: false,
            hover: false,
            body_revealed: true,
        }
    }
}

/// One cell of the character grid.
///
/// Everything except `opacity`, `light_brightness` and `flags` is fixed when the layout is
/// built.
#[derive(Clone, Debug)]
pub struct Character {
    /// Position in grid traversal order.
    pub index: usize,
    /// A single grapheme.
    pub value: String,
    /// Cell category.
    pub kind: CharKind,
    /// Link shared with the rest of the header entry.
    pub link: Option<Arc<Link>>,
    /// Cell box in text-block pixel space.
    pub rect: Rect,
    /// Seconds after the reveal starts at which the cell may fade in.
    pub reveal_delay: f64,
    /// Current opacity in `[0, 1]`.
    pub opacity: f64,
    /// Current light brightness in `[0, 1]`.
    pub light_brightness: f64,
    /// Current visibility causes.
    pub flags: CharFlags,
}

impl Character {
    /// A hidden, unlit cell.
    pub fn new(
        index: usize,
        value: impl Into<String>,
        kind: CharKind,
        link: Option<Arc<Link>>,
        rect: Rect,
        reveal_delay: f64,
    ) -> Self {
        Self {
            index,
            value: value.into(),
            kind,
            link,
            rect,
            reveal_delay,
            opacity: 0.0,
            light_brightness: 0.0,
            flags: CharFlags::default(),
        }
    }

    /// Whether the cell holds a plain space.
    pub fn is_space(&self) -> bool {
        self.value == " "
    }

    /// Whether the cell carries `link`.
    pub fn has_link(&self, link: &Link) -> bool {
        self.link.as_deref() == Some(link)
    }

    /// Opacity the cell is heading toward given its current flags.
    pub fn target_opacity(&self) -> f64 {
        let f = &self.flags;
        if f.transition_out {
            return 0.0;
        }
        if f.light || (f.transition_in && f.hover && f.body_revealed) {
            1.0
        } else {
            0.0
        }
    }

    /// Advance opacity and light brightness by `dt` seconds.
    pub fn update(&mut self, dt: f64, fade: &FadeTuning) {
        if self.target_opacity() == 0.0 {
            // Drop straight to half before ramping, so fade-outs read as a flicker.
            self.opacity = self.opacity.min(0.5);
            self.opacity = move_towards(self.opacity, 0.0, dt / fade.fade_out);
        } else {
            self.opacity = move_towards(self.opacity, 1.0, dt / fade.fade_in);
        }

        self.light_brightness = if self.flags.lit {
            lerp_smooth(self.light_brightness, 1.0, dt, fade.light_rise_half_life)
        } else {
            lerp_smooth(self.light_brightness, 0.0, dt, fade.light_decay_half_life)
        };
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/char.rs"]
mod tests;
