use std::sync::Arc;

use crate::{config::RevealRates, content::model::Link, layout::char::CharKind};

/// Per-character reveal tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rate {
    /// Headers.
    Slow,
    /// Body copy.
    Medium,
    /// Padding and gaps.
    Fast,
}

impl Rate {
    /// Seconds consumed by one character at this tier.
    pub fn seconds(self, rates: &RevealRates) -> f64 {
        match self {
            Self::Slow => rates.slow,
            Self::Medium => rates.medium,
            Self::Fast => rates.fast,
        }
    }
}

/// Settings stamped onto each pushed character.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleFrame {
    pub rate: Rate,
    pub link: Option<Arc<Link>>,
    pub kind: CharKind,
}

impl Default for StyleFrame {
    fn default() -> Self {
        Self {
            rate: Rate::Fast,
            link: None,
            kind: CharKind::Body,
        }
    }
}

/// Strict LIFO of [`StyleFrame`]s with an always-present base frame.
#[derive(Clone, Debug, Default)]
pub struct StyleStack {
    current: StyleFrame,
    saved: Vec<StyleFrame>,
}

impl StyleStack {
    pub fn current(&self) -> &StyleFrame {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut StyleFrame {
        &mut self.current
    }

    /// Push a copy of the current frame.
    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    /// Return to the frame active at the matching [`StyleStack::save`].
    ///
    /// # Panics
    ///
    /// Panics when called on the base frame: that is an unbalanced save/restore in the caller.
    pub fn restore(&mut self) {
        match self.saved.pop() {
            Some(frame) => self.current = frame,
            None => panic!("style stack restore without matching save"),
        }
    }

    /// Number of frames above the base.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/style.rs"]
mod tests;
