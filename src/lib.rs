//! Kinetype is a deterministic kinetic-typography engine.
//!
//! A page of content (a title, a list of films, body and credit paragraphs) is laid out on a
//! fixed character grid. Every cell carries a reveal delay, so the text types itself in line by
//! line, and the same per-line durations drive a looping clip schedule that decides which video
//! clip plays behind the text at any moment.
//!
//! - Load a [`Content`], a [`ClipCatalog`] and an optional [`EngineConfig`]
//! - Create an [`Orchestrator`] and feed it [`LayoutParams`] and [`ViewRects`]
//! - Call [`Orchestrator::tick`] once per frame and read back characters, colors and clips
//!
//! The building blocks ([`TextLayout`], [`ClipTimeline`], [`ClipSelector`], [`Transition`]) are
//! usable on their own.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod catalog;
/// Engine tuning loaded from JSON.
pub mod config;
pub(crate) mod content;
pub(crate) mod layout;
pub(crate) mod state;
pub(crate) mod timeline;
pub(crate) mod transition;

pub use crate::foundation::color::Color;
pub use crate::foundation::core::{Point, Rect, Vec2};
pub use crate::foundation::error::{KinetypeError, KinetypeResult};
pub use crate::foundation::{math, rng};

pub use crate::animation::ease::Ease;
pub use crate::animation::keyframes::{Keyframes, Lerp};
pub use crate::catalog::clip::{Clip, ClipCatalog};
pub use crate::catalog::selector::ClipSelector;
pub use crate::config::{
    EngineConfig, FadeTuning, LayoutTuning, Palette, TimelineTuning, TransitionTuning,
};
pub use crate::content::model::{Content, Film, Link};
pub use crate::layout::char::{CharFlags, CharKind, Character};
pub use crate::layout::text::{Breakpoint, LayoutParams, TextLayout};
pub use crate::state::orchestrator::{LINK_HIT_OUTSET, Orchestrator};
pub use crate::state::visible::{ViewRects, visible_chars};
pub use crate::timeline::clip_timeline::{ClipTimeline, ClipTimelineParams, Slot};
pub use crate::transition::phase::{
    Exit, FastIntro, Illumination, Intro, Transition, TransitionKind, TransitionSample,
};
