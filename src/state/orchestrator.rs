use std::{collections::HashSet, sync::Arc};

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    catalog::{
        clip::{Clip, ClipCatalog},
        selector::ClipSelector,
    },
    config::EngineConfig,
    content::model::{Content, Link},
    foundation::{
        color::Color,
        core::{Point, Rect},
        error::KinetypeResult,
        rng,
    },
    layout::{
        char::{CharKind, Character},
        text::{LayoutParams, TextLayout},
    },
    state::visible::{ViewRects, VisibleSpaces, visible_chars},
    timeline::clip_timeline::{ClipTimeline, ClipTimelineParams},
    transition::phase::{Illumination, Transition, TransitionKind},
};

/// Padding around link regions for pointer hit testing, in pixels.
pub const LINK_HIT_OUTSET: f64 = 5.0;

#[derive(Clone, Debug)]
struct Scene {
    layout: TextLayout,
    timeline: ClipTimeline,
    generation: u64,
}

/// Frame-driven owner of time, layout, timeline and the active transition.
///
/// The external driver calls [`Orchestrator::tick`] once per frame and reads the results between
/// ticks. Until layout parameters are supplied there is nothing to animate and ticks only advance
/// the clock.
#[derive(Debug)]
pub struct Orchestrator {
    config: EngineConfig,
    content: Content,
    catalog: ClipCatalog,
    selector: ClipSelector,
    rng: StdRng,

    layout_params: Option<LayoutParams>,
    scene: Option<Scene>,
    generation: u64,
    rects: ViewRects,
    visible: VisibleSpaces,

    transition: Option<Transition>,
    transition_start: f64,
    time: f64,

    background: Color,
    overlay: Color,
    links_enabled: bool,
    current_clip: Option<Clip>,
    preload_clips: Vec<Clip>,

    hovered_link: Option<Arc<Link>>,
    body_revealed: bool,
    intro_completed: bool,
}

impl Orchestrator {
    /// Validate inputs and seed the session.
    ///
    /// The session seed comes from `config.seed` when set, otherwise from OS entropy.
    #[tracing::instrument(skip_all, fields(clips = catalog.len(), films = content.films.len()))]
    pub fn new(
        config: EngineConfig,
        content: Content,
        catalog: ClipCatalog,
    ) -> KinetypeResult<Self> {
        config.validate()?;
        content.validate()?;
        catalog.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let selector = ClipSelector::from_rng(&mut rng);
        tracing::debug!(global_seed = selector.global_seed(), "session seeded");

        let black = config.palette.black;
        Ok(Self {
            config,
            content,
            catalog,
            selector,
            rng,
            layout_params: None,
            scene: None,
            generation: 0,
            rects: ViewRects::default(),
            visible: VisibleSpaces::default(),
            transition: None,
            transition_start: 0.0,
            time: 0.0,
            background: black,
            overlay: black,
            links_enabled: false,
            current_clip: None,
            preload_clips: Vec::new(),
            hovered_link: None,
            body_revealed: true,
            intro_completed: false,
        })
    }

    /// Supply sizing; the layout and timeline are rebuilt only when `params` changed.
    ///
    /// On error the scene is dropped and frames are skipped until valid sizing arrives.
    pub fn set_layout_params(&mut self, params: LayoutParams) -> KinetypeResult<()> {
        if self.layout_params == Some(params) && self.scene.is_some() {
            return Ok(());
        }
        self.layout_params = Some(params);
        match self.build_scene(params) {
            Ok(scene) => {
                self.scene = Some(scene);
                self.refresh_transition();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, ?params, "layout rejected; frames skipped until resized");
                self.scene = None;
                Err(err)
            }
        }
    }

    fn build_scene(&mut self, params: LayoutParams) -> KinetypeResult<Scene> {
        let cfg = &self.config;
        let layout = TextLayout::new(params, &self.content, &cfg.layout)?;
        let timeline = ClipTimeline::new(ClipTimelineParams {
            initial_delay: cfg.timeline.initial_delay,
            initial_clips: cfg.timeline.initial_clips,
            initial_clip_duration: cfg.layout.rates.fast * layout.width_chars() as f64
                + cfg.layout.pauses.short,
            loop_durations: layout.line_durations(),
        })?;
        self.generation += 1;
        Ok(Scene {
            layout,
            timeline,
            generation: self.generation,
        })
    }

    /// Rebuild a timeline-dependent intro after relayout; other phases carry over.
    fn refresh_transition(&mut self) {
        let Some(scene) = &self.scene else { return };
        if matches!(self.transition, None | Some(Transition::Intro(_))) {
            self.transition = Some(Transition::intro(&scene.timeline, &self.config.palette));
        }
    }

    /// Update the page rectangles used for visibility and hit testing.
    pub fn set_rects(&mut self, rects: ViewRects) {
        self.rects = rects;
    }

    /// Update only the viewport rectangle.
    pub fn set_viewport_rect(&mut self, viewport: Rect) {
        self.rects.viewport = viewport;
    }

    /// Update only the player rectangle.
    pub fn set_player_rect(&mut self, player: Rect) {
        self.rects.player = player;
    }

    /// Update only the text block rectangle.
    pub fn set_text_rect(&mut self, text: Rect) {
        self.rects.text = text;
    }

    /// Whether body copy is revealed (narrow screens hide it until scrolled).
    pub fn set_body_revealed(&mut self, revealed: bool) {
        self.body_revealed = revealed;
    }

    /// Set or clear the hovered link. Ignored while links are disabled.
    pub fn set_hovered_link(&mut self, link: Option<Arc<Link>>) {
        if link.is_some() && !self.links_enabled {
            return;
        }
        if self.hovered_link != link {
            tracing::debug!(link = ?link.as_ref().map(|l| l.url.as_str()), "hovered link changed");
        }
        self.hovered_link = link;
    }

    /// Link region under `p` (page space), padded by [`LINK_HIT_OUTSET`].
    pub fn link_at(&self, p: Point) -> Option<&Arc<Link>> {
        let scene = self.scene.as_ref()?;
        let local = Point::new(p.x - self.rects.text.x, p.y - self.rects.text.y);
        scene.layout.link_rects().iter().find_map(|(link, r)| {
            let hit = Rect::new(
                r.x - LINK_HIT_OUTSET,
                r.y - LINK_HIT_OUTSET,
                r.width + LINK_HIT_OUTSET * 2.0,
                r.height + LINK_HIT_OUTSET * 2.0,
            );
            hit.contains(local).then_some(link)
        })
    }

    /// Pointer moved to `p` (page space): hover whatever link lies under it.
    pub fn hover_at(&mut self, p: Point) {
        let link = self.link_at(p).cloned();
        self.set_hovered_link(link);
    }

    /// Start the intro. No-op when it is already active.
    pub fn transition_in(&mut self) {
        if self.transition_kind() == TransitionKind::Intro && self.transition.is_some() {
            return;
        }
        let next = self
            .scene
            .as_ref()
            .map(|s| Transition::intro(&s.timeline, &self.config.palette));
        self.switch(next);
    }

    /// Start the fast intro. No-op when it is already active.
    pub fn transition_in_fast(&mut self) {
        if self.transition_kind() == TransitionKind::FastIntro {
            return;
        }
        let next = Transition::fast_intro(&self.config.transitions, &self.config.palette);
        self.switch(Some(next));
    }

    /// Start the exit toward `link`. No-op when an exit is already active.
    pub fn transition_out(&mut self, link: Option<Arc<Link>>) {
        if self.transition_kind() == TransitionKind::Exit {
            return;
        }
        let next = Transition::exit(
            link,
            &self.catalog,
            &mut self.rng,
            &self.config.transitions,
            &self.config.palette,
        );
        self.switch(Some(next));
    }

    fn switch(&mut self, next: Option<Transition>) {
        tracing::debug!(
            from = ?self.transition_kind(),
            to = ?next.as_ref().map_or(TransitionKind::Intro, Transition::kind),
            time = self.time,
            "transition"
        );
        self.transition = next;
        self.transition_start = self.time;
    }

    /// Click on `link`: starts the exit when links are enabled. Returns whether it did.
    pub fn click_link(&mut self, link: Arc<Link>) -> bool {
        if !self.links_enabled {
            return false;
        }
        self.transition_out(Some(link));
        true
    }

    /// The viewer came back from the player.
    ///
    /// Replays the full intro until one has run to the end of the reveal, then uses the fast
    /// intro.
    pub fn return_from_player(&mut self) {
        self.hovered_link = None;
        if self.intro_completed {
            self.transition_in_fast();
        } else {
            self.transition_in();
        }
    }

    /// Whether an intro has revealed the whole text at least once this session.
    pub fn intro_completed(&self) -> bool {
        self.intro_completed
    }

    fn mark_intro_completed(&mut self) {
        if !self.intro_completed {
            tracing::debug!(time = self.time, "intro completed");
        }
        self.intro_completed = true;
    }

    /// Once the exit has finished, the link to hand to the external player.
    pub fn exit_complete(&self) -> Option<Arc<Link>> {
        let t = self.transition.as_ref()?;
        if t.is_complete(self.phase_time()) {
            t.exit_link().cloned()
        } else {
            None
        }
    }

    /// Jump to the next loop boundary while the intro text is still being revealed.
    ///
    /// Returns whether the clock moved.
    pub fn skip_forward(&mut self) -> bool {
        if self.transition_kind() != TransitionKind::Intro {
            return false;
        }
        let Some(scene) = &self.scene else {
            return false;
        };
        let phase_time = self.phase_time();
        let target = [0, 1]
            .into_iter()
            .map(|n| scene.timeline.loop_start_time(n))
            .find(|t| *t > phase_time);
        let Some(target) = target else {
            return false;
        };
        let reveal_end = scene.timeline.loop_start_time(1);
        let to = self.transition_start + target;
        tracing::debug!(from = self.time, to, "skip forward");
        self.time = to;
        if target >= reveal_end {
            self.mark_intro_completed();
        }
        true
    }

    /// Advance the clock by `dt` seconds and recompute clips, transition state and every
    /// character's animation fields.
    pub fn tick(&mut self, dt: f64) {
        self.time += dt;
        let time = self.time;
        let phase_time = self.phase_time();

        let Some(scene) = self.scene.as_mut() else {
            tracing::trace!(time, "frame skipped: no layout");
            return;
        };

        let filter = self.hovered_link.as_deref().map(|l| l.source_filter.as_str());
        let slots = scene
            .timeline
            .overlapping(time, time + self.config.timeline.preload_window);
        let mut preload: Vec<Clip> = slots
            .iter()
            .filter_map(|s| self.selector.select(&self.catalog, s.index, s.duration, filter))
            .cloned()
            .collect();
        for link in self.content.links() {
            if let Some(thumb) = self.catalog.thumbnail_for(link)
                && !preload.iter().any(|c| c.url == thumb.url)
            {
                preload.push(thumb.clone());
            }
        }

        let playing = slots
            .first()
            .filter(|s| s.start_time <= time)
            .and_then(|s| self.selector.select(&self.catalog, s.index, s.duration, filter));
        let current = self
            .hovered_link
            .as_deref()
            .and_then(|l| self.catalog.thumbnail_for(l))
            .or(playing)
            .cloned();
        if current.as_ref().map(|c| &c.url) != self.current_clip.as_ref().map(|c| &c.url) {
            tracing::trace!(time, url = ?current.as_ref().map(|c| c.url.as_str()), "current clip changed");
        }
        self.current_clip = current;
        self.preload_clips = preload;

        let Some(transition) = self.transition.as_ref() else {
            return;
        };
        if matches!(transition, Transition::Intro(_))
            && !self.intro_completed
            && phase_time >= scene.timeline.loop_start_time(1)
        {
            tracing::debug!(time, "intro completed");
            self.intro_completed = true;
        }
        let sample = transition.apply(phase_time, scene.layout.chars_mut());
        self.background = sample.background;
        self.overlay = sample.overlay;
        self.links_enabled = sample.links_enabled;
        if !self.links_enabled {
            self.hovered_link = None;
        }

        let lit_urls: Vec<&str> = match &sample.illumination {
            Illumination::Current => match self.hovered_link.as_deref() {
                Some(link) => self
                    .catalog
                    .clips_for_link(link)
                    .into_iter()
                    .map(|c| c.url.as_str())
                    .collect(),
                None => self.current_clip.iter().map(|c| c.url.as_str()).collect(),
            },
            Illumination::Clips(clips) => clips.iter().map(|c| c.url.as_str()).collect(),
        };
        let spaces = self
            .visible
            .get(scene.generation, self.rects, scene.layout.chars());
        let lit = lit_cells(spaces, &lit_urls);

        let hovered = self.hovered_link.as_deref();
        let fade = &self.config.fade;
        for c in scene.layout.chars_mut() {
            c.flags.lit = lit.contains(&c.index);
            c.flags.light |= c.flags.lit;
            c.flags.hover = c.is_space() || hovered.is_none_or(|l| c.has_link(l));
            c.flags.body_revealed = self.body_revealed || c.kind != CharKind::Body || c.is_space();
            c.update(dt, fade);
        }
    }

    fn phase_time(&self) -> f64 {
        self.time - self.transition_start
    }

    /// Animation clock in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Content being laid out.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Clip catalog.
    pub fn catalog(&self) -> &ClipCatalog {
        &self.catalog
    }

    /// Session clip selector.
    pub fn selector(&self) -> &ClipSelector {
        &self.selector
    }

    /// Current layout, once sizing has been supplied.
    pub fn layout(&self) -> Option<&TextLayout> {
        self.scene.as_ref().map(|s| &s.layout)
    }

    /// Current timeline, once sizing has been supplied.
    pub fn timeline(&self) -> Option<&ClipTimeline> {
        self.scene.as_ref().map(|s| &s.timeline)
    }

    /// Active phase. Before the first layout the intro is pending.
    pub fn transition_kind(&self) -> TransitionKind {
        self.transition
            .as_ref()
            .map_or(TransitionKind::Intro, Transition::kind)
    }

    /// Page background color.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Overlay color.
    pub fn overlay(&self) -> Color {
        self.overlay
    }

    /// Whether link regions accept input.
    pub fn links_enabled(&self) -> bool {
        self.links_enabled
    }

    /// Hovered link, if any.
    pub fn hovered_link(&self) -> Option<&Arc<Link>> {
        self.hovered_link.as_ref()
    }

    /// Whether body copy is revealed.
    pub fn body_revealed(&self) -> bool {
        self.body_revealed
    }

    /// What should be on screen now.
    pub fn current_clip(&self) -> Option<&Clip> {
        self.current_clip.as_ref()
    }

    /// What should be buffered ahead of time.
    pub fn preload_clips(&self) -> &[Clip] {
        &self.preload_clips
    }

    /// Page rectangles.
    pub fn rects(&self) -> ViewRects {
        self.rects
    }

    /// Characters on screen and not covered by the player.
    pub fn visible_chars(&self) -> Vec<&Character> {
        self.scene
            .as_ref()
            .map(|s| visible_chars(s.layout.chars(), &self.rects).collect())
            .unwrap_or_default()
    }

    /// Characters currently lit.
    pub fn lit_chars(&self) -> impl Iterator<Item = &Character> + '_ {
        self.scene
            .iter()
            .flat_map(|s| s.layout.chars())
            .filter(|c| c.flags.lit)
    }
}

/// One cell per clip, chosen by hashing its url over the visible spaces.
fn lit_cells(spaces: &[usize], urls: &[&str]) -> HashSet<usize> {
    urls.iter()
        .filter_map(|url| rng::sample(i64::from(rng::hash(url)), spaces).copied())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/state/orchestrator.rs"]
mod tests;
