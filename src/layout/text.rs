use std::{ops::Range, sync::Arc};

use unicode_segmentation::UnicodeSegmentation;

use crate::{
    config::{BreakpointThresholds, LayoutTuning, MarkupWidths},
    content::model::{Content, Film, Link},
    foundation::{
        core::{Point, Rect},
        error::{KinetypeError, KinetypeResult},
    },
    layout::{
        char::{CharKind, Character},
        style::{Rate, StyleStack},
        wrap::{expand_markup, line_wrap, pad_end, space_between},
    },
};

/// Sizing inputs supplied by the viewport layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutParams {
    /// Cell width in pixels.
    pub char_width_px: f64,
    /// Cell height in pixels.
    pub line_height_px: f64,
    /// Available width in pixels.
    pub max_width_px: f64,
    /// Width reserved between the two header columns for the video preview.
    pub gutter_width_px: f64,
}

impl LayoutParams {
    /// Reject sizes that cannot produce a grid.
    pub fn validate(&self) -> KinetypeResult<()> {
        if !self.char_width_px.is_finite() || self.char_width_px <= 0.0 {
            return Err(KinetypeError::layout("char_width_px must be finite and > 0"));
        }
        if !self.line_height_px.is_finite() || self.line_height_px <= 0.0 {
            return Err(KinetypeError::layout(
                "line_height_px must be finite and > 0",
            ));
        }
        if !self.max_width_px.is_finite() || self.max_width_px < 0.0 {
            return Err(KinetypeError::layout("max_width_px must be finite and >= 0"));
        }
        if !self.gutter_width_px.is_finite() || self.gutter_width_px < 0.0 {
            return Err(KinetypeError::layout(
                "gutter_width_px must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Responsive layout mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    /// Single column, stacked header.
    Small,
    /// Title beside each film entry.
    Medium,
    /// Film entries side by side.
    Large,
}

impl Breakpoint {
    /// Breakpoint for a column width given in cells.
    pub fn for_column_width(column_width_chars: usize, thresholds: &BreakpointThresholds) -> Self {
        if column_width_chars >= thresholds.large as usize {
            Self::Large
        } else if column_width_chars >= thresholds.medium as usize {
            Self::Medium
        } else {
            Self::Small
        }
    }
}

/// The laid-out character grid with its reveal schedule.
///
/// Built in one pass from [`LayoutParams`] and [`Content`]; rebuilt wholesale when either
/// changes. Characters are stored in grid traversal order and `reveal_delay` never decreases
/// along it.
#[derive(Clone, Debug)]
pub struct TextLayout {
    params: LayoutParams,
    breakpoint: Breakpoint,
    width_chars: usize,
    column_width_chars: usize,
    gutter_width_chars: usize,
    chars: Vec<Character>,
    lines: Vec<Range<usize>>,
    duration: f64,
    link_rects: Vec<(Arc<Link>, Rect)>,
}

impl TextLayout {
    /// Lay out `content` for the given sizing.
    #[tracing::instrument(skip(content, tuning))]
    pub fn new(
        params: LayoutParams,
        content: &Content,
        tuning: &LayoutTuning,
    ) -> KinetypeResult<Self> {
        params.validate()?;

        let column_width_px = ((params.max_width_px - params.gutter_width_px) / 2.0).max(0.0);
        let column_width_chars = (column_width_px / params.char_width_px).floor() as usize;
        let breakpoint = Breakpoint::for_column_width(column_width_chars, &tuning.breakpoints);

        let mut width_chars = (params.max_width_px / params.char_width_px).floor() as usize;
        if breakpoint == Breakpoint::Small {
            width_chars = width_chars / 2 * 2;
        }
        if width_chars < 2 {
            return Err(KinetypeError::layout(format!(
                "grid must be at least 2 cells wide, got {width_chars} \
                 (max_width_px={}, char_width_px={})",
                params.max_width_px, params.char_width_px
            )));
        }
        let gutter_width_chars = width_chars.saturating_sub(column_width_chars * 2);

        let mut b = Builder {
            tuning,
            width_chars,
            column_width_chars,
            gutter_width_chars,
            char_width_px: params.char_width_px,
            line_height_px: params.line_height_px,
            chars: Vec::new(),
            line_starts: vec![0],
            delay: 0.0,
            style: StyleStack::default(),
        };

        match breakpoint {
            Breakpoint::Large => b.large_header(content),
            Breakpoint::Medium => b.medium_header(content),
            Breakpoint::Small => b.small_header(content),
        }
        b.gap_block(breakpoint);

        let markup = if breakpoint == Breakpoint::Large {
            &tuning.markup_large
        } else {
            &tuning.markup_compact
        };
        b.body(&content.body_paragraphs, markup);
        b.credits(&content.credit_paragraphs, markup);

        let layout = b.finish(params, breakpoint);
        tracing::debug!(
            ?breakpoint,
            width = layout.width_chars,
            lines = layout.lines.len(),
            chars = layout.chars.len(),
            duration = layout.duration,
            "text layout built"
        );
        Ok(layout)
    }

    /// Sizing this layout was built from.
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Chosen breakpoint.
    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    /// Grid width in cells.
    pub fn width_chars(&self) -> usize {
        self.width_chars
    }

    /// Grid height in cells.
    pub fn height_chars(&self) -> usize {
        self.lines.len()
    }

    /// Header column width in cells.
    pub fn column_width_chars(&self) -> usize {
        self.column_width_chars
    }

    /// Header gutter width in cells.
    pub fn gutter_width_chars(&self) -> usize {
        self.gutter_width_chars
    }

    /// Grid width in pixels.
    pub fn width_px(&self) -> f64 {
        self.width_chars as f64 * self.params.char_width_px
    }

    /// Grid height in pixels.
    pub fn height_px(&self) -> f64 {
        self.lines.len() as f64 * self.params.line_height_px
    }

    /// Total reveal duration including trailing pauses.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Every character in traversal order.
    pub fn chars(&self) -> &[Character] {
        &self.chars
    }

    /// Mutable access for per-frame animation state.
    pub fn chars_mut(&mut self) -> &mut [Character] {
        &mut self.chars
    }

    /// Character by traversal index.
    pub fn char_at(&self, index: usize) -> Option<&Character> {
        self.chars.get(index)
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Characters of line `index`.
    pub fn line(&self, index: usize) -> &[Character] {
        &self.chars[self.lines[index].clone()]
    }

    /// All lines top to bottom.
    pub fn lines(&self) -> impl Iterator<Item = &[Character]> + '_ {
        self.lines.iter().map(|r| &self.chars[r.clone()])
    }

    /// Latest line whose first character is revealed at or before `time`.
    ///
    /// Returns 0 when `time` precedes every line.
    ///
    /// # Panics
    ///
    /// Panics if the layout has no lines.
    pub fn line_index_at_time(&self, time: f64) -> usize {
        assert!(!self.lines.is_empty(), "line_index_at_time on a layout with no lines");
        self.lines
            .iter()
            .rposition(|r| {
                self.chars
                    .get(r.start)
                    .is_some_and(|c| !r.is_empty() && time >= c.reveal_delay)
            })
            .unwrap_or(0)
    }

    /// Reveal delay of the first character of line `index`, wrapping past the last line.
    ///
    /// # Panics
    ///
    /// Panics if the layout has no lines.
    pub fn line_delay(&self, index: usize) -> f64 {
        let line = self.wrapped_line(index);
        self.chars
            .get(line.start)
            .filter(|_| !line.is_empty())
            .map_or(self.duration, |c| c.reveal_delay)
    }

    /// Time from the start of line `index` to the start of the next one (or to the end of the
    /// sequence for the last line), wrapping past the last line.
    ///
    /// # Panics
    ///
    /// Panics if the layout has no lines.
    pub fn line_duration(&self, index: usize) -> f64 {
        let index = self.wrap_index(index);
        let start = self.line_delay(index);
        if index + 1 == self.lines.len() {
            self.duration - start
        } else {
            self.line_delay(index + 1) - start
        }
    }

    /// Duration of every line, in order.
    pub fn line_durations(&self) -> Vec<f64> {
        (0..self.lines.len()).map(|i| self.line_duration(i)).collect()
    }

    /// Bounding box of each link's characters, in order of first appearance.
    pub fn link_rects(&self) -> &[(Arc<Link>, Rect)] {
        &self.link_rects
    }

    /// Bounding box of `link`, if any character carries it.
    pub fn link_rect(&self, link: &Link) -> Option<Rect> {
        self.link_rects
            .iter()
            .find(|(l, _)| **l == *link)
            .map(|(_, r)| *r)
    }

    /// Link whose bounding box contains `p` (text-block pixel space).
    pub fn link_at(&self, p: Point) -> Option<&Arc<Link>> {
        self.link_rects
            .iter()
            .find(|(_, r)| r.contains(p))
            .map(|(l, _)| l)
    }

    /// The grid as plain text, one row per line.
    pub fn to_text(&self) -> String {
        self.lines()
            .map(|line| line.iter().map(|c| c.value.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn wrap_index(&self, index: usize) -> usize {
        assert!(!self.lines.is_empty(), "line query on a layout with no lines");
        index % self.lines.len()
    }

    fn wrapped_line(&self, index: usize) -> Range<usize> {
        self.lines[self.wrap_index(index)].clone()
    }
}

struct Builder<'a> {
    tuning: &'a LayoutTuning,
    width_chars: usize,
    column_width_chars: usize,
    gutter_width_chars: usize,
    char_width_px: f64,
    line_height_px: f64,
    chars: Vec<Character>,
    line_starts: Vec<usize>,
    delay: f64,
    style: StyleStack,
}

impl Builder<'_> {
    fn current_line_len(&self) -> usize {
        self.chars.len() - self.line_starts.last().copied().unwrap_or(0)
    }

    fn set(&mut self, rate: Rate, kind: CharKind) {
        let frame = self.style.current_mut();
        frame.rate = rate;
        frame.kind = kind;
    }

    fn set_link(&mut self, film: &Film) {
        let frame = self.style.current_mut();
        frame.link = film.link.clone();
        frame.kind = if film.link.is_some() {
            CharKind::Link
        } else {
            CharKind::InactiveLink
        };
    }

    fn push(&mut self, text: &str) {
        for g in text.graphemes(true) {
            self.push_one(g);
        }
    }

    fn push_one(&mut self, value: &str) {
        if self.current_line_len() >= self.width_chars {
            self.newline();
        }
        let col = self.current_line_len();
        let row = self.line_starts.len() - 1;
        let rect = Rect::new(
            col as f64 * self.char_width_px,
            row as f64 * self.line_height_px,
            self.char_width_px,
            self.line_height_px,
        );
        let frame = self.style.current();
        let ch = Character::new(
            self.chars.len(),
            value,
            frame.kind,
            frame.link.clone(),
            rect,
            self.delay,
        );
        let step = frame.rate.seconds(&self.tuning.rates);
        self.chars.push(ch);
        self.wait(step);
    }

    /// Pad the current line with spaces and start a new one.
    fn newline(&mut self) {
        let remaining = self.width_chars.saturating_sub(self.current_line_len());
        if remaining > 0 {
            self.push(&" ".repeat(remaining));
        }
        self.line_starts.push(self.chars.len());
    }

    fn wait(&mut self, seconds: f64) {
        self.delay += seconds;
    }

    fn large_header(&mut self, content: &Content) {
        let pauses = self.tuning.pauses;
        self.style.save();
        self.style.current_mut().rate = Rate::Slow;

        for pair in content.films.chunks(2) {
            self.film_column(&pair[0], true);
            if let Some(right) = pair.get(1) {
                self.style.save();
                self.style.current_mut().kind = CharKind::Gap;
                self.push(&" ".repeat(self.gutter_width_chars));
                self.style.restore();
                self.film_column(right, true);
            }
            self.wait(pauses.long);
        }

        self.style.restore();
    }

    fn medium_header(&mut self, content: &Content) {
        let pauses = self.tuning.pauses;
        let left_width = self.column_width_chars + self.gutter_width_chars;
        self.style.save();

        for (i, film) in content.films.iter().enumerate() {
            self.style.save();
            if i == 0 {
                self.set(Rate::Slow, CharKind::Title);
                self.push(&pad_end(&content.title, left_width));
            } else {
                self.set(Rate::Slow, CharKind::Gap);
                self.push(&" ".repeat(left_width));
            }
            self.style.restore();

            self.style.save();
            self.style.current_mut().rate = Rate::Slow;
            self.film_column(film, false);
            self.style.restore();

            self.wait(pauses.long);
        }

        self.style.restore();
    }

    fn small_header(&mut self, content: &Content) {
        let pauses = self.tuning.pauses;
        let half = self.width_chars / 2;
        self.style.save();

        self.set(Rate::Slow, CharKind::Title);
        self.push(&content.title);
        self.newline();
        self.wait(pauses.long);

        self.set(Rate::Fast, CharKind::Gap);
        self.newline();
        self.wait(pauses.long);

        self.style.current_mut().rate = Rate::Slow;
        for film in &content.films {
            self.set_link(film);
            self.push(&pad_end(&film.short_title, half));
            self.push(&pad_end(&film.subtitle, half));
        }
        self.wait(pauses.long);

        self.style.restore();
    }

    fn film_column(&mut self, film: &Film, long_title: bool) {
        self.style.save();
        self.set_link(film);
        let title = if long_title {
            &film.long_title
        } else {
            &film.short_title
        };
        self.push(&space_between(title, &film.subtitle, self.column_width_chars));
        self.style.restore();
    }

    fn gap_block(&mut self, breakpoint: Breakpoint) {
        let pauses = self.tuning.pauses;
        let count = if breakpoint == Breakpoint::Large {
            self.tuning.gap_lines_large
        } else {
            self.tuning.gap_lines_compact
        };
        self.set(Rate::Fast, CharKind::Gap);
        for _ in 0..count {
            self.newline();
            self.wait(pauses.short);
        }
        self.wait(pauses.long);
    }

    fn paragraph(&mut self, text: &str, markup: &MarkupWidths) {
        let pauses = self.tuning.pauses;
        self.set(Rate::Medium, CharKind::Body);
        for line in line_wrap(&expand_markup(text, markup), self.width_chars) {
            self.push(&line);
            self.newline();
            self.wait(pauses.short);
        }
    }

    fn body(&mut self, paragraphs: &[String], markup: &MarkupWidths) {
        let pauses = self.tuning.pauses;
        for (i, text) in paragraphs.iter().enumerate() {
            self.paragraph(text, markup);
            self.wait(pauses.long);
            if i + 1 < paragraphs.len() {
                self.set(Rate::Fast, CharKind::Gap);
                self.newline();
                self.wait(pauses.long);
            }
        }

        self.set(Rate::Fast, CharKind::Gap);
        for i in 0..3 {
            self.newline();
            self.wait(if i == 2 { pauses.long } else { pauses.short });
        }
    }

    fn credits(&mut self, paragraphs: &[String], markup: &MarkupWidths) {
        let pauses = self.tuning.pauses;
        for (i, text) in paragraphs.iter().enumerate() {
            self.paragraph(text, markup);
            if i + 1 < paragraphs.len() {
                self.set(Rate::Fast, CharKind::Gap);
                self.newline();
                self.wait(pauses.short);
            }
        }
    }

    fn finish(mut self, params: LayoutParams, breakpoint: Breakpoint) -> TextLayout {
        while self.line_starts.len() > 1 && self.current_line_len() == 0 {
            self.line_starts.pop();
        }
        let total = self.chars.len();
        let lines: Vec<Range<usize>> = self
            .line_starts
            .iter()
            .enumerate()
            .map(|(i, &start)| start..self.line_starts.get(i + 1).copied().unwrap_or(total))
            .filter(|r| !r.is_empty())
            .collect();

        let mut link_rects: Vec<(Arc<Link>, Rect)> = Vec::new();
        for ch in &self.chars {
            let Some(link) = &ch.link else { continue };
            match link_rects.iter_mut().find(|(l, _)| l == link) {
                Some((_, rect)) => {
                    rect.expand(&ch.rect);
                }
                None => link_rects.push((link.clone(), ch.rect)),
            }
        }

        debug_assert!(
            self.chars
                .windows(2)
                .all(|w| w[0].reveal_delay <= w[1].reveal_delay)
        );
        debug_assert!(lines.iter().all(|r| r.len() <= self.width_chars));
        debug_assert_eq!(self.style.depth(), 0, "unbalanced style save/restore");

        TextLayout {
            params,
            breakpoint,
            width_chars: self.width_chars,
            column_width_chars: self.column_width_chars,
            gutter_width_chars: self.gutter_width_chars,
            chars: self.chars,
            lines,
            duration: self.delay,
            link_rects,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text.rs"]
mod tests;
