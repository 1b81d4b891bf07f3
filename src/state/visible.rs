use crate::{foundation::core::Rect, layout::char::Character};

/// Page-space rectangles supplied by the viewport layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewRects {
    /// Visible window.
    pub viewport: Rect,
    /// Video player box; cells under it are hidden.
    pub player: Rect,
    /// Text block; character rects are relative to its origin.
    pub text: Rect,
}

impl ViewRects {
    /// Viewport and player moved into text-block space.
    fn text_relative(&self) -> (Rect, Rect) {
        let (ox, oy) = (-self.text.x, -self.text.y);
        let mut viewport = self.viewport;
        let mut player = self.player;
        viewport.translate(ox, oy);
        player.translate(ox, oy);
        (viewport, player)
    }
}

/// Characters on screen and not covered by the player.
pub fn visible_chars<'a>(
    chars: &'a [Character],
    rects: &ViewRects,
) -> impl Iterator<Item = &'a Character> + 'a {
    let (viewport, player) = rects.text_relative();
    chars
        .iter()
        .filter(move |c| viewport.intersects(&c.rect) && !player.intersects(&c.rect))
}

/// Indices of visible space cells, recomputed only when the layout or rects change.
#[derive(Clone, Debug, Default)]
pub struct VisibleSpaces {
    key: Option<(u64, ViewRects)>,
    spaces: Vec<usize>,
}

impl VisibleSpaces {
    /// Visible spaces for layout `generation` under `rects`.
    pub fn get(&mut self, generation: u64, rects: ViewRects, chars: &[Character]) -> &[usize] {
        if self.key != Some((generation, rects)) {
            self.spaces = visible_chars(chars, &rects)
                .filter(|c| c.is_space())
                .map(|c| c.index)
                .collect();
            self.key = Some((generation, rects));
            tracing::trace!(generation, spaces = self.spaces.len(), "visible spaces recomputed");
        }
        &self.spaces
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/visible.rs"]
mod tests;
