//! Filler rows continuing the alternating background past the last item.

use crate::controller::MAX_WINDOW_SLOTS;
use crate::surface::ScrollSurface;
use crate::ALT_ROW_CLASS;

/// Number of filler rows needed to cover `fill_height`.
///
/// The result `n` satisfies `n * row_height >= fill_height` and
/// `n * row_height < fill_height + row_height`, up to [`MAX_WINDOW_SLOTS`].
pub fn filler_row_count(fill_height: f32, row_height: f32) -> usize {
    if fill_height <= 0.0 || row_height <= 0.0 {
        return 0;
    }
    ((fill_height / row_height).ceil() as usize).min(MAX_WINDOW_SLOTS)
}

/// Placeholder rows below the real content.
///
/// Rows are created on demand and never destroyed; surplus rows are hidden.
/// One spare row beyond the displayed count is kept materialized.
#[derive(Debug)]
pub struct BackgroundFiller<V> {
    rows: Vec<V>,
    attached: bool,
    shown: usize,
}

impl<V> Default for BackgroundFiller<V> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            attached: false,
            shown: 0,
        }
    }
}

impl<V: Copy> BackgroundFiller<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filler rows currently displayed.
    pub fn shown(&self) -> usize {
        self.shown
    }

    /// Filler rows materialized in the surface (displayed or not).
    pub fn materialized(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[V] {
        &self.rows
    }

    /// Recompute filler rows for `fill_height` of empty viewport.
    ///
    /// `last_index` is the logical index of the last displayed real row;
    /// parity continues from it.
    pub fn update<S>(
        &mut self,
        surface: &mut S,
        fill_height: f32,
        row_height: f32,
        last_index: Option<usize>,
    ) where
        S: ScrollSurface<Visual = V>,
    {
        let count = filler_row_count(fill_height, row_height);
        let Some(last_index) = last_index.filter(|_| count > 0) else {
            self.detach(surface);
            return;
        };

        if !self.attached {
            surface.set_filler_attached(true);
            self.attached = true;
        }

        while self.rows.len() < count + 1 {
            self.rows.push(surface.make_filler_row());
        }

        for (i, row) in self.rows.iter().enumerate() {
            if i < count {
                let index = last_index + 1 + i;
                surface.set_height(*row, row_height);
                surface.set_class(*row, ALT_ROW_CLASS, index % 2 == 1);
                surface.set_displayed(*row, true);
            } else {
                surface.set_displayed(*row, false);
            }
        }

        if self.shown != count {
            log::trace!("[filler] {} rows shown ({} materialized)", count, self.rows.len());
        }
        self.shown = count;
    }

    /// Take the filler container out of the viewport.
    pub fn detach<S>(&mut self, surface: &mut S)
    where
        S: ScrollSurface<Visual = V>,
    {
        if self.attached {
            surface.set_filler_attached(false);
            self.attached = false;
        }
        self.shown = 0;
    }
}
