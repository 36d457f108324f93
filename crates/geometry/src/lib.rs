//! # geometry
//!
//! Stateless math shared by every frame: normalizing a drag into a
//! rectangle, and computing the uniform scale + translate that fits a
//! selection into the viewport.
//!
//! Nothing here touches the page; callers own all state.

use core_types::{ScrollOffset, SelectionRegion, ViewportSize};

/// Axis-aligned rectangle spanning two corner points, independent of drag
/// direction.
#[inline]
pub fn normalize_rect(x1: f64, y1: f64, x2: f64, y2: f64) -> SelectionRegion {
    SelectionRegion {
        x: x1.min(x2),
        y: y1.min(y2),
        width: (x1 - x2).abs(),
        height: (y1 - y2).abs(),
    }
}

/// Uniform scale plus translate (in viewport px) that maps a document-space
/// selection onto the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl FitTransform {
    /// Compensate for a root element that stays scrolled while transformed:
    /// the visible window starts at `scroll`, so content must move with it.
    pub fn offset_by_scroll(self, scroll: ScrollOffset) -> Self {
        Self {
            translate_x: self.translate_x + scroll.x,
            translate_y: self.translate_y + scroll.y,
            ..self
        }
    }

    /// CSS `transform` value. Translate comes first so it is expressed in
    /// unscaled viewport px; requires `transform-origin: 0 0`.
    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

/// Fit-inside transform: the smaller axis ratio wins so the whole selection
/// stays visible, and the scaled selection is centered on the other axis.
///
/// `selection` must have a positive width and height.
pub fn compute_fit_transform(selection: SelectionRegion, viewport: ViewportSize) -> FitTransform {
    let scale = (viewport.width / selection.width).min(viewport.height / selection.height);

    let center_x = (viewport.width - selection.width * scale) / 2.0;
    let center_y = (viewport.height - selection.height * scale) / 2.0;

    FitTransform {
        scale,
        translate_x: -selection.x * scale + center_x,
        translate_y: -selection.y * scale + center_y,
    }
}
