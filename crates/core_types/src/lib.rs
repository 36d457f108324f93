use serde::{Deserialize, Serialize};

pub type FrameId = u64;

/// A position in CSS px. Whether it is in viewport or document space is
/// decided by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// `true` if `p` lies inside `[0, width) x [0, height)`.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x < self.width && p.y < self.height
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

impl ScrollOffset {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in document coordinates, as carried by an
/// activation request. Never stored beyond a single activation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SelectionRegion {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Shift the region by the given scroll offsets (viewport -> document).
    pub fn scrolled_by(self, scroll: ScrollOffset) -> Self {
        Self {
            x: self.x + scroll.x,
            y: self.y + scroll.y,
            ..self
        }
    }

    pub fn exceeds(&self, min: f64) -> bool {
        self.width > min && self.height > min
    }
}
