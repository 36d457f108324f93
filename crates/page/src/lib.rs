//! # page
//!
//! The seam between the magnifier and a frame's document.
//!
//! [`PageDom`] is everything the magnifier reads from or writes to a page:
//! scroll and viewport geometry, a handful of inline style properties on the
//! root and body elements, one positioned overlay element, and body classes
//! for cursor affordances. A real host implements it over the DOM;
//! [`MemoryPage`] implements it in memory for tests and the demo.

mod memory;

pub use memory::{MemoryOverlay, MemoryPage};

use core_types::{ScrollOffset, SelectionRegion, ViewportSize};
use std::fmt;

/// Element whose inline style the magnifier touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleTarget {
    /// `document.documentElement`
    Root,
    /// `document.body`
    Body,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleProperty {
    Transform,
    TransformOrigin,
    Overflow,
}

impl StyleProperty {
    pub fn css_name(self) -> &'static str {
        match self {
            StyleProperty::Transform => "transform",
            StyleProperty::TransformOrigin => "transform-origin",
            StyleProperty::Overflow => "overflow",
        }
    }
}

impl fmt::Display for StyleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleTarget::Root => f.write_str("html"),
            StyleTarget::Body => f.write_str("body"),
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// Opaque handle to an overlay element inserted by [`PageDom::insert_overlay`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayHandle(u64);

impl OverlayHandle {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Document access for one frame.
///
/// Calls are made from the frame's own event loop only; a sequence of
/// writes inside one handler is never observed half-applied.
pub trait PageDom {
    /// `window.scrollX` / `window.scrollY`.
    fn scroll_offset(&self) -> ScrollOffset;

    /// `window.innerWidth` / `window.innerHeight`.
    fn viewport_size(&self) -> ViewportSize;

    /// Root element client area, which excludes scrollbars.
    fn client_size(&self) -> ViewportSize;

    /// Inline style value, or `None` when the element carries no override.
    fn style(&self, target: StyleTarget, property: StyleProperty) -> Option<String>;

    /// Set an inline style value; `None` removes the override.
    fn set_style(&mut self, target: StyleTarget, property: StyleProperty, value: Option<&str>);

    /// Append a positioned element with `class` to the body.
    fn insert_overlay(&mut self, class: &str) -> OverlayHandle;

    /// Position/size an overlay in viewport px. Unknown handles are ignored.
    fn place_overlay(&mut self, overlay: OverlayHandle, rect: SelectionRegion);

    /// Detach an overlay. Unknown handles are ignored.
    fn remove_overlay(&mut self, overlay: OverlayHandle);

    fn add_body_class(&mut self, class: &str);

    fn remove_body_class(&mut self, class: &str);
}
