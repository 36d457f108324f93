//! Page-level magnification, owned by the top frame's agent.
//!
//! State lives in one place: `snapshot` is `Some` exactly while the page is
//! magnified, so the two can never disagree.

use bus::{BroadcastChannel, MagnifierMessage};
use core_types::SelectionRegion;
use geometry::compute_fit_transform;
use page::{PageDom, StyleProperty, StyleTarget};

use crate::config::MagnifierConfig;

const OVERFLOW_HIDDEN: &str = "hidden";
const ORIGIN_TOP_LEFT: &str = "0 0";

/// Inline style values as they were right before magnification. `None`
/// means the element carried no override.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageStyleSnapshot {
    pub root_transform: Option<String>,
    pub root_transform_origin: Option<String>,
    pub root_overflow: Option<String>,
    pub body_overflow: Option<String>,
}

impl PageStyleSnapshot {
    pub fn capture<D: PageDom + ?Sized>(dom: &D) -> Self {
        Self {
            root_transform: dom.style(StyleTarget::Root, StyleProperty::Transform),
            root_transform_origin: dom.style(StyleTarget::Root, StyleProperty::TransformOrigin),
            root_overflow: dom.style(StyleTarget::Root, StyleProperty::Overflow),
            body_overflow: dom.style(StyleTarget::Body, StyleProperty::Overflow),
        }
    }

    /// Write every value back verbatim, clearing overrides that were unset.
    pub fn restore<D: PageDom + ?Sized>(self, dom: &mut D) {
        dom.set_style(
            StyleTarget::Root,
            StyleProperty::Transform,
            self.root_transform.as_deref(),
        );
        dom.set_style(
            StyleTarget::Root,
            StyleProperty::TransformOrigin,
            self.root_transform_origin.as_deref(),
        );
        dom.set_style(
            StyleTarget::Root,
            StyleProperty::Overflow,
            self.root_overflow.as_deref(),
        );
        dom.set_style(
            StyleTarget::Body,
            StyleProperty::Overflow,
            self.body_overflow.as_deref(),
        );
    }
}

#[derive(Debug)]
pub struct MagnifierController {
    snapshot: Option<PageStyleSnapshot>,
    crosshair_class: String,
}

impl MagnifierController {
    pub fn new(config: &MagnifierConfig) -> Self {
        Self {
            snapshot: None,
            crosshair_class: config.crosshair_class.clone(),
        }
    }

    pub fn is_magnified(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn snapshot(&self) -> Option<&PageStyleSnapshot> {
        self.snapshot.as_ref()
    }

    /// Scale `region` (document coordinates) up to fill the viewport.
    ///
    /// Returns `true` if the page transitioned to magnified; an already
    /// magnified page or a degenerate region leaves everything untouched.
    pub fn activate<D, C>(&mut self, dom: &mut D, channel: &C, region: SelectionRegion) -> bool
    where
        D: PageDom + ?Sized,
        C: BroadcastChannel + ?Sized,
    {
        if self.is_magnified() {
            log::debug!(target: "magnifier.controller", "activate ignored: already magnified");
            return false;
        }
        let usable = |v: f64| v.is_finite() && v > 0.0;
        let viewport = dom.viewport_size();
        if !usable(region.width)
            || !usable(region.height)
            || !region.x.is_finite()
            || !region.y.is_finite()
        {
            log::debug!(
                target: "magnifier.controller",
                "activate ignored: degenerate region {region:?}"
            );
            return false;
        }
        if !usable(viewport.width) || !usable(viewport.height) {
            log::debug!(
                target: "magnifier.controller",
                "activate ignored: empty viewport {viewport:?}"
            );
            return false;
        }

        let scroll = dom.scroll_offset();
        let transform = compute_fit_transform(region, viewport).offset_by_scroll(scroll);

        let snapshot = PageStyleSnapshot::capture(dom);
        dom.set_style(
            StyleTarget::Root,
            StyleProperty::TransformOrigin,
            Some(ORIGIN_TOP_LEFT),
        );
        dom.set_style(
            StyleTarget::Root,
            StyleProperty::Transform,
            Some(transform.to_css().as_str()),
        );
        dom.set_style(StyleTarget::Root, StyleProperty::Overflow, Some(OVERFLOW_HIDDEN));
        dom.set_style(StyleTarget::Body, StyleProperty::Overflow, Some(OVERFLOW_HIDDEN));
        self.snapshot = Some(snapshot);

        log::info!(
            target: "magnifier.controller",
            "magnified {region:?} at scale {:.3} (scroll {:?})",
            transform.scale,
            scroll
        );
        channel.broadcast(&MagnifierMessage::StateChange { magnified: true });
        true
    }

    /// Undo the last activation. Returns `true` if the page transitioned to
    /// unmagnified.
    pub fn exit<D, C>(&mut self, dom: &mut D, channel: &C) -> bool
    where
        D: PageDom + ?Sized,
        C: BroadcastChannel + ?Sized,
    {
        let Some(snapshot) = self.snapshot.take() else {
            log::debug!(target: "magnifier.controller", "exit ignored: not magnified");
            return false;
        };
        snapshot.restore(dom);
        dom.remove_body_class(&self.crosshair_class);

        log::info!(target: "magnifier.controller", "magnification cleared");
        channel.broadcast(&MagnifierMessage::StateChange { magnified: false });
        true
    }
}
