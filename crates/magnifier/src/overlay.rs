//! The rectangle drawn while a drag is in progress.
//!
//! Purely visual and local to one frame; never consulted for state.

use geometry::normalize_rect;
use page::{OverlayHandle, PageDom};

#[derive(Debug, Default)]
pub struct SelectionOverlay {
    handle: Option<OverlayHandle>,
}

impl SelectionOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_live(&self) -> bool {
        self.handle.is_some()
    }

    /// Insert a fresh element, replacing any previous one.
    pub fn create<D: PageDom + ?Sized>(&mut self, dom: &mut D, class: &str) {
        self.remove(dom);
        self.handle = Some(dom.insert_overlay(class));
    }

    /// Span the element between two viewport points. No-op without an element.
    pub fn update<D: PageDom + ?Sized>(&mut self, dom: &mut D, x1: f64, y1: f64, x2: f64, y2: f64) {
        if let Some(handle) = self.handle {
            dom.place_overlay(handle, normalize_rect(x1, y1, x2, y2));
        }
    }

    pub fn remove<D: PageDom + ?Sized>(&mut self, dom: &mut D) {
        if let Some(handle) = self.handle.take() {
            dom.remove_overlay(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{SelectionRegion, ViewportSize};
    use page::MemoryPage;

    fn page() -> MemoryPage {
        MemoryPage::new(ViewportSize::new(800.0, 600.0))
    }

    #[test]
    fn create_replaces_existing_element() {
        let mut dom = page();
        let mut overlay = SelectionOverlay::new();
        overlay.create(&mut dom, "sel");
        overlay.create(&mut dom, "sel");
        assert_eq!(dom.overlay_count(), 1);
        assert!(overlay.is_live());
    }

    #[test]
    fn update_normalizes_reverse_drag() {
        let mut dom = page();
        let mut overlay = SelectionOverlay::new();
        overlay.create(&mut dom, "sel");
        overlay.update(&mut dom, 50.0, 60.0, 10.0, 20.0);

        let rect = dom.overlays().next().and_then(|o| o.rect);
        assert_eq!(rect, Some(SelectionRegion::new(10.0, 20.0, 40.0, 40.0)));
    }

    #[test]
    fn update_and_remove_without_element_are_noops() {
        let mut dom = page();
        let mut overlay = SelectionOverlay::new();
        overlay.update(&mut dom, 0.0, 0.0, 5.0, 5.0);
        overlay.remove(&mut dom);
        assert_eq!(dom.overlay_count(), 0);
        assert!(!overlay.is_live());

        overlay.create(&mut dom, "sel");
        overlay.remove(&mut dom);
        overlay.remove(&mut dom);
        assert_eq!(dom.overlay_count(), 0);
    }
}
