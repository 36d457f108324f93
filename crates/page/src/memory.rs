use crate::{OverlayHandle, PageDom, StyleProperty, StyleTarget};
use core_types::{ScrollOffset, SelectionRegion, ViewportSize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug, PartialEq)]
pub struct MemoryOverlay {
    pub class: String,
    pub rect: Option<SelectionRegion>,
}

/// In-memory page: geometry is fixed by the caller, styles/overlays/classes
/// are recorded exactly as written.
#[derive(Clone, Debug, Default)]
pub struct MemoryPage {
    scroll: ScrollOffset,
    viewport: ViewportSize,
    client: ViewportSize,
    styles: BTreeMap<(StyleTarget, StyleProperty), String>,
    overlays: BTreeMap<OverlayHandle, MemoryOverlay>,
    next_overlay: u64,
    body_classes: BTreeSet<String>,
}

impl MemoryPage {
    /// A page whose client area equals the viewport (no scrollbars).
    pub fn new(viewport: ViewportSize) -> Self {
        Self {
            viewport,
            client: viewport,
            ..Self::default()
        }
    }

    pub fn with_client_size(mut self, client: ViewportSize) -> Self {
        self.client = client;
        self
    }

    pub fn with_scroll(mut self, scroll: ScrollOffset) -> Self {
        self.scroll = scroll;
        self
    }

    /// Seed an inline style as if the page author had set it.
    pub fn with_style(mut self, target: StyleTarget, property: StyleProperty, value: &str) -> Self {
        self.styles.insert((target, property), value.to_string());
        self
    }

    pub fn scroll_to(&mut self, scroll: ScrollOffset) {
        self.scroll = scroll;
    }

    pub fn overlays(&self) -> impl Iterator<Item = &MemoryOverlay> {
        self.overlays.values()
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    pub fn has_body_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    /// Every inline style currently set, in a stable order.
    pub fn inline_styles(&self) -> Vec<(StyleTarget, StyleProperty, String)> {
        self.styles
            .iter()
            .map(|((t, p), v)| (*t, *p, v.clone()))
            .collect()
    }
}

impl PageDom for MemoryPage {
    fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }

    fn viewport_size(&self) -> ViewportSize {
        self.viewport
    }

    fn client_size(&self) -> ViewportSize {
        self.client
    }

    fn style(&self, target: StyleTarget, property: StyleProperty) -> Option<String> {
        self.styles.get(&(target, property)).cloned()
    }

    fn set_style(&mut self, target: StyleTarget, property: StyleProperty, value: Option<&str>) {
        log::trace!(target: "page.memory", "{} {} = {:?}", target, property, value);
        match value {
            // An empty declaration clears the override, as on a real element.
            Some(v) if !v.is_empty() => {
                self.styles.insert((target, property), v.to_string());
            }
            _ => {
                self.styles.remove(&(target, property));
            }
        }
    }

    fn insert_overlay(&mut self, class: &str) -> OverlayHandle {
        let handle = OverlayHandle::from_raw(self.next_overlay);
        self.next_overlay += 1;
        self.overlays.insert(
            handle,
            MemoryOverlay {
                class: class.to_string(),
                rect: None,
            },
        );
        handle
    }

    fn place_overlay(&mut self, overlay: OverlayHandle, rect: SelectionRegion) {
        if let Some(o) = self.overlays.get_mut(&overlay) {
            o.rect = Some(rect);
        }
    }

    fn remove_overlay(&mut self, overlay: OverlayHandle) {
        self.overlays.remove(&overlay);
    }

    fn add_body_class(&mut self, class: &str) {
        self.body_classes.insert(class.to_string());
    }

    fn remove_body_class(&mut self, class: &str) {
        self.body_classes.remove(class);
    }
}
