use input_core::Key;

#[derive(Clone, Debug)]
pub struct MagnifierConfig {
    /// Key that arms selection, and exits magnification in the top frame.
    pub modifier: Key,
    /// A drag must exceed this on both axes (CSS px) to count as a selection.
    pub min_selection_px: f64,
    /// Body class toggled while a drag is in progress.
    pub crosshair_class: String,
    /// Class of the overlay element drawn during a drag.
    pub overlay_class: String,
}

impl Default for MagnifierConfig {
    fn default() -> Self {
        Self {
            modifier: Key::Shift,
            min_selection_px: 10.0,
            crosshair_class: "magnifier-cursor-crosshair".to_string(),
            overlay_class: "magnifier-selection-rect-visual".to_string(),
        }
    }
}
