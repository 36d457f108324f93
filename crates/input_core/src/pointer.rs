//! Pointer input.

use core_types::Point;

/// Mouse button, numbered like `MouseEvent.button`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Auxiliary,
    Secondary,
    Other(i16),
}

impl PointerButton {
    pub fn from_dom_button(button: i16) -> Self {
        match button {
            0 => PointerButton::Primary,
            1 => PointerButton::Auxiliary,
            2 => PointerButton::Secondary,
            n => PointerButton::Other(n),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// The element an event was dispatched to, reduced to what drag-start
/// eligibility needs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventTarget {
    /// Tag name as reported by the DOM (any case).
    pub tag_name: String,
    pub content_editable: bool,
}

impl EventTarget {
    pub fn element(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            content_editable: false,
        }
    }

    pub fn editable(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            content_editable: true,
        }
    }

    /// `true` for form controls and content-editable hosts, where a press
    /// must keep its native text-editing meaning.
    pub fn accepts_text_input(&self) -> bool {
        if self.content_editable {
            return true;
        }
        ["input", "textarea", "select"]
            .iter()
            .any(|t| self.tag_name.eq_ignore_ascii_case(t))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointerInput {
    pub phase: PointerPhase,
    pub button: PointerButton,
    /// Viewport coordinates (`clientX`/`clientY`).
    pub position: Point,
    pub target: EventTarget,
}

impl PointerInput {
    pub fn down(x: f64, y: f64, target: EventTarget) -> Self {
        Self {
            phase: PointerPhase::Down,
            button: PointerButton::Primary,
            position: Point::new(x, y),
            target,
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self {
            phase: PointerPhase::Move,
            button: PointerButton::Primary,
            position: Point::new(x, y),
            target: EventTarget::default(),
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self {
            phase: PointerPhase::Up,
            button: PointerButton::Primary,
            position: Point::new(x, y),
            target: EventTarget::default(),
        }
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    #[inline]
    pub fn is_primary(&self) -> bool {
        self.button == PointerButton::Primary
    }
}
