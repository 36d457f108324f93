use crate::key::KeyInput;
use crate::pointer::PointerInput;

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    Key(KeyInput),
    Pointer(PointerInput),
}

/// What the host must do with the native event after an agent handled it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Disposition {
    /// Leave the event alone.
    #[default]
    Pass,
    /// `stopPropagation()` only.
    StopPropagation,
    /// `preventDefault()` and `stopPropagation()`.
    Suppress,
}

impl Disposition {
    pub fn prevents_default(self) -> bool {
        matches!(self, Disposition::Suppress)
    }

    pub fn stops_propagation(self) -> bool {
        !matches!(self, Disposition::Pass)
    }
}
