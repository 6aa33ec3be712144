//! Alert latching for binary-sensor widgets.

use serde::Serialize;

/// The alert output's published state.
///
/// Without stickiness the alert mirrors every source update. With it, an
/// alert raised by a `true` update stays raised: later `false` updates are
/// dropped until the alert is cleared from outside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertLatch {
    state: Option<bool>,
}

impl AlertLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last published state; `None` before the first publish.
    pub fn state(&self) -> Option<bool> {
        self.state
    }

    /// Whether the alert is currently raised.
    pub fn is_raised(&self) -> bool {
        self.state == Some(true)
    }

    /// Feed one source update. Returns the state that was published, if any.
    pub fn on_source_state(&mut self, sticky: bool, incoming: bool) -> Option<bool> {
        if !sticky {
            return self.publish(incoming);
        }
        if self.state == Some(incoming) || !incoming {
            return None;
        }
        self.publish(true)
    }

    /// Clear a latched alert (the user acknowledging it).
    pub fn clear(&mut self) -> Option<bool> {
        if self.state == Some(false) {
            return None;
        }
        self.publish(false)
    }

    fn publish(&mut self, state: bool) -> Option<bool> {
        self.state = Some(state);
        Some(state)
    }
}
