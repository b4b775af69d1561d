//! Event routing for rendered points.
//!
//! Instead of wiring closures onto the map library, each session builds a
//! [`Subscriptions`] table that maps an [`EventKind`] to the [`Action`] the
//! interaction controller should run. The table is fixed once built.

use std::collections::HashMap;

/// How the user points at things. Chosen once at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Pointer,
    Touch,
}

/// What the host environment reports about touch support.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceCapabilities {
    pub has_touch_events: bool,
    pub max_touch_points: u32,
}

impl InputMode {
    /// Touch if the device exposes touch events or any touch points.
    #[must_use]
    pub fn detect(caps: DeviceCapabilities) -> Self {
        if caps.has_touch_events || caps.max_touch_points > 0 {
            InputMode::Touch
        } else {
            InputMode::Pointer
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    TouchStart,
    MouseEnter,
    MouseLeave,
    /// The panel's explicit close control.
    CloseControl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Select,
    ShowHover,
    HideHover,
    Dismiss,
}

/// An event delivered by the map library or the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEvent {
    pub kind: EventKind,
    /// The point under the event, when there is one.
    pub feature_id: Option<String>,
}

impl MapEvent {
    #[must_use]
    pub fn on_feature(kind: EventKind, feature_id: impl Into<String>) -> Self {
        Self {
            kind,
            feature_id: Some(feature_id.into()),
        }
    }

    #[must_use]
    pub fn click(feature_id: impl Into<String>) -> Self {
        Self::on_feature(EventKind::Click, feature_id)
    }

    #[must_use]
    pub fn tap(feature_id: impl Into<String>) -> Self {
        Self::on_feature(EventKind::TouchStart, feature_id)
    }

    #[must_use]
    pub fn enter(feature_id: impl Into<String>) -> Self {
        Self::on_feature(EventKind::MouseEnter, feature_id)
    }

    #[must_use]
    pub fn leave() -> Self {
        Self {
            kind: EventKind::MouseLeave,
            feature_id: None,
        }
    }

    #[must_use]
    pub fn dismiss() -> Self {
        Self {
            kind: EventKind::CloseControl,
            feature_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscriptions {
    table: HashMap<EventKind, Action>,
}

impl Subscriptions {
    /// Bind selection to click for pointers or to touch start for touch
    /// devices; hover and dismiss are bound in both modes.
    #[must_use]
    pub fn for_input(mode: InputMode) -> Self {
        let select_on = match mode {
            InputMode::Pointer => EventKind::Click,
            InputMode::Touch => EventKind::TouchStart,
        };
        let table = HashMap::from([
            (select_on, Action::Select),
            (EventKind::MouseEnter, Action::ShowHover),
            (EventKind::MouseLeave, Action::HideHover),
            (EventKind::CloseControl, Action::Dismiss),
        ]);
        Self { table }
    }

    #[must_use]
    pub fn action_for(&self, kind: EventKind) -> Option<Action> {
        self.table.get(&kind).copied()
    }

    #[must_use]
    pub fn is_bound(&self, kind: EventKind) -> bool {
        self.table.contains_key(&kind)
    }
}
