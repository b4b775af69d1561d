//! Popup and selection state machine.
//!
//! ```text
//!   idle ──select──▶ selected ──select──▶ selected
//!     ▲                 │
//!     └────dismiss──────┘
//! ```
//!
//! The hover popup runs beside this machine and never affects it. Handlers
//! are plain functions from (event, current map state) to a list of effects;
//! [`MapSync`](crate::MapSync) and the side panel carry the effects out.

use crate::display::{Cursor, PopupSlot};
use crate::events::{Action, InputMode, MapEvent, Subscriptions};
use crate::map_sync::{MapDisplayState, MapEffect};
use crate::types::Feature;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Selected { feature_id: String, ordinal: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEffect {
    Show,
    Hide,
    Highlight(usize),
    ClearHighlights,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Map(MapEffect),
    Panel(PanelEffect),
}

#[derive(Debug)]
pub struct InteractionController {
    input: InputMode,
    subscriptions: Subscriptions,
    selection: Selection,
}

impl InteractionController {
    #[must_use]
    pub fn new(input: InputMode) -> Self {
        Self {
            input,
            subscriptions: Subscriptions::for_input(input),
            selection: Selection::Idle,
        }
    }

    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        self.input
    }

    #[must_use]
    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Route `event` through the subscription table.
    ///
    /// Unbound events, and point events for features that are not currently
    /// rendered, produce no effects.
    pub fn handle(&mut self, event: &MapEvent, state: &MapDisplayState) -> Vec<Effect> {
        let Some(action) = self.subscriptions.action_for(event.kind) else {
            tracing::debug!(kind = ?event.kind, "ignoring unbound event");
            return Vec::new();
        };

        let target = event
            .feature_id
            .as_deref()
            .and_then(|id| state.visible_feature(id));

        match (action, target) {
            (Action::Select, Some(feature)) => self.select(feature, state),
            (Action::ShowHover, Some(feature)) => show_hover(feature),
            (Action::HideHover, _) => hide_hover(state),
            (Action::Dismiss, _) => self.dismiss(state),
            (Action::Select | Action::ShowHover, None) => {
                tracing::debug!(
                    feature_id = event.feature_id.as_deref().unwrap_or(""),
                    "event target is not a rendered point"
                );
                Vec::new()
            }
        }
    }

    fn select(&mut self, feature: &Feature, state: &MapDisplayState) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(5);
        if state.popup(PopupSlot::Selected).is_some() {
            effects.push(Effect::Map(MapEffect::HidePopup(PopupSlot::Selected)));
        }
        effects.push(Effect::Map(MapEffect::ShowPopup {
            slot: PopupSlot::Selected,
            feature_id: feature.id.clone(),
            at: feature.coordinate,
            html: feature.description.clone(),
        }));
        effects.push(Effect::Panel(PanelEffect::Show));
        effects.push(Effect::Panel(PanelEffect::ClearHighlights));
        effects.push(Effect::Panel(PanelEffect::Highlight(feature.ordinal)));

        self.selection = Selection::Selected {
            feature_id: feature.id.clone(),
            ordinal: feature.ordinal,
        };
        effects
    }

    fn dismiss(&mut self, state: &MapDisplayState) -> Vec<Effect> {
        let mut effects = vec![Effect::Panel(PanelEffect::Hide)];
        if state.popup(PopupSlot::Selected).is_some() {
            effects.push(Effect::Map(MapEffect::HidePopup(PopupSlot::Selected)));
        }
        effects.push(Effect::Panel(PanelEffect::ClearHighlights));
        self.selection = Selection::Idle;
        effects
    }
}

fn show_hover(feature: &Feature) -> Vec<Effect> {
    vec![
        Effect::Map(MapEffect::SetCursor(Cursor::Pointer)),
        Effect::Map(MapEffect::ShowPopup {
            slot: PopupSlot::Hover,
            feature_id: feature.id.clone(),
            at: feature.coordinate,
            html: feature.description.clone(),
        }),
    ]
}

fn hide_hover(state: &MapDisplayState) -> Vec<Effect> {
    let mut effects = vec![Effect::Map(MapEffect::SetCursor(Cursor::Default))];
    if state.popup(PopupSlot::Hover).is_some() {
        effects.push(Effect::Map(MapEffect::HidePopup(PopupSlot::Hover)));
    }
    effects
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use storefinder_core::LocationRecord;

    use super::*;
    use crate::memory::InMemoryMap;
    use crate::{FeatureStore, MapSync};

    fn sync() -> MapSync<InMemoryMap> {
        let records: Vec<LocationRecord> = [("x", 32.7, -117.1), ("y", 34.0, -118.2)]
            .iter()
            .map(|(id, lat, lng)| LocationRecord {
                latitude: Some(json!(lat)),
                longitude: Some(json!(lng)),
                id: Some(json!(id)),
                postal_code: None,
                description: Some(format!("<b>{id}</b>")),
            })
            .collect();
        let (store, _) = FeatureStore::build(&records);
        let mut sync = MapSync::new(InMemoryMap::default(), Arc::new(store));
        sync.ensure_layer();
        sync
    }

    fn run(
        ctrl: &mut InteractionController,
        sync: &mut MapSync<InMemoryMap>,
        ev: &MapEvent,
    ) -> Vec<Effect> {
        let effects = ctrl.handle(ev, sync.state());
        for e in &effects {
            if let Effect::Map(m) = e {
                sync.apply_effect(m);
            }
        }
        effects
    }

    #[test]
    fn click_from_idle_opens_popup_and_highlights_entry() {
        let mut sync = sync();
        let mut ctrl = InteractionController::new(InputMode::Pointer);
        let effects = run(&mut ctrl, &mut sync, &MapEvent::click("y"));

        assert!(effects.contains(&Effect::Panel(PanelEffect::Highlight(1))));
        assert!(!effects.contains(&Effect::Map(MapEffect::HidePopup(PopupSlot::Selected))));
        assert_eq!(
            ctrl.selection(),
            &Selection::Selected {
                feature_id: "y".to_string(),
                ordinal: 1
            }
        );
        assert_eq!(sync.state().popup(PopupSlot::Selected).unwrap().feature_id, "y");
    }

    #[test]
    fn second_click_replaces_first_popup() {
        let mut sync = sync();
        let mut ctrl = InteractionController::new(InputMode::Pointer);
        run(&mut ctrl, &mut sync, &MapEvent::click("x"));
        let effects = run(&mut ctrl, &mut sync, &MapEvent::click("y"));

        assert_eq!(
            effects.first(),
            Some(&Effect::Map(MapEffect::HidePopup(PopupSlot::Selected)))
        );
        assert_eq!(sync.state().popup(PopupSlot::Selected).unwrap().feature_id, "y");
        assert_eq!(sync.display().open_popups(PopupSlot::Selected), 1);
    }

    #[test]
    fn dismiss_returns_to_idle() {
        let mut sync = sync();
        let mut ctrl = InteractionController::new(InputMode::Pointer);
        run(&mut ctrl, &mut sync, &MapEvent::click("x"));
        let effects = run(&mut ctrl, &mut sync, &MapEvent::dismiss());

        assert!(effects.contains(&Effect::Panel(PanelEffect::ClearHighlights)));
        assert!(effects.contains(&Effect::Panel(PanelEffect::Hide)));
        assert_eq!(ctrl.selection(), &Selection::Idle);
        assert!(sync.state().popup(PopupSlot::Selected).is_none());
    }

    #[test]
    fn hover_does_not_touch_selection() {
        let mut sync = sync();
        let mut ctrl = InteractionController::new(InputMode::Pointer);
        run(&mut ctrl, &mut sync, &MapEvent::click("x"));
        run(&mut ctrl, &mut sync, &MapEvent::enter("y"));

        assert_eq!(sync.state().popup(PopupSlot::Selected).unwrap().feature_id, "x");
        assert_eq!(sync.state().popup(PopupSlot::Hover).unwrap().feature_id, "y");
        assert_eq!(sync.state().cursor(), Cursor::Pointer);

        run(&mut ctrl, &mut sync, &MapEvent::leave());
        assert!(sync.state().popup(PopupSlot::Hover).is_none());
        assert!(sync.state().popup(PopupSlot::Selected).is_some());
        assert_eq!(sync.state().cursor(), Cursor::Default);
    }

    #[test]
    fn touch_session_ignores_clicks() {
        let mut sync = sync();
        let mut ctrl = InteractionController::new(InputMode::Touch);
        assert!(run(&mut ctrl, &mut sync, &MapEvent::click("x")).is_empty());
        assert!(!run(&mut ctrl, &mut sync, &MapEvent::tap("x")).is_empty());
        assert_eq!(sync.state().popup(PopupSlot::Selected).unwrap().feature_id, "x");
    }

    #[test]
    fn click_on_unrendered_feature_is_ignored() {
        let mut sync = sync();
        sync.apply_features(Vec::new());
        let mut ctrl = InteractionController::new(InputMode::Pointer);
        assert!(run(&mut ctrl, &mut sync, &MapEvent::click("x")).is_empty());
        assert_eq!(ctrl.selection(), &Selection::Idle);
    }
}
