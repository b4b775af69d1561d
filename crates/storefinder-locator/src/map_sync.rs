//! Keeps the map's point layer and popups in step with the active result set.
//!
//! [`MapSync`] is the only writer of [`MapDisplayState`]. The visible set is
//! always replaced wholesale, either by a filter result or by a reset to the
//! master set.

use std::sync::Arc;

use storefinder_core::{Coordinate, Viewport};

use crate::display::{
    Cursor, LayerSpec, MapDisplay, PaintKey, PaintParams, PaintValue, PopupSlot, DEFAULT_LAYER_ID,
};
use crate::store::FeatureStore;
use crate::types::Feature;

#[derive(Debug, Clone, PartialEq)]
pub struct PopupState {
    pub feature_id: String,
    pub at: Coordinate,
}

/// What the map is currently showing.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDisplayState {
    visible: Vec<Feature>,
    paint: PaintParams,
    selected_popup: Option<PopupState>,
    hover_popup: Option<PopupState>,
    cursor: Cursor,
    layer_ready: bool,
}

impl MapDisplayState {
    fn new(visible: Vec<Feature>, paint: PaintParams) -> Self {
        Self {
            visible,
            paint,
            selected_popup: None,
            hover_popup: None,
            cursor: Cursor::Default,
            layer_ready: false,
        }
    }

    #[must_use]
    pub fn visible(&self) -> &[Feature] {
        &self.visible
    }

    /// Look up a feature among the rendered points.
    #[must_use]
    pub fn visible_feature(&self, id: &str) -> Option<&Feature> {
        self.visible.iter().find(|f| f.id == id)
    }

    #[must_use]
    pub fn paint(&self) -> &PaintParams {
        &self.paint
    }

    #[must_use]
    pub fn popup(&self, slot: PopupSlot) -> Option<&PopupState> {
        match slot {
            PopupSlot::Selected => self.selected_popup.as_ref(),
            PopupSlot::Hover => self.hover_popup.as_ref(),
        }
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub fn layer_ready(&self) -> bool {
        self.layer_ready
    }

    fn popup_mut(&mut self, slot: PopupSlot) -> &mut Option<PopupState> {
        match slot {
            PopupSlot::Selected => &mut self.selected_popup,
            PopupSlot::Hover => &mut self.hover_popup,
        }
    }
}

/// Map-side effects produced by the interaction controller.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEffect {
    ShowPopup {
        slot: PopupSlot,
        feature_id: String,
        at: Coordinate,
        html: String,
    },
    HidePopup(PopupSlot),
    SetCursor(Cursor),
}

pub struct MapSync<D> {
    display: D,
    state: MapDisplayState,
    master: Arc<FeatureStore>,
    defaults: PaintParams,
    layer_id: String,
}

impl<D: MapDisplay> MapSync<D> {
    /// Start out showing the full master set with default paint.
    pub fn new(display: D, master: Arc<FeatureStore>) -> Self {
        Self::with_paint(display, master, PaintParams::default())
    }

    pub fn with_paint(display: D, master: Arc<FeatureStore>, defaults: PaintParams) -> Self {
        let state = MapDisplayState::new(master.features().to_vec(), defaults.clone());
        Self {
            display,
            state,
            master,
            defaults,
            layer_id: DEFAULT_LAYER_ID.to_string(),
        }
    }

    pub fn state(&self) -> &MapDisplayState {
        &self.state
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn master(&self) -> &FeatureStore {
        &self.master
    }

    pub fn layer_id(&self) -> &str {
        &self.layer_id
    }

    /// Centre the camera, picking the zoom for the container width.
    pub fn init_view(&mut self, viewport: &Viewport, width_px: u32) {
        self.display
            .set_view(viewport.center, viewport.zoom_for_width(width_px));
    }

    /// Create the point layer if it does not exist yet. Safe to call repeatedly.
    pub fn ensure_layer(&mut self) {
        if self.display.has_layer(&self.layer_id) {
            self.state.layer_ready = true;
            return;
        }
        self.display.add_point_layer(&LayerSpec {
            id: &self.layer_id,
            features: &self.state.visible,
            paint: &self.state.paint,
        });
        self.state.layer_ready = true;
        tracing::debug!(
            layer = %self.layer_id,
            points = self.state.visible.len(),
            "created point layer"
        );
    }

    /// Drop the point layer. The next [`ensure_layer`](Self::ensure_layer)
    /// recreates it from the current visible set.
    pub fn remove_layer(&mut self) {
        if self.display.has_layer(&self.layer_id) {
            self.display.remove_layer(&self.layer_id);
        }
        self.state.layer_ready = false;
    }

    /// Show exactly `subset`. The master set is not touched.
    pub fn apply_features(&mut self, subset: Vec<Feature>) {
        self.state.visible = subset;
        if self.state.layer_ready {
            self.display.set_layer_data(&self.layer_id, &self.state.visible);
        } else {
            self.ensure_layer();
        }
    }

    /// Show no points at all.
    pub fn clear_features(&mut self) {
        self.apply_features(Vec::new());
    }

    pub fn set_color(&mut self, color: &str) {
        self.state.paint.color = color.to_string();
        self.display.set_paint_property(
            &self.layer_id,
            PaintKey::CircleColor,
            PaintValue::Color(color.to_string()),
        );
    }

    /// Back to the full master set with default point radius and colour.
    pub fn reset_view(&mut self) {
        self.apply_features(self.master.features().to_vec());
        self.state.paint = self.defaults.clone();
        self.display.set_paint_property(
            &self.layer_id,
            PaintKey::CircleRadius,
            PaintValue::Number(self.defaults.radius),
        );
        self.display.set_paint_property(
            &self.layer_id,
            PaintKey::CircleColor,
            PaintValue::Color(self.defaults.color.clone()),
        );
    }

    pub fn apply_effect(&mut self, effect: &MapEffect) {
        match effect {
            MapEffect::ShowPopup {
                slot,
                feature_id,
                at,
                html,
            } => {
                self.display.show_popup(*slot, *at, html);
                *self.state.popup_mut(*slot) = Some(PopupState {
                    feature_id: feature_id.clone(),
                    at: *at,
                });
            }
            MapEffect::HidePopup(slot) => {
                if self.state.popup_mut(*slot).take().is_some() {
                    self.display.hide_popup(*slot);
                }
            }
            MapEffect::SetCursor(cursor) => {
                self.state.cursor = *cursor;
                self.display.set_cursor(*cursor);
            }
        }
    }
}

#[cfg(test)]
#[path = "map_sync_test.rs"]
mod tests;
