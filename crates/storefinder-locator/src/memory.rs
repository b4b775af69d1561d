//! In-memory map and panel that record what they were told to render.
//!
//! The CLI renders from these after a search, and tests assert on them.

use std::collections::HashMap;

use storefinder_core::Coordinate;

use crate::display::{Cursor, LayerSpec, MapDisplay, PaintKey, PaintValue, PopupSlot, SidePanel};
use crate::types::Feature;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPopup {
    pub at: Coordinate,
    pub html: String,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryMap {
    layers: HashMap<String, Vec<Feature>>,
    paint: HashMap<(String, PaintKey), PaintValue>,
    popups: HashMap<PopupSlot, RenderedPopup>,
    cursor: Cursor,
    view: Option<(Coordinate, f64)>,
    layers_created: usize,
    data_updates: usize,
}

impl InMemoryMap {
    /// Points currently backing `layer_id`, if the layer exists.
    #[must_use]
    pub fn layer(&self, layer_id: &str) -> Option<&[Feature]> {
        self.layers.get(layer_id).map(Vec::as_slice)
    }

    #[must_use]
    pub fn paint_value(&self, layer_id: &str, key: PaintKey) -> Option<&PaintValue> {
        self.paint.get(&(layer_id.to_string(), key))
    }

    #[must_use]
    pub fn popup(&self, slot: PopupSlot) -> Option<&RenderedPopup> {
        self.popups.get(&slot)
    }

    /// 0 or 1; a slot never holds more than one popup.
    #[must_use]
    pub fn open_popups(&self, slot: PopupSlot) -> usize {
        usize::from(self.popups.contains_key(&slot))
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub fn view(&self) -> Option<(Coordinate, f64)> {
        self.view
    }

    #[must_use]
    pub fn layers_created(&self) -> usize {
        self.layers_created
    }

    #[must_use]
    pub fn data_updates(&self) -> usize {
        self.data_updates
    }
}

impl MapDisplay for InMemoryMap {
    fn has_layer(&self, layer_id: &str) -> bool {
        self.layers.contains_key(layer_id)
    }

    fn add_point_layer(&mut self, layer: &LayerSpec<'_>) {
        self.layers
            .insert(layer.id.to_string(), layer.features.to_vec());
        for (key, value) in layer.paint.properties() {
            self.paint.insert((layer.id.to_string(), key), value);
        }
        self.layers_created += 1;
    }

    fn remove_layer(&mut self, layer_id: &str) {
        self.layers.remove(layer_id);
        self.paint.retain(|(id, _), _| id != layer_id);
    }

    fn set_layer_data(&mut self, layer_id: &str, features: &[Feature]) {
        if let Some(data) = self.layers.get_mut(layer_id) {
            *data = features.to_vec();
            self.data_updates += 1;
        }
    }

    fn set_paint_property(&mut self, layer_id: &str, key: PaintKey, value: PaintValue) {
        self.paint.insert((layer_id.to_string(), key), value);
    }

    fn show_popup(&mut self, slot: PopupSlot, at: Coordinate, html: &str) {
        self.popups.insert(
            slot,
            RenderedPopup {
                at,
                html: html.to_string(),
            },
        );
    }

    fn hide_popup(&mut self, slot: PopupSlot) {
        self.popups.remove(&slot);
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn set_view(&mut self, center: Coordinate, zoom: f64) {
        self.view = Some((center, zoom));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryPanel {
    visible: bool,
    highlighted: Vec<usize>,
}

impl InMemoryPanel {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn highlighted(&self) -> &[usize] {
        &self.highlighted
    }
}

impl SidePanel for InMemoryPanel {
    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn highlight(&mut self, ordinal: usize) {
        if !self.highlighted.contains(&ordinal) {
            self.highlighted.push(ordinal);
        }
    }

    fn clear_highlights(&mut self) {
        self.highlighted.clear();
    }
}
