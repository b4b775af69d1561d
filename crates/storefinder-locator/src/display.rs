//! Narrow interfaces to the rendering collaborators: the map library and the
//! side panel. The locator never draws anything itself.

use storefinder_core::Coordinate;

use crate::types::Feature;

pub const DEFAULT_LAYER_ID: &str = "locations";

/// The two independent popup singletons a map can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopupSlot {
    /// Opened by click/tap, closed by the dismiss control.
    Selected,
    /// Follows the pointer; has no close button.
    Hover,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

/// Paint property keys understood by the circle layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaintKey {
    CircleRadius,
    CircleColor,
    CircleOpacity,
    CircleStrokeWidth,
    CircleStrokeColor,
}

impl PaintKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PaintKey::CircleRadius => "circle-radius",
            PaintKey::CircleColor => "circle-color",
            PaintKey::CircleOpacity => "circle-opacity",
            PaintKey::CircleStrokeWidth => "circle-stroke-width",
            PaintKey::CircleStrokeColor => "circle-stroke-color",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaintValue {
    Number(f64),
    Color(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaintParams {
    pub radius: f64,
    pub color: String,
    pub opacity: f64,
    pub stroke_width: f64,
    pub stroke_color: String,
}

impl Default for PaintParams {
    fn default() -> Self {
        Self {
            radius: 8.0,
            color: "#eebe49".to_string(),
            opacity: 1.0,
            stroke_width: 1.0,
            stroke_color: "#eebe49".to_string(),
        }
    }
}

impl PaintParams {
    /// All properties as key/value pairs, in a fixed order.
    #[must_use]
    pub fn properties(&self) -> Vec<(PaintKey, PaintValue)> {
        vec![
            (PaintKey::CircleRadius, PaintValue::Number(self.radius)),
            (PaintKey::CircleStrokeWidth, PaintValue::Number(self.stroke_width)),
            (PaintKey::CircleColor, PaintValue::Color(self.color.clone())),
            (PaintKey::CircleOpacity, PaintValue::Number(self.opacity)),
            (
                PaintKey::CircleStrokeColor,
                PaintValue::Color(self.stroke_color.clone()),
            ),
        ]
    }
}

/// Everything needed to create the point layer in one call.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec<'a> {
    pub id: &'a str,
    pub features: &'a [Feature],
    pub paint: &'a PaintParams,
}

/// The map library, reduced to what the locator drives.
pub trait MapDisplay {
    fn has_layer(&self, layer_id: &str) -> bool;
    fn add_point_layer(&mut self, layer: &LayerSpec<'_>);
    fn remove_layer(&mut self, layer_id: &str);
    /// Replace the layer's backing data wholesale.
    fn set_layer_data(&mut self, layer_id: &str, features: &[Feature]);
    fn set_paint_property(&mut self, layer_id: &str, key: PaintKey, value: PaintValue);
    /// Show (or move) the popup in `slot`. There is only ever one per slot.
    fn show_popup(&mut self, slot: PopupSlot, at: Coordinate, html: &str);
    fn hide_popup(&mut self, slot: PopupSlot);
    fn set_cursor(&mut self, cursor: Cursor);
    fn set_view(&mut self, center: Coordinate, zoom: f64);
}

/// The list of store cards next to the map, indexed by page position.
pub trait SidePanel {
    fn show(&mut self);
    fn hide(&mut self);
    fn highlight(&mut self, ordinal: usize);
    fn clear_highlights(&mut self);
}
