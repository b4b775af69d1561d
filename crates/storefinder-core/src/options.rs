//! Search and display options for the store locator.
//!
//! Two historical page builds differ only in debounce, postal-code strictness,
//! re-entrancy guarding, and starting viewport. [`Variant`] names those builds
//! and [`LocatorOptions::for_variant`] expands one into a full option set.

use std::time::Duration;

use crate::geo::Coordinate;

/// Which historical page build to mimic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Debounced, strict postal validation, search control disabled while pending.
    Legacy,
    /// Immediate search, no format validation, no in-flight guard.
    Current,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Legacy => write!(f, "legacy"),
            Variant::Current => write!(f, "current"),
        }
    }
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Variant::Legacy),
            "current" => Ok(Variant::Current),
            other => Err(format!("unknown variant '{other}'; expected legacy or current")),
        }
    }
}

/// What to show when a valid search finds nothing inside the radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyResultPolicy {
    /// Leave the previously displayed subset in place.
    #[default]
    Retain,
    /// Replace the displayed subset with no points.
    Clear,
}

impl std::str::FromStr for EmptyResultPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retain" => Ok(EmptyResultPolicy::Retain),
            "clear" => Ok(EmptyResultPolicy::Clear),
            other => Err(format!("unknown policy '{other}'; expected retain or clear")),
        }
    }
}

/// Starting camera position.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub center: Coordinate,
    /// Zoom used when the container is at least `breakpoint_px` wide.
    pub zoom_wide: f64,
    pub zoom_narrow: f64,
    pub breakpoint_px: u32,
}

impl Viewport {
    #[must_use]
    pub fn centered_on(center: Coordinate) -> Self {
        Self {
            center,
            zoom_wide: 6.59,
            zoom_narrow: 6.0,
            breakpoint_px: 480,
        }
    }

    #[must_use]
    pub fn zoom_for_width(&self, width_px: u32) -> f64 {
        if width_px >= self.breakpoint_px {
            self.zoom_wide
        } else {
            self.zoom_narrow
        }
    }
}

/// Unified configuration for one locator session.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatorOptions {
    /// Trailing debounce applied to search submissions. `None` searches immediately.
    pub debounce_window: Option<Duration>,
    /// Reject anything other than `12345` or `12345-6789` before geocoding.
    pub validate_postal_format: bool,
    /// Refuse a new search while a geocoder lookup is still pending.
    pub guard_in_flight: bool,
    pub initial_viewport: Viewport,
    pub empty_result_policy: EmptyResultPolicy,
    /// Point colour applied after a successful filter, if any.
    pub filtered_color: Option<String>,
    pub default_radius_miles: f64,
}

impl LocatorOptions {
    #[must_use]
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Legacy => Self {
                debounce_window: Some(Duration::from_millis(250)),
                validate_postal_format: true,
                guard_in_flight: true,
                initial_viewport: Viewport::centered_on(Coordinate::new(39.719_790, -74.657_884)),
                empty_result_policy: EmptyResultPolicy::Retain,
                filtered_color: Some("#ffffff".to_string()),
                default_radius_miles: 50.0,
            },
            Variant::Current => Self {
                debounce_window: None,
                validate_postal_format: false,
                guard_in_flight: false,
                initial_viewport: Viewport::centered_on(Coordinate::new(32.715_7, -117.161_1)),
                empty_result_policy: EmptyResultPolicy::Retain,
                filtered_color: None,
                default_radius_miles: 50.0,
            },
        }
    }
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self::for_variant(Variant::Current)
    }
}
