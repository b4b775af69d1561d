//! One locator session on one page.
//!
//! Everything runs on a single-threaded event loop. Methods take `&self` so a
//! search can be awaiting the geocoder while the user keeps interacting with
//! the map; interior state lives in `RefCell`/`Cell` and no borrow is held
//! across an `.await`.

use std::cell::{Cell, Ref, RefCell};
use std::sync::Arc;

use storefinder_core::{EmptyResultPolicy, LocatorOptions};

use crate::display::{MapDisplay, SidePanel};
use crate::error::QueryError;
use crate::events::{InputMode, MapEvent};
use crate::geocoder::Geocoder;
use crate::interaction::{Effect, InteractionController, PanelEffect, Selection};
use crate::map_sync::MapSync;
use crate::notice::{Notice, Notifier};
use crate::postal::{normalize_postal_code, validate_postal_code};
use crate::proximity;
use crate::store::FeatureStore;

/// How a call to [`StoreLocator::search`] ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The map now shows this many points.
    Applied(usize),
    /// Nothing within the radius; the empty-result policy was applied.
    NoResults,
    Rejected(QueryError),
    GeocodeFailed { reason: String },
    /// Another lookup was still pending and the in-flight guard is on.
    Busy,
    /// A newer search arrived inside the debounce window.
    Superseded,
}

/// Decrements the pending-lookup count on drop.
struct InFlight<'a>(&'a Cell<usize>);

impl<'a> InFlight<'a> {
    fn enter(count: &'a Cell<usize>) -> Self {
        count.set(count.get() + 1);
        Self(count)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

pub struct StoreLocator<D, P, G, N> {
    options: LocatorOptions,
    store: Arc<FeatureStore>,
    map: RefCell<MapSync<D>>,
    controller: RefCell<InteractionController>,
    panel: RefCell<P>,
    geocoder: G,
    notifier: N,
    pending: Cell<usize>,
    generation: Cell<u64>,
}

impl<D, P, G, N> StoreLocator<D, P, G, N>
where
    D: MapDisplay,
    P: SidePanel,
    G: Geocoder,
    N: Notifier,
{
    pub fn new(
        options: LocatorOptions,
        store: Arc<FeatureStore>,
        display: D,
        panel: P,
        geocoder: G,
        notifier: N,
        input: InputMode,
    ) -> Self {
        Self {
            options,
            map: RefCell::new(MapSync::new(display, Arc::clone(&store))),
            store,
            controller: RefCell::new(InteractionController::new(input)),
            panel: RefCell::new(panel),
            geocoder,
            notifier,
            pending: Cell::new(0),
            generation: Cell::new(0),
        }
    }

    /// Position the camera and create the point layer with the master set.
    pub fn mount(&self, width_px: u32) {
        let mut map = self.map.borrow_mut();
        map.init_view(&self.options.initial_viewport, width_px);
        map.ensure_layer();
        tracing::info!(
            points = self.store.len(),
            input = ?self.controller.borrow().input_mode(),
            "locator mounted"
        );
    }

    /// Search with the configured default radius.
    pub async fn search_default(&self, raw_postal_code: &str) -> SearchOutcome {
        self.search(raw_postal_code, self.options.default_radius_miles)
            .await
    }

    /// Geocode `raw_postal_code` and show the stores within `radius_miles`.
    ///
    /// Every failure is reported through the notifier and leaves the visible
    /// set untouched, except an empty result under
    /// [`EmptyResultPolicy::Clear`].
    pub async fn search(&self, raw_postal_code: &str, radius_miles: f64) -> SearchOutcome {
        if let Some(window) = self.options.debounce_window {
            let ticket = self.generation.get().wrapping_add(1);
            self.generation.set(ticket);
            tokio::time::sleep(window).await;
            if self.generation.get() != ticket {
                tracing::debug!(postal_code = raw_postal_code, "search superseded");
                return SearchOutcome::Superseded;
            }
        }

        let postal_code = match self.check_query(raw_postal_code, radius_miles) {
            Ok(code) => code,
            Err(err) => {
                self.notifier.notify(&Notice::from(&err));
                return SearchOutcome::Rejected(err);
            }
        };

        if self.options.guard_in_flight && self.is_searching() {
            tracing::debug!(postal_code, "search ignored while a lookup is pending");
            return SearchOutcome::Busy;
        }

        let resolved = {
            let _in_flight = InFlight::enter(&self.pending);
            self.geocoder.resolve(postal_code).await
        };
        let origin = match resolved {
            Ok(origin) => origin,
            Err(err) => {
                tracing::warn!(postal_code, error = %err, "geocoding failed");
                let reason = err.to_string();
                self.notifier.notify(&Notice::GeocodeFailed {
                    postal_code: postal_code.to_string(),
                    reason: reason.clone(),
                });
                return SearchOutcome::GeocodeFailed { reason };
            }
        };

        let subset = proximity::filter(origin, radius_miles, &self.store);
        if subset.is_empty() {
            self.notifier.notify(&Notice::NoResults {
                postal_code: postal_code.to_string(),
                radius_miles,
            });
            if self.options.empty_result_policy == EmptyResultPolicy::Clear {
                self.map.borrow_mut().clear_features();
            }
            tracing::info!(
                postal_code,
                radius_miles,
                policy = ?self.options.empty_result_policy,
                "no locations within radius"
            );
            return SearchOutcome::NoResults;
        }

        let count = subset.len();
        let mut map = self.map.borrow_mut();
        map.apply_features(subset);
        if let Some(color) = &self.options.filtered_color {
            map.set_color(color);
        }
        tracing::info!(postal_code, radius_miles, matches = count, "search applied");
        SearchOutcome::Applied(count)
    }

    fn check_query<'q>(&self, raw: &'q str, radius_miles: f64) -> Result<&'q str, QueryError> {
        let code = normalize_postal_code(raw)?;
        if !radius_miles.is_finite() || radius_miles <= 0.0 {
            return Err(QueryError::InvalidRadius(radius_miles));
        }
        validate_postal_code(code, self.options.validate_postal_format)
    }

    /// Show every store again with default paint.
    pub fn clear(&self) {
        self.map.borrow_mut().reset_view();
    }

    /// Route a map or panel event and carry out the resulting effects.
    pub fn dispatch(&self, event: &MapEvent) -> Vec<Effect> {
        let effects = self
            .controller
            .borrow_mut()
            .handle(event, self.map.borrow().state());

        let mut map = self.map.borrow_mut();
        let mut panel = self.panel.borrow_mut();
        for effect in &effects {
            match effect {
                Effect::Map(e) => map.apply_effect(e),
                Effect::Panel(PanelEffect::Show) => panel.show(),
                Effect::Panel(PanelEffect::Hide) => panel.hide(),
                Effect::Panel(PanelEffect::Highlight(ordinal)) => panel.highlight(*ordinal),
                Effect::Panel(PanelEffect::ClearHighlights) => panel.clear_highlights(),
            }
        }
        effects
    }

    /// `true` while a geocoder lookup is pending.
    pub fn is_searching(&self) -> bool {
        self.pending.get() > 0
    }

    pub fn options(&self) -> &LocatorOptions {
        &self.options
    }

    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    pub fn map(&self) -> Ref<'_, MapSync<D>> {
        self.map.borrow()
    }

    pub fn panel(&self) -> Ref<'_, P> {
        self.panel.borrow()
    }

    pub fn selection(&self) -> Selection {
        self.controller.borrow().selection().clone()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
