//! Store search for a single page: builds the master set of store features,
//! filters it by distance from a geocoded postal code, and keeps the map's
//! points, popups and side panel in step with the result.

pub mod display;
pub mod error;
pub mod events;
pub mod geocoder;
pub mod ingest;
pub mod interaction;
pub mod map_sync;
pub mod memory;
pub mod notice;
pub mod page;
pub mod postal;
pub mod proximity;
mod retry;
pub mod session;
pub mod store;
pub mod types;

pub use display::{
    Cursor, LayerSpec, MapDisplay, PaintKey, PaintParams, PaintValue, PopupSlot, SidePanel,
    DEFAULT_LAYER_ID,
};
pub use error::{GeocodeError, LocatorError, QueryError};
pub use events::{DeviceCapabilities, EventKind, InputMode, MapEvent, Subscriptions};
pub use geocoder::{Geocoder, MapboxGeocoder};
pub use ingest::{IngestReport, Ingestor, SkipReason};
pub use interaction::{Effect, InteractionController, PanelEffect, Selection};
pub use map_sync::{MapDisplayState, MapEffect, MapSync, PopupState};
pub use memory::{InMemoryMap, InMemoryPanel};
pub use notice::{Notice, NoticeLog, Notifier};
pub use page::extract_page_records;
pub use postal::{is_us_postal_code, validate_postal_code};
pub use session::{SearchOutcome, StoreLocator};
pub use store::FeatureStore;
pub use types::{DistanceResult, Feature};
