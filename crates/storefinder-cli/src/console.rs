//! Terminal output: tracing setup, the alert channel, and result tables.

use storefinder_locator::{DistanceResult, Feature, Notice, Notifier};
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins; otherwise `fallback` is used as the filter.
pub(crate) fn init_tracing(fallback: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Prints each notice to stderr, the way a page would raise an alert.
#[derive(Debug, Default)]
pub(crate) struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        if let Notice::GeocodeFailed { reason, .. } = notice {
            tracing::warn!(reason = %reason, "geocoder lookup failed");
        }
        eprintln!("{notice}");
    }
}

pub(crate) fn feature_line(feature: &Feature) -> String {
    let postal = if feature.postal_code.is_empty() {
        "-"
    } else {
        feature.postal_code.as_str()
    };
    format!(
        "#{:<3} {:<16} {:<10} {}",
        feature.ordinal, feature.id, postal, feature.coordinate
    )
}

pub(crate) fn distance_line(result: &DistanceResult<'_>) -> String {
    format!(
        "{}  {:>8.1} mi",
        feature_line(result.feature),
        result.distance_km / storefinder_locator::proximity::KM_PER_MILE
    )
}
