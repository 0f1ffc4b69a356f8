//! Map view model: markers, selection, and the offline-mock fallback.
//!
//! DESIGN
//! ======
//! The map never shows an error screen. If the provider fails to initialize,
//! the view drops to `MapMode::Fallback`, an offline layout positioned by
//! each listing's stored percentage coordinates, and stays fully interactive.
//! Selection behaves identically in both modes.

#[cfg(test)]
#[path = "map_test.rs"]
mod tests;

use tracing::warn;
use uuid::Uuid;

use crate::model::ToolListing;

/// Errors from a map tile/SDK provider.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// The provider could not be brought up (script load, auth, network).
    #[error("map provider failed to initialize: {0}")]
    InitFailed(String),
}

/// Seam to the real map SDK. Mocked in tests; the fallback path needs no
/// provider at all.
#[async_trait::async_trait]
pub trait MapProvider: Send + Sync {
    /// Bring up the map with the given markers.
    ///
    /// # Errors
    ///
    /// Returns a [`MapError`] when the provider cannot initialize.
    async fn initialize(&self, markers: &[MapMarker]) -> Result<(), MapError>;
}

/// How the map is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapMode {
    /// The real provider is up; markers are geographic.
    Live,
    /// Offline-mock layout; markers are percentage-positioned.
    Fallback,
}

/// Where a marker sits, in the active mode's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerPoint {
    Geo { lat: f64, lng: f64 },
    Screen { top_pct: f64, left_pct: f64 },
}

/// One selectable marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub listing_id: Uuid,
    pub title: String,
    pub point: MarkerPoint,
}

/// The map screen's state: mode, listings, and the current selection.
#[derive(Debug)]
pub struct MapView {
    mode: MapMode,
    listings: Vec<ToolListing>,
    selected: Option<Uuid>,
}

impl MapView {
    /// Bring up the map. A provider failure is absorbed: the view comes back
    /// in fallback mode with the same listings and full interactivity.
    pub async fn initialize(provider: &dyn MapProvider, listings: Vec<ToolListing>) -> Self {
        let mut view = Self { mode: MapMode::Live, listings, selected: None };
        if let Err(e) = provider.initialize(&view.markers()).await {
            warn!(error = %e, "map provider unavailable; using offline layout");
            view.mode = MapMode::Fallback;
        }
        view
    }

    #[must_use]
    pub fn mode(&self) -> MapMode {
        self.mode
    }

    #[must_use]
    pub fn listings(&self) -> &[ToolListing] {
        &self.listings
    }

    /// The markers to render, positioned for the current mode.
    #[must_use]
    pub fn markers(&self) -> Vec<MapMarker> {
        self.listings
            .iter()
            .map(|listing| MapMarker {
                listing_id: listing.id,
                title: listing.title.clone(),
                point: match self.mode {
                    MapMode::Live => MarkerPoint::Geo { lat: listing.lat, lng: listing.lng },
                    MapMode::Fallback => MarkerPoint::Screen {
                        top_pct: listing.fallback_position.top_pct,
                        left_pct: listing.fallback_position.left_pct,
                    },
                },
            })
            .collect()
    }

    /// Select a marker, returning its listing. An unknown id clears the
    /// selection.
    pub fn select(&mut self, listing_id: Uuid) -> Option<&ToolListing> {
        let listing = self.listings.iter().find(|l| l.id == listing_id);
        self.selected = listing.map(|l| l.id);
        self.listings.iter().find(|l| Some(l.id) == self.selected)
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    #[must_use]
    pub fn selected(&self) -> Option<&ToolListing> {
        self.selected
            .and_then(|id| self.listings.iter().find(|l| l.id == id))
    }
}
