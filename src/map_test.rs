use super::*;
use crate::model::FallbackPosition;

// =========================================================================
// providers
// =========================================================================

struct UpProvider;

#[async_trait::async_trait]
impl MapProvider for UpProvider {
    async fn initialize(&self, _markers: &[MapMarker]) -> Result<(), MapError> {
        Ok(())
    }
}

struct DownProvider;

#[async_trait::async_trait]
impl MapProvider for DownProvider {
    async fn initialize(&self, _markers: &[MapMarker]) -> Result<(), MapError> {
        Err(MapError::InitFailed("script load blocked".into()))
    }
}

fn listing(title: &str, top_pct: f64) -> ToolListing {
    ToolListing {
        id: Uuid::new_v4(),
        owner_id: Uuid::new_v4(),
        title: title.into(),
        rate_per_day: 25.0,
        deposit: 50.0,
        purchase_price: None,
        lat: 37.77,
        lng: -122.42,
        fallback_position: FallbackPosition { top_pct, left_pct: 30.0 },
    }
}

// =========================================================================
// initialization
// =========================================================================

#[tokio::test]
async fn healthy_provider_goes_live_with_geo_markers() {
    let view = MapView::initialize(&UpProvider, vec![listing("Drill", 20.0)]).await;
    assert_eq!(view.mode(), MapMode::Live);

    let markers = view.markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].point, MarkerPoint::Geo { lat: 37.77, lng: -122.42 });
}

#[tokio::test]
async fn provider_failure_drops_to_interactive_fallback() {
    let listings = vec![listing("Drill", 20.0), listing("Tile Saw", 60.0)];
    let first_id = listings[0].id;

    let mut view = MapView::initialize(&DownProvider, listings).await;
    assert_eq!(view.mode(), MapMode::Fallback);

    // Markers use the stored mock layout.
    let markers = view.markers();
    assert_eq!(markers[0].point, MarkerPoint::Screen { top_pct: 20.0, left_pct: 30.0 });
    assert_eq!(markers[1].point, MarkerPoint::Screen { top_pct: 60.0, left_pct: 30.0 });

    // Selection still works in fallback mode.
    let selected = view.select(first_id).expect("marker should resolve");
    assert_eq!(selected.title, "Drill");
    assert_eq!(view.selected().map(|l| l.id), Some(first_id));
}

// =========================================================================
// selection
// =========================================================================

#[tokio::test]
async fn selecting_an_unknown_marker_clears_selection() {
    let listings = vec![listing("Drill", 20.0)];
    let known = listings[0].id;

    let mut view = MapView::initialize(&UpProvider, listings).await;
    view.select(known);
    assert!(view.selected().is_some());

    assert!(view.select(Uuid::new_v4()).is_none());
    assert!(view.selected().is_none());
}

#[tokio::test]
async fn deselect_clears_the_selection() {
    let listings = vec![listing("Drill", 20.0)];
    let id = listings[0].id;

    let mut view = MapView::initialize(&UpProvider, listings).await;
    view.select(id);
    view.deselect();
    assert!(view.selected().is_none());
}
