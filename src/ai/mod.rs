//! AI — listing intelligence behind a mockable provider seam.
//!
//! DESIGN
//! ======
//! Every AI feature is best-effort: helpers here catch provider errors, log
//! them, and return a neutral value so callers never branch on failure. The
//! `ToolIntel` trait is the seam; `GeminiClient` is the one real provider.

pub mod config;
pub mod gemini;
pub mod types;

use tracing::warn;

pub use config::GeminiConfig;
pub use gemini::GeminiClient;
pub use types::{
    AiError, ImageData, LatLng, PlaceResult, PriceSuggestion, ToolIntel, ToolMetadata,
};

/// Search places, degrading to an empty list on any provider error.
pub async fn search_places_or_empty(
    intel: &dyn ToolIntel,
    query: &str,
    near: Option<LatLng>,
) -> Vec<PlaceResult> {
    match intel.search_places(query, near).await {
        Ok(places) => places,
        Err(e) => {
            warn!(error = %e, query, "place search failed; returning no results");
            Vec::new()
        }
    }
}
