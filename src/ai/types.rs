//! AI types — provider-neutral listing-intelligence types and errors.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by AI client operations.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// REQUEST / RESPONSE TYPES
// =============================================================================

/// A captured listing photo as the API wants it: raw base64 plus mime type,
/// with any data-URI prefix already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub mime_type: String,
    pub base64_data: String,
}

impl ImageData {
    /// Split a `data:<mime>;base64,<payload>` URI into its parts. Returns
    /// `None` when the string is not a data URI.
    #[must_use]
    pub fn from_data_uri(uri: &str) -> Option<Self> {
        let rest = uri.strip_prefix("data:")?;
        let (mime_type, payload) = rest.split_once(";base64,")?;
        Some(Self { mime_type: mime_type.to_string(), base64_data: payload.to_string() })
    }
}

/// Structured metadata extracted from a tool photo. Every field is optional;
/// the model returns what it can recognize.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolMetadata {
    pub title: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub description: Option<String>,
    /// Whether the tool typically requires an operator.
    pub suggest_service: bool,
}

/// Suggested pricing for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceSuggestion {
    /// Dollars per day for renting the tool.
    pub daily_price: Option<f64>,
    /// Hourly labor rate for an operator, when a service is offered.
    pub service_rate: Option<f64>,
}

/// A place returned by maps-grounded search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// A point biasing the place search toward the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

// =============================================================================
// PROVIDER TRAIT
// =============================================================================

/// Provider-neutral async trait for listing intelligence. Enables mocking in
/// tests; no test ever performs a real API call.
#[async_trait::async_trait]
pub trait ToolIntel: Send + Sync {
    /// Identify a tool from its photo.
    ///
    /// # Errors
    ///
    /// Returns an [`AiError`] if the request fails or the response is
    /// malformed. Partial responses are not errors; missing fields default.
    async fn extract_tool_metadata(&self, image: &ImageData) -> Result<ToolMetadata, AiError>;

    /// Suggest rental (and operator) pricing for a described tool.
    ///
    /// # Errors
    ///
    /// Returns an [`AiError`] if the request fails or the response is
    /// malformed.
    async fn suggest_pricing(
        &self,
        title: &str,
        brand: &str,
        condition: &str,
    ) -> Result<PriceSuggestion, AiError>;

    /// Search for places matching a free-text query, optionally biased
    /// toward a location.
    ///
    /// # Errors
    ///
    /// Returns an [`AiError`] if the request fails or the response is
    /// malformed.
    async fn search_places(
        &self,
        query: &str,
        near: Option<LatLng>,
    ) -> Result<Vec<PlaceResult>, AiError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
