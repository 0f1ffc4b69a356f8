//! Gemini `generateContent` client.
//!
//! Thin HTTP wrapper over the Generative Language API. Structured outputs use
//! `responseSchema` with a JSON mime type; place search uses the googleMaps
//! grounding tool. Pure parsing in the `parse_*` functions for testability.

use std::time::Duration;

use serde_json::json;
use tracing::info;

use super::config::GeminiConfig;
use super::types::{
    AiError, ImageData, LatLng, PlaceResult, PriceSuggestion, ToolIntel, ToolMetadata,
};

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Build a client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::HttpClientBuild`] if the HTTP client fails to
    /// construct.
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| AiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key: config.api_key, model: config.model, base_url: config.base_url })
    }

    /// The configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, body: serde_json::Value) -> Result<GenerateResponse, AiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| AiError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(AiError::ApiResponse { status, body: text });
        }

        serde_json::from_str(&text).map_err(|e| AiError::ApiParse(e.to_string()))
    }
}

#[async_trait::async_trait]
impl ToolIntel for GeminiClient {
    async fn extract_tool_metadata(&self, image: &ImageData) -> Result<ToolMetadata, AiError> {
        let body = json!({
            "contents": [{
                "parts": [
                    { "inlineData": { "mimeType": image.mime_type, "data": image.base64_data } },
                    { "text": METADATA_PROMPT },
                ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "brand": { "type": "STRING" },
                        "category": { "type": "STRING" },
                        "condition": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "suggestService": { "type": "BOOLEAN" }
                    }
                }
            }
        });

        let response = self.generate(body).await?;
        let metadata = parse_metadata(&response.first_text())?;
        info!(model = %self.model, title = ?metadata.title, "tool metadata extracted");
        Ok(metadata)
    }

    async fn suggest_pricing(
        &self,
        title: &str,
        brand: &str,
        condition: &str,
    ) -> Result<PriceSuggestion, AiError> {
        let prompt = format!(
            "Suggest prices for a {condition} condition {brand} {title}. \
             Return JSON: {{\"dailyPrice\": number, \"serviceRate\": number}}. \
             Service rate is hourly labor cost for an operator."
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "dailyPrice": { "type": "NUMBER" },
                        "serviceRate": { "type": "NUMBER" }
                    }
                }
            }
        });

        let response = self.generate(body).await?;
        parse_price_suggestion(&response.first_text())
    }

    async fn search_places(
        &self,
        query: &str,
        near: Option<LatLng>,
    ) -> Result<Vec<PlaceResult>, AiError> {
        let prompt = format!(
            "Find places related to this query: \"{query}\". \
             Return a list of places found with their names and addresses."
        );
        let mut body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "tools": [{ "googleMaps": {} }],
        });
        if let Some(at) = near {
            body["toolConfig"] = json!({
                "retrievalConfig": {
                    "latLng": { "latitude": at.lat, "longitude": at.lng }
                }
            });
        }

        let response = self.generate(body).await?;
        Ok(places_from_response(&response))
    }
}

const METADATA_PROMPT: &str = "Analyze this image for a tool rental marketplace. \
If the tool is complex (like a tractor, saw, or heavy machinery), suggest if an \
operator service might be appropriate. Return a JSON object with: \
title (a short, clear title), brand, \
category (one of [\"Power Tools\", \"Gardening\", \"Cleaning\", \"Hand Tools\", \
\"Automotive\", \"Electronics\"]), \
condition (one of [\"New\", \"Like New\", \"Good\", \"Fair\", \"Heavily Used\"]), \
description (a 2-sentence sales pitch), and \
suggestService (boolean, true if this tool often requires an operator).";

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Lenient view of a `generateContent` response. Everything defaults so a
/// sparse response degrades to empty values rather than a parse error.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub(crate) struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Candidate {
    content: CandidateContent,
    grounding_metadata: GroundingMetadata,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<Part>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GroundingMetadata {
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate's parts.
    fn first_text(&self) -> String {
        let Some(candidate) = self.candidates.first() else {
            return String::new();
        };
        candidate
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect()
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Parse structured metadata from the model's JSON text. Missing fields
/// default; an empty payload yields an all-default value.
pub(crate) fn parse_metadata(text: &str) -> Result<ToolMetadata, AiError> {
    if text.trim().is_empty() {
        return Ok(ToolMetadata::default());
    }
    serde_json::from_str(text).map_err(|e| AiError::ApiParse(e.to_string()))
}

/// Parse a price suggestion from the model's JSON text.
pub(crate) fn parse_price_suggestion(text: &str) -> Result<PriceSuggestion, AiError> {
    if text.trim().is_empty() {
        return Ok(PriceSuggestion::default());
    }
    serde_json::from_str(text).map_err(|e| AiError::ApiParse(e.to_string()))
}

/// Extract place results from grounding chunks. Chunks without both a title
/// and a URI are skipped.
pub(crate) fn places_from_response(response: &GenerateResponse) -> Vec<PlaceResult> {
    let Some(candidate) = response.candidates.first() else {
        return Vec::new();
    };
    candidate
        .grounding_metadata
        .grounding_chunks
        .iter()
        .filter_map(|chunk| {
            let web = chunk.web.as_ref()?;
            let title = web.title.clone()?;
            let uri = web.uri.clone()?;
            Some(PlaceResult { title, address: Some("Web Result".to_string()), uri: Some(uri) })
        })
        .collect()
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
