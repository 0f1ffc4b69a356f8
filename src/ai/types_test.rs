use super::*;

// =========================================================================
// ImageData
// =========================================================================

#[test]
fn data_uri_splits_into_mime_and_payload() {
    let image = ImageData::from_data_uri("data:image/png;base64,iVBORw0KGgo=").unwrap();
    assert_eq!(image.mime_type, "image/png");
    assert_eq!(image.base64_data, "iVBORw0KGgo=");
}

#[test]
fn non_data_uris_are_rejected() {
    assert!(ImageData::from_data_uri("https://example.test/photo.png").is_none());
    assert!(ImageData::from_data_uri("data:image/png,rawpayload").is_none());
    assert!(ImageData::from_data_uri("").is_none());
}

// =========================================================================
// lenient deserialization
// =========================================================================

#[test]
fn metadata_defaults_missing_fields() {
    let metadata: ToolMetadata =
        serde_json::from_str(r#"{"title": "Angle Grinder", "suggestService": true}"#).unwrap();
    assert_eq!(metadata.title.as_deref(), Some("Angle Grinder"));
    assert!(metadata.suggest_service);
    assert_eq!(metadata.brand, None);
    assert_eq!(metadata.condition, None);
}

#[test]
fn empty_object_is_all_defaults() {
    let metadata: ToolMetadata = serde_json::from_str("{}").unwrap();
    assert_eq!(metadata, ToolMetadata::default());
    assert!(!metadata.suggest_service);
}

#[test]
fn price_suggestion_uses_camel_case_keys() {
    let suggestion: PriceSuggestion =
        serde_json::from_str(r#"{"dailyPrice": 24.5, "serviceRate": 60.0}"#).unwrap();
    assert_eq!(suggestion.daily_price, Some(24.5));
    assert_eq!(suggestion.service_rate, Some(60.0));

    let partial: PriceSuggestion = serde_json::from_str(r#"{"dailyPrice": 12.0}"#).unwrap();
    assert_eq!(partial.service_rate, None);
}

#[test]
fn place_result_omits_empty_optionals() {
    let place = PlaceResult { title: "Ace Hardware".into(), address: None, uri: None };
    let json = serde_json::to_string(&place).unwrap();
    assert_eq!(json, r#"{"title":"Ace Hardware"}"#);
}
