//! AI-assisted listing wizard: five gated steps from photo to publish.
//!
//! DESIGN
//! ======
//! `ListingDraft` accumulates the wizard's fields; `WizardStep` encodes the
//! step order and each step's completion gate. AI assistance is strictly
//! additive: extracted metadata never overwrites a field the user already
//! filled in, and any provider failure leaves the draft exactly as it was.

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;

use std::time::Duration;

use tracing::{info, warn};
use uuid::Uuid;

use crate::ai::{ImageData, PriceSuggestion, ToolIntel, ToolMetadata};
use crate::model::{FallbackPosition, ToolCondition, ToolListing};

/// Simulated publish round-trip latency.
const PUBLISH_LATENCY: Duration = Duration::from_secs(2);

/// Listing categories offered by the wizard.
pub const CATEGORIES: [&str; 6] =
    ["Power Tools", "Gardening", "Cleaning", "Hand Tools", "Automotive", "Electronics"];

/// The wizard's steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WizardStep {
    #[default]
    Photos,
    Details,
    Location,
    Pricing,
    Review,
}

impl WizardStep {
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Photos => Some(Self::Details),
            Self::Details => Some(Self::Location),
            Self::Location => Some(Self::Pricing),
            Self::Pricing => Some(Self::Review),
            Self::Review => None,
        }
    }

    #[must_use]
    pub fn back(self) -> Option<Self> {
        match self {
            Self::Photos => None,
            Self::Details => Some(Self::Photos),
            Self::Location => Some(Self::Details),
            Self::Pricing => Some(Self::Location),
            Self::Review => Some(Self::Pricing),
        }
    }
}

/// What blocks leaving the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingGap {
    MainPhotoRequired,
    DetailsIncomplete,
    ZipCodeRequired,
    DailyPriceRequired,
}

/// The working state of one listing-in-progress.
#[derive(Debug, Clone, Default)]
pub struct ListingDraft {
    step: WizardStep,
    main_photo: Option<String>,
    secondary_photos: Vec<String>,
    title: String,
    brand: String,
    category: String,
    condition: Option<ToolCondition>,
    description: String,
    zip_code: String,
    daily_price: Option<f64>,
    service_rate: Option<f64>,
    offers_service: bool,
    deposit: f64,
    purchase_price: Option<f64>,
}

impl ListingDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    #[must_use]
    pub fn main_photo(&self) -> Option<&str> {
        self.main_photo.as_deref()
    }

    #[must_use]
    pub fn secondary_photos(&self) -> &[String] {
        &self.secondary_photos
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn condition(&self) -> Option<ToolCondition> {
        self.condition
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn daily_price(&self) -> Option<f64> {
        self.daily_price
    }

    #[must_use]
    pub fn service_rate(&self) -> Option<f64> {
        self.service_rate
    }

    #[must_use]
    pub fn offers_service(&self) -> bool {
        self.offers_service
    }

    pub fn set_main_photo(&mut self, data_uri: impl Into<String>) {
        self.main_photo = Some(data_uri.into());
    }

    pub fn add_secondary_photo(&mut self, data_uri: impl Into<String>) {
        self.secondary_photos.push(data_uri.into());
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_brand(&mut self, brand: impl Into<String>) {
        self.brand = brand.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn set_condition(&mut self, condition: ToolCondition) {
        self.condition = Some(condition);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_zip_code(&mut self, zip: impl Into<String>) {
        self.zip_code = zip.into();
    }

    pub fn set_daily_price(&mut self, price: f64) {
        self.daily_price = Some(price);
    }

    pub fn set_service_rate(&mut self, rate: f64) {
        self.service_rate = Some(rate);
    }

    pub fn set_offers_service(&mut self, offers: bool) {
        self.offers_service = offers;
    }

    pub fn set_deposit(&mut self, deposit: f64) {
        self.deposit = deposit;
    }

    pub fn set_purchase_price(&mut self, price: f64) {
        self.purchase_price = Some(price);
    }

    /// What blocks leaving the current step, if anything. `Review` has no
    /// gate of its own; it publishes.
    #[must_use]
    pub fn gap(&self) -> Option<ListingGap> {
        match self.step {
            WizardStep::Photos if self.main_photo.is_none() => Some(ListingGap::MainPhotoRequired),
            WizardStep::Details if self.title.is_empty() || self.category.is_empty() => {
                Some(ListingGap::DetailsIncomplete)
            }
            WizardStep::Location if self.zip_code.is_empty() => Some(ListingGap::ZipCodeRequired),
            WizardStep::Pricing if self.daily_price.is_none() => {
                Some(ListingGap::DailyPriceRequired)
            }
            _ => None,
        }
    }

    /// Advance to the next step. Returns the gap when the current step's
    /// gate is unmet; the step is unchanged in that case.
    ///
    /// # Errors
    ///
    /// Returns the blocking [`ListingGap`].
    pub fn advance(&mut self) -> Result<WizardStep, ListingGap> {
        if let Some(gap) = self.gap() {
            return Err(gap);
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Go back one step, stopping at `Photos`.
    pub fn retreat(&mut self) -> WizardStep {
        if let Some(back) = self.step.back() {
            self.step = back;
        }
        self.step
    }

    /// Run AI analysis on the main photo and fold the result into the draft.
    /// Best-effort: without a photo, or on any provider failure, the draft is
    /// untouched. Returns whether anything was applied.
    pub async fn analyze_photo(&mut self, intel: &dyn ToolIntel) -> bool {
        let Some(image) = self.main_photo.as_deref().and_then(ImageData::from_data_uri) else {
            return false;
        };
        match intel.extract_tool_metadata(&image).await {
            Ok(metadata) => {
                self.apply_metadata(&metadata);
                true
            }
            Err(e) => {
                warn!(error = %e, "photo analysis failed; draft unchanged");
                false
            }
        }
    }

    /// Ask for a price suggestion and fold it into the draft. Best-effort.
    pub async fn suggest_price(&mut self, intel: &dyn ToolIntel) -> bool {
        let condition = self.condition.unwrap_or_default();
        match intel
            .suggest_pricing(&self.title, &self.brand, condition_label(condition))
            .await
        {
            Ok(suggestion) => {
                self.apply_price_suggestion(suggestion);
                true
            }
            Err(e) => {
                warn!(error = %e, "price suggestion failed; draft unchanged");
                false
            }
        }
    }

    /// Fold extracted metadata into the draft. Fields the user already
    /// filled in win; the service flag only ever switches on.
    pub fn apply_metadata(&mut self, metadata: &ToolMetadata) {
        if self.title.is_empty()
            && let Some(title) = &metadata.title
        {
            self.title = title.clone();
        }
        if self.brand.is_empty()
            && let Some(brand) = &metadata.brand
        {
            self.brand = brand.clone();
        }
        if self.category.is_empty()
            && let Some(category) = &metadata.category
        {
            self.category = category.clone();
        }
        if self.condition.is_none()
            && let Some(condition) = metadata.condition.as_deref().and_then(condition_from_label)
        {
            self.condition = Some(condition);
        }
        if self.description.is_empty()
            && let Some(description) = &metadata.description
        {
            self.description = description.clone();
        }
        if metadata.suggest_service {
            self.offers_service = true;
        }
    }

    /// Fold a price suggestion into the draft. The service rate applies only
    /// when the draft offers an operator service.
    pub fn apply_price_suggestion(&mut self, suggestion: PriceSuggestion) {
        if let Some(daily) = suggestion.daily_price {
            self.daily_price = Some(daily);
        }
        if self.offers_service
            && let Some(rate) = suggestion.service_rate
        {
            self.service_rate = Some(rate);
        }
    }

    /// Publish the finished draft as a listing. Simulates the network
    /// round-trip; every step gate must already be satisfied.
    ///
    /// # Errors
    ///
    /// Returns the first unmet [`ListingGap`], checked in step order.
    pub async fn publish(
        &self,
        owner_id: Uuid,
        lat: f64,
        lng: f64,
        fallback_position: FallbackPosition,
    ) -> Result<ToolListing, ListingGap> {
        if self.main_photo.is_none() {
            return Err(ListingGap::MainPhotoRequired);
        }
        if self.title.is_empty() || self.category.is_empty() {
            return Err(ListingGap::DetailsIncomplete);
        }
        if self.zip_code.is_empty() {
            return Err(ListingGap::ZipCodeRequired);
        }
        let Some(rate_per_day) = self.daily_price else {
            return Err(ListingGap::DailyPriceRequired);
        };

        tokio::time::sleep(PUBLISH_LATENCY).await;

        let listing = ToolListing {
            id: Uuid::new_v4(),
            owner_id,
            title: self.title.clone(),
            rate_per_day,
            deposit: self.deposit,
            purchase_price: self.purchase_price,
            lat,
            lng,
            fallback_position,
        };
        info!(listing = %listing.id, title = %listing.title, "listing published");
        Ok(listing)
    }
}

/// Display label for a condition, as the wizard and the model's prompt use
/// them.
#[must_use]
pub fn condition_label(condition: ToolCondition) -> &'static str {
    match condition {
        ToolCondition::New => "New",
        ToolCondition::LikeNew => "Like New",
        ToolCondition::Good => "Good",
        ToolCondition::Fair => "Fair",
        ToolCondition::Worn => "Heavily Used",
    }
}

/// Parse a condition label back into the enum. Unknown labels are `None`.
#[must_use]
pub fn condition_from_label(label: &str) -> Option<ToolCondition> {
    match label {
        "New" => Some(ToolCondition::New),
        "Like New" => Some(ToolCondition::LikeNew),
        "Good" => Some(ToolCondition::Good),
        "Fair" => Some(ToolCondition::Fair),
        "Heavily Used" => Some(ToolCondition::Worn),
        _ => None,
    }
}
