use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Kind of facility a listing describes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ListingType {
    Coworking,
    BioAlliedLabs,
    RawSpaceLab,
}

/// Named pricing tier a provider can offer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlanName {
    Annual,
    Monthly,
    Weekly,
    #[serde(rename = "One Day")]
    OneDay,
}

impl PlanName {
    pub const ALL: [PlanName; 4] = [
        PlanName::Annual,
        PlanName::Monthly,
        PlanName::Weekly,
        PlanName::OneDay,
    ];

    /// Display name, also used as the plan's duration string
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanName::Annual => "Annual",
            PlanName::Monthly => "Monthly",
            PlanName::Weekly => "Weekly",
            PlanName::OneDay => "One Day",
        }
    }

    /// Draft field holding this plan's price
    pub fn price_field(&self) -> &'static str {
        match self {
            PlanName::Annual => "rentPerYear",
            PlanName::Monthly => "rentPerMonth",
            PlanName::Weekly => "rentPerWeek",
            PlanName::OneDay => "rentPerDay",
        }
    }

    /// Parse a display name back into a plan
    pub fn from_display_name(name: &str) -> Option<PlanName> {
        PlanName::ALL
            .iter()
            .copied()
            .find(|p| p.display_name() == name)
    }
}

/// Priced rental plan entry as sent to the listings API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RentalPlan {
    pub name: String,
    pub price: f64,
    pub duration: String,
}

/// In-progress state of a listing form, one field map per listing type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingDraft {
    pub listing_type: ListingType,
    /// Existing listing id when editing, absent when creating
    pub listing_id: Option<String>,
    pub fields: BTreeMap<String, Value>,
}

impl ListingDraft {
    /// Empty draft for a fresh create flow
    pub fn new(listing_type: ListingType) -> Self {
        Self {
            listing_type,
            listing_id: None,
            fields: BTreeMap::new(),
        }
    }

    /// Draft pre-populated from an existing listing, for the edit flow
    pub fn for_edit(
        listing_type: ListingType,
        listing_id: impl Into<String>,
        fields: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            listing_type,
            listing_id: Some(listing_id.into()),
            fields,
        }
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.fields.get(path)
    }

    pub fn set(&mut self, path: impl Into<String>, value: Value) {
        self.fields.insert(path.into(), value);
    }

    pub fn clear(&mut self, path: &str) {
        self.fields.remove(path);
    }

    /// Plans currently ticked in the form, skipping unknown names
    pub fn selected_plans(&self) -> Vec<PlanName> {
        match self.fields.get("selectedRentalPlans") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str())
                .filter_map(PlanName::from_display_name)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Reset to an empty create-flow draft of the same type
    pub fn reset(&mut self) {
        self.listing_id = None;
        self.fields.clear();
    }
}

/// Normalized payload accepted by the listings API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPayload {
    #[serde(rename = "type")]
    pub listing_type: ListingType,
    pub name: String,
    pub description: String,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_link: Option<String>,
    pub rental_plans: Vec<RentalPlan>,
    pub submitted_at: DateTime<Utc>,
    /// Type-specific fields (seats, equipment rows, area details, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}
