use crate::forms::schema::row_is_complete;
use crate::models::{ListingDraft, ListingPayload, RentalPlan};
use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::Value;
use std::collections::BTreeMap;

/// Draft fields consumed into dedicated payload slots
const CONSUMED_FIELDS: &[&str] = &[
    "name",
    "description",
    "images",
    "videoLink",
    "selectedRentalPlans",
    "rentPerYear",
    "rentPerMonth",
    "rentPerWeek",
    "rentPerDay",
];

/// Build the normalized submission payload from a draft that has
/// already passed schema validation.
pub fn build_payload(draft: &ListingDraft) -> Result<ListingPayload> {
    let name = string_field(draft, "name").context("Draft is missing a name")?;
    let description =
        string_field(draft, "description").context("Draft is missing a description")?;

    let images = match draft.get("images") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    };

    let video_link = string_field(draft, "videoLink").filter(|s| !s.trim().is_empty());

    let mut rental_plans = Vec::new();
    for plan in draft.selected_plans() {
        let price = draft
            .get(plan.price_field())
            .and_then(Value::as_f64)
            .with_context(|| format!("Missing price for {} plan", plan.display_name()))?;
        rental_plans.push(RentalPlan {
            name: plan.display_name().to_string(),
            price,
            duration: plan.display_name().to_string(),
        });
    }

    let mut extra = BTreeMap::new();
    for (field, value) in &draft.fields {
        if CONSUMED_FIELDS.contains(&field.as_str()) {
            continue;
        }
        // Repeatable-record arrays are sent without their incomplete rows
        let value = match value {
            Value::Array(rows) if rows.iter().all(Value::is_object) => Value::Array(
                rows.iter()
                    .filter(|r| row_is_complete(r))
                    .cloned()
                    .collect(),
            ),
            other => other.clone(),
        };
        extra.insert(field.clone(), value);
    }

    Ok(ListingPayload {
        listing_type: draft.listing_type,
        name,
        description,
        images,
        video_link,
        rental_plans,
        submitted_at: Utc::now(),
        extra,
    })
}

fn string_field(draft: &ListingDraft, path: &str) -> Option<String> {
    draft.get(path).and_then(Value::as_str).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListingType;
    use serde_json::json;

    fn lab_draft() -> ListingDraft {
        let mut draft = ListingDraft::new(ListingType::BioAlliedLabs);
        draft.set("name", json!("Lab A"));
        draft.set("description", json!("Shared wet lab"));
        draft.set("images", json!(["u1"]));
        draft.set("selectedRentalPlans", json!(["Monthly"]));
        draft.set("rentPerMonth", json!(5000));
        draft.set(
            "equipment",
            json!([
                {"labName": "L1", "equipmentName": "E1", "capacityAndMake": "C1"},
                {"labName": "", "equipmentName": "E2", "capacityAndMake": "C2"},
            ]),
        );
        draft
    }

    #[test]
    fn maps_selected_plans_to_rental_plans() {
        let payload = build_payload(&lab_draft()).unwrap();
        assert_eq!(
            payload.rental_plans,
            vec![RentalPlan {
                name: "Monthly".to_string(),
                price: 5000.0,
                duration: "Monthly".to_string(),
            }]
        );
    }

    #[test]
    fn filters_incomplete_rows() {
        let payload = build_payload(&lab_draft()).unwrap();
        let equipment = payload.extra.get("equipment").unwrap().as_array().unwrap();
        assert_eq!(equipment.len(), 1);
        assert_eq!(equipment[0]["equipmentName"], json!("E1"));
    }

    #[test]
    fn tags_payload_with_listing_type() {
        let payload = build_payload(&lab_draft()).unwrap();
        let wire = serde_json::to_value(&payload).unwrap();
        assert_eq!(wire["type"], json!("bioAlliedLabs"));
        assert_eq!(wire["name"], json!("Lab A"));
        assert!(wire.get("videoLink").is_none());
    }

    #[test]
    fn one_day_plan_uses_daily_rate_field() {
        let mut draft = lab_draft();
        draft.set("selectedRentalPlans", json!(["One Day"]));
        draft.set("rentPerDay", json!(250));
        let payload = build_payload(&draft).unwrap();
        assert_eq!(payload.rental_plans.len(), 1);
        assert_eq!(payload.rental_plans[0].name, "One Day");
        assert_eq!(payload.rental_plans[0].price, 250.0);
    }
}
