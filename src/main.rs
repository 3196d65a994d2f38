mod api;
mod forms;
mod models;

use api::{ApiConfig, HttpListingApi};
use forms::rows::equipment_row_template;
use forms::{FormController, RowEditor, SubmitOutcome};
use models::ListingType;
use serde_json::json;
use tracing::{info, warn, Level};
use tracing_subscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🏢 Facility Listings - demo submission");
    info!("======================================");

    let config = ApiConfig::from_env();
    info!("Submitting to {}", config.base_url);
    let api = HttpListingApi::with_config(config)?;

    // Fill a bio/allied-labs listing the way the form pages do
    let mut form = FormController::new(ListingType::BioAlliedLabs);
    form.set_field("name", json!("Helix Shared Lab"));
    form.set_field("description", json!("Fully serviced wet lab benches with cold storage."));
    form.set_field("address", json!("12 Science Park Drive"));
    form.set_field("images", json!(["https://cdn.example.com/listings/helix-1.jpg"]));
    form.set_field("selectedRentalPlans", json!(["Monthly", "Weekly"]));
    form.set_field("rentPerMonth", json!(5000));
    form.set_field("rentPerWeek", json!(1500));

    info!("Visible price fields: {:?}", form.visible_price_fields());

    let mut equipment = RowEditor::new(equipment_row_template());
    equipment.set(0, "labName", json!("Bench A"));
    equipment.set(0, "equipmentName", json!("Centrifuge"));
    equipment.set(0, "capacityAndMake", json!("12x50ml, Eppendorf"));
    equipment.add();
    equipment.set(1, "labName", json!("Bench B"));
    equipment.set(1, "equipmentName", json!("PCR thermocycler"));
    equipment.set(1, "capacityAndMake", json!("96-well, Bio-Rad"));
    equipment.sync_to(&mut form, "equipment");

    match form.validate_and_submit(&api).await {
        SubmitOutcome::Submitted => {
            info!("✅ Listing submitted and draft reset");
        }
        SubmitOutcome::Invalid => {
            warn!("Draft rejected by validation:");
            for message in form.root_errors() {
                warn!("  form: {}", message);
            }
            for (path, message) in form.field_errors() {
                warn!("  {}: {}", path, message);
            }
        }
        SubmitOutcome::Failed => {
            warn!("Submission failed:");
            for message in form.root_errors() {
                warn!("  {}", message);
            }
        }
        SubmitOutcome::Busy => {
            warn!("A submission was already in flight");
        }
    }

    Ok(())
}
