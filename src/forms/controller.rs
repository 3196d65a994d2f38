use crate::api::payload::build_payload;
use crate::api::traits::ListingApi;
use crate::forms::schema::{Schema, ValidationErrors};
use crate::models::{ListingDraft, ListingType, PlanName};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Terminal state of one submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Draft passed validation and the API accepted it; state was reset
    Submitted,
    /// Validation failed; field and root errors were recorded
    Invalid,
    /// The API rejected or was unreachable; draft kept, root error set
    Failed,
    /// A submission is already in flight; nothing was done
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Submitting,
}

/// Binds a schema to editable field state and drives submission.
///
/// One controller per form instance. All reads of conditional
/// visibility are derived from the current draft on demand, so there
/// is no observer graph to keep in sync.
pub struct FormController {
    schema: Schema,
    draft: ListingDraft,
    errors: ValidationErrors,
    phase: Phase,
}

impl FormController {
    /// Controller over an empty draft for the create flow
    pub fn new(listing_type: ListingType) -> Self {
        Self {
            schema: Schema::for_type(listing_type),
            draft: ListingDraft::new(listing_type),
            errors: ValidationErrors::default(),
            phase: Phase::Idle,
        }
    }

    /// Controller over a pre-populated draft for the edit flow
    pub fn for_edit(draft: ListingDraft) -> Self {
        Self {
            schema: Schema::for_type(draft.listing_type),
            draft,
            errors: ValidationErrors::default(),
            phase: Phase::Idle,
        }
    }

    pub fn draft(&self) -> &ListingDraft {
        &self.draft
    }

    /// Read the current value at a field path
    pub fn watch(&self, path: &str) -> Option<&Value> {
        self.draft.get(path)
    }

    pub fn field_error(&self, path: &str) -> Option<&str> {
        self.errors.field(path)
    }

    pub fn root_errors(&self) -> &[String] {
        &self.errors.root
    }

    pub fn field_errors(&self) -> &std::collections::BTreeMap<String, String> {
        &self.errors.fields
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// Overwrite the value at a path and clear its error.
    ///
    /// Writing `selectedRentalPlans` cascades: the price field of any
    /// plan that was deselected is cleared, since a price for an
    /// unselected plan is semantically absent rather than invalid.
    pub fn set_field(&mut self, path: &str, value: Value) {
        if path == "selectedRentalPlans" {
            let before = self.draft.selected_plans();
            self.draft.set(path, value);
            let after = self.draft.selected_plans();
            for plan in before {
                if !after.contains(&plan) {
                    debug!("Plan {} deselected, clearing its rent field", plan.display_name());
                    self.draft.clear(plan.price_field());
                    self.errors.fields.remove(plan.price_field());
                }
            }
        } else {
            self.draft.set(path, value);
        }
        self.errors.fields.remove(path);
    }

    /// Price fields that should currently be visible, derived from the
    /// selected plans on every call
    pub fn visible_price_fields(&self) -> Vec<&'static str> {
        self.draft
            .selected_plans()
            .iter()
            .map(PlanName::price_field)
            .collect()
    }

    /// Run validation and, if the draft is valid, submit it.
    ///
    /// `Idle -> Validating -> {Invalid | Submitting -> {Submitted | Failed}}`.
    /// A call while a submission is in flight returns `Busy` without
    /// touching any state.
    pub async fn validate_and_submit(&mut self, api: &dyn ListingApi) -> SubmitOutcome {
        if self.phase == Phase::Submitting {
            warn!("Submit attempt while a submission is in flight");
            return SubmitOutcome::Busy;
        }

        self.errors = ValidationErrors::default();
        if let Err(errors) = self.schema.validate(&self.draft) {
            info!(
                "Draft rejected: {} field error(s), {} form error(s)",
                errors.fields.len(),
                errors.root.len()
            );
            self.errors = errors;
            return SubmitOutcome::Invalid;
        }

        self.phase = Phase::Submitting;
        let result = match build_payload(&self.draft) {
            Ok(payload) => match self.draft.listing_id.clone() {
                Some(id) => api.update_listing(&id, &payload).await,
                None => api.create_listing(&payload).await,
            },
            Err(e) => Err(e),
        };
        self.phase = Phase::Idle;

        match result {
            Ok(()) => {
                info!("Listing submitted, resetting draft");
                self.draft.reset();
                SubmitOutcome::Submitted
            }
            Err(e) => {
                warn!("Listing submission failed: {:#}", e);
                self.errors
                    .root
                    .push("Submission failed. Please try again.".to_string());
                SubmitOutcome::Failed
            }
        }
    }
}
