use crate::models::{ListingDraft, ListingType};
use serde_json::Value;
use std::collections::BTreeMap;

/// Validation outcome: field path -> message, plus form-level messages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    pub fields: BTreeMap<String, String>,
    pub root: Vec<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.root.is_empty()
    }

    pub fn field(&self, path: &str) -> Option<&str> {
        self.fields.get(path).map(String::as_str)
    }

    /// First message per path wins; later rules do not overwrite it
    fn add_field(&mut self, path: &str, message: &str) {
        self.fields
            .entry(path.to_string())
            .or_insert_with(|| message.to_string());
    }

    fn add_root(&mut self, message: &str) {
        self.root.push(message.to_string());
    }
}

/// Single declarative field constraint
#[derive(Debug, Clone)]
enum Rule {
    /// Present and, for strings, non-empty after trimming
    Required { path: &'static str, message: &'static str },
    /// Numeric and strictly positive
    Positive { path: &'static str, message: &'static str },
    /// Array with at least `min` elements
    MinItems { path: &'static str, min: usize, message: &'static str },
    /// Every element is one of the allowed strings
    OneOf {
        path: &'static str,
        allowed: &'static [&'static str],
        message: &'static str,
    },
    /// Array with at least one row whose string sub-fields are all non-blank
    MinCompleteRows { path: &'static str, message: &'static str },
    /// Numeric value at `path` must not exceed the one at `peer`
    LtePeer {
        path: &'static str,
        peer: &'static str,
        message: &'static str,
    },
}

/// Declarative validation rules for one listing type
#[derive(Debug, Clone)]
pub struct Schema {
    #[allow(dead_code)]
    listing_type: ListingType,
    rules: Vec<Rule>,
}

const PLAN_NAMES: &[&str] = &["Annual", "Monthly", "Weekly", "One Day"];

impl Schema {
    pub fn for_type(listing_type: ListingType) -> Self {
        match listing_type {
            ListingType::Coworking => Self::coworking(),
            ListingType::BioAlliedLabs => Self::bio_allied_labs(),
            ListingType::RawSpaceLab => Self::raw_space_lab(),
        }
    }

    pub fn coworking() -> Self {
        Self {
            listing_type: ListingType::Coworking,
            rules: vec![
                Rule::Required { path: "name", message: "Name is required" },
                Rule::Required { path: "description", message: "Description is required" },
                Rule::Required { path: "address", message: "Address is required" },
                Rule::Positive { path: "totalSeats", message: "Total seats must be a positive number" },
                Rule::Positive { path: "availableSeats", message: "Available seats must be a positive number" },
                Rule::LtePeer {
                    path: "availableSeats",
                    peer: "totalSeats",
                    message: "Available seats cannot exceed total seats",
                },
                Rule::OneOf {
                    path: "selectedRentalPlans",
                    allowed: PLAN_NAMES,
                    message: "Unknown rental plan",
                },
            ],
        }
    }

    pub fn bio_allied_labs() -> Self {
        Self {
            listing_type: ListingType::BioAlliedLabs,
            rules: vec![
                Rule::Required { path: "name", message: "Name is required" },
                Rule::Required { path: "description", message: "Description is required" },
                Rule::Required { path: "address", message: "Address is required" },
                Rule::MinItems {
                    path: "equipment",
                    min: 1,
                    message: "Add at least one equipment row",
                },
                Rule::MinCompleteRows {
                    path: "equipment",
                    message: "Add at least one complete equipment row",
                },
                Rule::OneOf {
                    path: "selectedRentalPlans",
                    allowed: PLAN_NAMES,
                    message: "Unknown rental plan",
                },
            ],
        }
    }

    pub fn raw_space_lab() -> Self {
        Self {
            listing_type: ListingType::RawSpaceLab,
            rules: vec![
                Rule::Required { path: "name", message: "Name is required" },
                Rule::Required { path: "description", message: "Description is required" },
                Rule::Required { path: "address", message: "Address is required" },
                Rule::MinItems {
                    path: "areaDetails",
                    min: 1,
                    message: "Add at least one area detail row",
                },
                Rule::MinCompleteRows {
                    path: "areaDetails",
                    message: "Add at least one complete area detail row",
                },
                Rule::OneOf {
                    path: "selectedRentalPlans",
                    allowed: PLAN_NAMES,
                    message: "Unknown rental plan",
                },
            ],
        }
    }

    /// Check a draft against this schema. Pure, no side effects.
    pub fn validate(&self, draft: &ListingDraft) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        for rule in &self.rules {
            apply_rule(rule, draft, &mut errors);
        }

        // Checks shared by every listing type
        if array_len(draft.get("images")) == 0 {
            errors.add_field("images", "Please upload at least one image");
            errors.add_root("Please upload at least one image");
        }

        let selected = draft.selected_plans();
        if selected.is_empty() {
            errors.add_root("Select at least one rental plan");
        } else {
            let mut missing_rent = false;
            for plan in &selected {
                let field = plan.price_field();
                if !is_positive_number(draft.get(field)) {
                    errors.add_field(field, "Enter a rent value for this plan");
                    missing_rent = true;
                }
            }
            if missing_rent {
                errors.add_root("Missing rent values for selected plans");
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn apply_rule(rule: &Rule, draft: &ListingDraft, errors: &mut ValidationErrors) {
    match rule {
        Rule::Required { path, message } => {
            if is_blank(draft.get(path)) {
                errors.add_field(path, message);
            }
        }
        Rule::Positive { path, message } => {
            if !is_positive_number(draft.get(path)) {
                errors.add_field(path, message);
            }
        }
        Rule::MinItems { path, min, message } => {
            if array_len(draft.get(path)) < *min {
                errors.add_field(path, message);
            }
        }
        Rule::OneOf { path, allowed, message } => {
            if let Some(Value::Array(items)) = draft.get(path) {
                let bad = items
                    .iter()
                    .any(|v| !v.as_str().map(|s| allowed.contains(&s)).unwrap_or(false));
                if bad {
                    errors.add_field(path, message);
                }
            }
        }
        Rule::MinCompleteRows { path, message } => {
            let complete = match draft.get(path) {
                Some(Value::Array(rows)) => rows.iter().any(|r| row_is_complete(r)),
                _ => false,
            };
            if !complete {
                errors.add_field(path, message);
                errors.add_root(message);
            }
        }
        Rule::LtePeer { path, peer, message } => {
            if let (Some(a), Some(b)) = (as_number(draft.get(path)), as_number(draft.get(peer))) {
                if a > b {
                    errors.add_field(path, message);
                }
            }
        }
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn as_number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64)
}

fn is_positive_number(value: Option<&Value>) -> bool {
    as_number(value).map(|n| n > 0.0).unwrap_or(false)
}

fn array_len(value: Option<&Value>) -> usize {
    match value {
        Some(Value::Array(items)) => items.len(),
        _ => 0,
    }
}

/// A row counts as complete when every string sub-field is non-blank
pub(crate) fn row_is_complete(row: &Value) -> bool {
    match row {
        Value::Object(map) => {
            !map.is_empty()
                && map.values().all(|v| match v {
                    Value::String(s) => !s.trim().is_empty(),
                    Value::Null => false,
                    _ => true,
                })
        }
        _ => false,
    }
}
