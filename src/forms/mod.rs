pub mod controller;
pub mod rows;
pub mod schema;

pub use controller::{FormController, SubmitOutcome};
pub use rows::RowEditor;
pub use schema::{Schema, ValidationErrors};
