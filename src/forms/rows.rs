use crate::forms::controller::FormController;
use serde_json::Value;

/// Ordered editor for repeatable sub-records (equipment rows, area
/// details). Rows carry stable keys so external references survive
/// insertion and removal; indices are positional only.
pub struct RowEditor {
    template: Value,
    next_key: u64,
    rows: Vec<(u64, Value)>,
}

impl RowEditor {
    /// Start with a single default-valued row
    pub fn new(template: Value) -> Self {
        let mut editor = Self {
            template,
            next_key: 0,
            rows: Vec::new(),
        };
        editor.add();
        editor
    }

    /// Rebuild from existing rows, for the edit flow
    pub fn from_rows(template: Value, rows: Vec<Value>) -> Self {
        let mut editor = Self {
            template,
            next_key: 0,
            rows: Vec::new(),
        };
        for row in rows {
            let key = editor.next_key;
            editor.next_key += 1;
            editor.rows.push((key, row));
        }
        if editor.rows.is_empty() {
            editor.add();
        }
        editor
    }

    /// Append a default-valued row, returning its stable key
    pub fn add(&mut self) -> u64 {
        let key = self.next_key;
        self.next_key += 1;
        self.rows.push((key, self.template.clone()));
        key
    }

    /// Remove the row at `index`, preserving the order of the rest.
    /// No minimum-length policy at this layer; see `removable`.
    pub fn remove(&mut self, index: usize) -> Option<Value> {
        if index < self.rows.len() {
            Some(self.rows.remove(index).1)
        } else {
            None
        }
    }

    /// UI policy: the first row is never independently removable, so
    /// at least one row always remains on screen
    pub fn removable(&self, index: usize) -> bool {
        index != 0 && index < self.rows.len()
    }

    /// Set one sub-field of the row at `index`
    pub fn set(&mut self, index: usize, field: &str, value: Value) {
        if let Some((_, row)) = self.rows.get_mut(index) {
            if let Value::Object(map) = row {
                map.insert(field.to_string(), value);
            }
        }
    }

    pub fn key_at(&self, index: usize) -> Option<u64> {
        self.rows.get(index).map(|(key, _)| *key)
    }

    pub fn rows(&self) -> impl Iterator<Item = &Value> {
        self.rows.iter().map(|(_, row)| row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Mirror the local list into the schema-bound draft field so the
    /// two stay consistent
    pub fn sync_to(&self, form: &mut FormController, path: &str) {
        let values: Vec<Value> = self.rows().cloned().collect();
        form.set_field(path, Value::Array(values));
    }
}

/// Default equipment row for lab forms
pub fn equipment_row_template() -> Value {
    serde_json::json!({"labName": "", "equipmentName": "", "capacityAndMake": ""})
}

/// Default area-detail row for raw-space forms
pub fn area_detail_row_template() -> Value {
    serde_json::json!({"areaName": "", "sizeSqft": "", "suitableFor": ""})
}
