use common::{DataObject, ObjectId};
use serde::{Deserialize, Serialize};

/// One rendered list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRow {
    pub id: ObjectId,
    pub name: String,
    pub data_text: String,
}

impl From<&DataObject> for ObjectRow {
    fn from(object: &DataObject) -> Self {
        Self {
            id: object.id.clone(),
            name: object.name.clone(),
            data_text: object.data_summary(),
        }
    }
}

/// Text currently held by the two inputs of the add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub name: String,
    pub info: String,
}

impl FormFields {
    pub fn new(name: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            info: info.into(),
        }
    }
}

/// Widget toolkit seam driven by the controller.
pub trait ListView {
    /// Discards every rendered row and renders `rows` in order.
    fn render_rows(&mut self, rows: Vec<ObjectRow>);

    /// Removes only the row for `id`. Returns whether such a row was rendered.
    fn remove_row(&mut self, id: &str) -> bool;

    fn show_form(&mut self, fields: FormFields);

    fn hide_form(&mut self);

    fn form_fields(&self) -> FormFields;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormView {
    pub visible: bool,
    pub fields: FormFields,
}

/// Serializable view state rendered by the web page and the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    pub rows: Vec<ObjectRow>,
    pub form: FormView,
}

impl ViewModel {
    /// Replaces the input text, as a user typing into the form would.
    pub fn set_form_fields(&mut self, fields: FormFields) {
        self.form.fields = fields;
    }

    pub fn row(&self, id: &str) -> Option<&ObjectRow> {
        self.rows.iter().find(|row| row.id == id)
    }
}

impl ListView for ViewModel {
    fn render_rows(&mut self, rows: Vec<ObjectRow>) {
        self.rows = rows;
    }

    fn remove_row(&mut self, id: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        self.rows.len() != before
    }

    fn show_form(&mut self, fields: FormFields) {
        self.form = FormView {
            visible: true,
            fields,
        };
    }

    fn hide_form(&mut self) {
        self.form.visible = false;
    }

    fn form_fields(&self) -> FormFields {
        self.form.fields.clone()
    }
}
