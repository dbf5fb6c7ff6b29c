use portfolio_core::contact::FieldKey;

use super::{FieldKind, FormField};

/// Ordered collection of form fields plus presentation metadata.
pub struct FormSchema {
    pub title: &'static str,
    pub fields: Vec<FormField>,
}

impl FormSchema {
    pub fn new(title: &'static str, fields: Vec<FormField>) -> Self {
        Self { title, fields }
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    #[allow(dead_code)]
    pub fn field_by_key(&self, key: FieldKey) -> Option<&FormField> {
        self.fields.iter().find(|f| f.key == key)
    }
}

/// The contact form: the eight tracked fields in page order.
pub fn contact_schema() -> FormSchema {
    FormSchema::new(
        "Kontaktų forma",
        vec![
            FormField::new(FieldKey::FirstName, "Vardas", FieldKind::Text),
            FormField::new(FieldKey::LastName, "Pavardė", FieldKind::Text),
            FormField::new(FieldKey::Email, "El. paštas", FieldKind::Text)
                .help("vardas@pavyzdys.lt"),
            FormField::new(FieldKey::Phone, "Tel. numeris", FieldKind::Phone)
                .help("+370 6xx xxxxx"),
            FormField::new(FieldKey::Address, "Adresas", FieldKind::Text),
            FormField::new(FieldKey::Q1, "Įvertinimas 1", FieldKind::Rating).help("1-10"),
            FormField::new(FieldKey::Q2, "Įvertinimas 2", FieldKind::Rating).help("1-10"),
            FormField::new(FieldKey::Q3, "Įvertinimas 3", FieldKind::Rating).help("1-10"),
        ],
    )
}
