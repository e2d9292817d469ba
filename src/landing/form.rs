//! Interpretation of submitted form data.

use serde::Serialize;
use std::collections::HashMap;

const NAME_KEYS: &[&str] = &["name", "nome"];
const EMAIL_KEYS: &[&str] = &["email", "e-mail"];
const PHONE_KEYS: &[&str] = &["phone_number", "telefone", "celular"];

/// A (label, value) pair recognized during ingestion, in capture order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedField {
    pub label: String,
    pub value: String,
}

impl CapturedField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The well-known contact attributes. Missing ones are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ContactFields {
    /// Pulls name/email/phone out of the form, matching keys case-insensitively.
    /// A repeated key keeps its last value.
    pub fn extract(form: &[(String, String)]) -> Self {
        let mut fields = ContactFields::default();
        for (key, value) in form {
            let key = key.to_lowercase();
            if NAME_KEYS.contains(&key.as_str()) {
                fields.name = value.clone();
            } else if EMAIL_KEYS.contains(&key.as_str()) {
                fields.email = value.clone();
            } else if PHONE_KEYS.contains(&key.as_str()) {
                fields.phone = value.clone();
            }
        }
        fields
    }

    pub fn captured(&self) -> Vec<CapturedField> {
        [("Name", &self.name), ("Email", &self.email), ("Phone", &self.phone)]
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(label, value)| CapturedField::new(label, value.as_str()))
            .collect()
    }
}

/// A custom field definition as seen by the lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub id: i32,
    pub label: String,
}

/// A submitted key that hit a field definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch<'a> {
    pub field: &'a FieldRef,
    pub value: &'a str,
}

/// Case-insensitive label index over a set of enabled field definitions.
/// Built once per request, probed once per submitted key.
#[derive(Debug, Default)]
pub struct FieldLookup {
    by_label: HashMap<String, FieldRef>,
}

impl FieldLookup {
    /// On a label collision the first definition wins.
    pub fn new<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = FieldRef>,
    {
        let mut by_label = HashMap::new();
        for field in fields {
            by_label.entry(field.label.to_lowercase()).or_insert(field);
        }
        Self { by_label }
    }

    pub fn get(&self, key: &str) -> Option<&FieldRef> {
        self.by_label.get(&key.to_lowercase())
    }

    /// Every submitted pair whose key names a known field, in submission order.
    pub fn match_form<'a>(&'a self, form: &'a [(String, String)]) -> Vec<FieldMatch<'a>> {
        form.iter()
            .filter_map(|(key, value)| {
                self.get(key).map(|field| FieldMatch {
                    field,
                    value: value.as_str(),
                })
            })
            .collect()
    }
}
