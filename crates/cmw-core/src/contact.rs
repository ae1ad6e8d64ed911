//! Contact details collected on the first wizard step.

use serde::{Deserialize, Serialize};

/// Contact details entered (or prefilled) on step 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Addressable contact form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    Phone,
}

impl ContactField {
    pub const ALL: [ContactField; 4] = [
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::Email,
        ContactField::Phone,
    ];
}

impl ContactInfo {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::FirstName => self.first_name = value,
            ContactField::LastName => self.last_name = value,
            ContactField::Email => self.email = value,
            ContactField::Phone => self.phone = value,
        }
    }

    /// Seed fields from a partial contact.
    ///
    /// Absent or empty values leave the current value in place.
    pub fn apply_patch(&mut self, patch: &ContactPatch) {
        for field in ContactField::ALL {
            if let Some(value) = patch.get(field).filter(|v| !v.is_empty()) {
                self.set(field, value.to_string());
            }
        }
    }
}

/// Partial contact as sent by the host page (or passed in at mount).
///
/// The host may attach extra fields (`id`, `tags`, `customFields`); they are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ContactPatch {
    pub fn get(&self, field: ContactField) -> Option<&str> {
        match field {
            ContactField::FirstName => self.first_name.as_deref(),
            ContactField::LastName => self.last_name.as_deref(),
            ContactField::Email => self.email.as_deref(),
            ContactField::Phone => self.phone.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactInfo {
        ContactInfo {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@example.com".into(),
            phone: "(555) 123-4567".into(),
        }
    }

    #[test]
    fn apply_patch_only_touches_present_fields() {
        let mut contact = filled();
        let patch = ContactPatch {
            email: Some("new@example.com".into()),
            ..Default::default()
        };

        contact.apply_patch(&patch);

        assert_eq!(contact.email, "new@example.com");
        assert_eq!(contact.first_name, "Jane");
        assert_eq!(contact.phone, "(555) 123-4567");
    }

    #[test]
    fn apply_patch_treats_empty_strings_as_absent() {
        let mut contact = filled();
        let patch = ContactPatch {
            first_name: Some(String::new()),
            last_name: Some("Smith".into()),
            ..Default::default()
        };

        contact.apply_patch(&patch);

        assert_eq!(contact.first_name, "Jane");
        assert_eq!(contact.last_name, "Smith");
    }

    #[test]
    fn patch_ignores_unknown_host_fields() {
        let patch: ContactPatch = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "firstName": "Ann",
            "tags": ["lead"],
            "customFields": {"x": 1}
        }))
        .unwrap();

        assert_eq!(patch.first_name.as_deref(), Some("Ann"));
        assert!(patch.email.is_none());
    }

    #[test]
    fn contact_info_serializes_camel_case() {
        let value = serde_json::to_value(filled()).unwrap();
        assert_eq!(value["firstName"], "Jane");
        assert_eq!(value["lastName"], "Doe");
    }
}
