//! Contact record model.
//!
//! # Invariants
//! - `name` and `phone` are never blank after create/update.
//! - `updated_at` is refreshed by every successful update; `created_at` never changes.

use super::{apply_required, require, FieldChange, Record, RecordId, ValidationError};
use serde::{Deserialize, Serialize};

/// One entry of the contact list, as persisted in `contacts.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: RecordId,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Record for Contact {
    const KIND: &'static str = "contact";

    fn id(&self) -> RecordId {
        self.id
    }
}

impl Contact {
    /// Case-insensitive substring match on name, phone and email.
    ///
    /// An empty query matches every contact.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.phone.to_lowercase().contains(&needle)
            || self
                .email
                .as_deref()
                .is_some_and(|email| email.to_lowercase().contains(&needle))
    }
}

/// Field values for a new contact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl NewContact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("phone", &self.phone)
    }

    pub(crate) fn into_contact(self, id: RecordId, now: String) -> Contact {
        Contact {
            id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            address: self.address,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Partial update for an existing contact.
///
/// `name`/`phone` are overwritten only by non-blank values; `email` and
/// `address` follow [`FieldChange`] so callers can clear them explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: FieldChange<String>,
    pub address: FieldChange<String>,
}

impl ContactPatch {
    pub(crate) fn apply_to(self, contact: &mut Contact, now: String) {
        apply_required(self.name, &mut contact.name);
        apply_required(self.phone, &mut contact.phone);
        self.email.apply(&mut contact.email);
        self.address.apply(&mut contact.address);
        contact.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::{Contact, ContactPatch, NewContact};
    use crate::model::{FieldChange, ValidationError};

    fn sample() -> Contact {
        NewContact::new("Alice Smith", "555-1111")
            .with_email("Alice@Example.com")
            .into_contact(1, "2024-01-01 09:00:00".to_string())
    }

    #[test]
    fn matches_is_case_insensitive_on_name_and_email() {
        let contact = sample();
        assert!(contact.matches("alice"));
        assert!(contact.matches("EXAMPLE"));
        assert!(contact.matches("555-1"));
        assert!(contact.matches(""));
        assert!(!contact.matches("bob"));
    }

    #[test]
    fn phone_match_ignores_case_of_lettered_numbers() {
        let contact = NewContact::new("Florist", "1-800-FLOWERS")
            .into_contact(2, "2024-01-01 09:00:00".to_string());
        assert!(contact.matches("flowers"));
        assert!(contact.matches("800-Flo"));
    }

    #[test]
    fn validate_rejects_blank_required_fields() {
        let err = NewContact::new("  ", "555").validate().unwrap_err();
        assert_eq!(err, ValidationError::EmptyField("name"));
        let err = NewContact::new("Bob", "").validate().unwrap_err();
        assert_eq!(err, ValidationError::EmptyField("phone"));
    }

    #[test]
    fn patch_keeps_unprovided_fields_and_refreshes_updated_at() {
        let mut contact = sample();
        ContactPatch {
            phone: Some("555-9999".to_string()),
            address: FieldChange::Set("1 Main St".to_string()),
            ..ContactPatch::default()
        }
        .apply_to(&mut contact, "2024-02-02 10:00:00".to_string());

        assert_eq!(contact.name, "Alice Smith");
        assert_eq!(contact.phone, "555-9999");
        assert_eq!(contact.email.as_deref(), Some("Alice@Example.com"));
        assert_eq!(contact.address.as_deref(), Some("1 Main St"));
        assert_eq!(contact.created_at, "2024-01-01 09:00:00");
        assert_eq!(contact.updated_at, "2024-02-02 10:00:00");
    }

    #[test]
    fn absent_optional_fields_serialize_as_null() {
        let contact = NewContact::new("Bob", "555-2222").into_contact(2, "t".to_string());
        let json = serde_json::to_value(&contact).unwrap();
        assert!(json["email"].is_null());
        assert!(json["address"].is_null());
        assert_eq!(json["id"], 2);
    }
}
