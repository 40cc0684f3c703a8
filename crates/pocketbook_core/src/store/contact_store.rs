//! Contact-specific store operations.

use super::{JsonRecordStore, StoreResult};
use crate::model::contact::{Contact, ContactPatch, NewContact};
use crate::model::RecordId;
use log::info;

/// Store over `contacts.json`.
pub type ContactStore = JsonRecordStore<Contact>;

impl ContactStore {
    /// Validates and appends a contact, stamping both timestamps.
    pub fn add(&mut self, input: NewContact) -> StoreResult<Contact> {
        input.validate()?;
        let contact = input.into_contact(self.next_id()?, self.now());
        self.insert(contact)
    }

    /// Contacts matching `query`, in insertion order. Empty when none match.
    pub fn search(&self, query: &str) -> Vec<&Contact> {
        self.list_where(|contact| contact.matches(query))
    }

    /// Applies `patch` and refreshes `updated_at`.
    pub fn update(&mut self, id: RecordId, patch: ContactPatch) -> StoreResult<Contact> {
        let now = self.now();
        let updated = self.modify(id, |contact| patch.apply_to(contact, now))?;
        info!("event=record_update module=store status=ok kind=contact id={id}");
        Ok(updated)
    }
}
