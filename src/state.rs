use std::cell::RefCell;
use std::collections::HashMap;

/// Cross-view state: which contact is open and the unsent draft per contact.
///
/// All access happens on the UI thread. Methods take `&self` and only borrow
/// for their own duration, so signal handlers can call back in freely. The
/// active id is not checked against the contact list.
#[derive(Debug, Default)]
pub struct ConversationState {
    active_contact_id: RefCell<Option<String>>,
    drafts: RefCell<HashMap<String, String>>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_contact_id(&self) -> Option<String> {
        self.active_contact_id.borrow().clone()
    }

    pub fn set_active_contact_id(&self, id: Option<String>) {
        log::debug!("active contact -> {:?}", id);
        *self.active_contact_id.borrow_mut() = id;
    }

    /// Draft for `contact_id`, empty if nothing was typed yet.
    pub fn draft(&self, contact_id: &str) -> String {
        self.drafts
            .borrow()
            .get(contact_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_draft(&self, contact_id: &str, text: &str) {
        self.drafts
            .borrow_mut()
            .insert(contact_id.to_string(), text.to_string());
    }

    pub fn has_draft(&self, contact_id: &str) -> bool {
        self.drafts.borrow().contains_key(contact_id)
    }

    /// Store input-field text as the active contact's draft. Text equal to
    /// the current draft is not written, so loading a draft into the field
    /// does not create an entry.
    pub fn record_input(&self, text: &str) {
        let Some(id) = self.active_contact_id() else {
            return;
        };
        if self.draft(&id) != text {
            self.set_draft(&id, text);
        }
    }
}
