use crate::api::models::Contact;
use crate::error::Result;
use crate::state::ConversationState;

// Compiled-in contact list. Stands in for a contacts/messages backend.
const CONTACTS_JSON: &str = include_str!("../../data/contacts.json");

pub fn parse_contacts(json: &str) -> Result<Vec<Contact>> {
    Ok(serde_json::from_str(json)?)
}

/// Load the bundled contacts. A broken fixture is logged and yields an empty list.
pub fn load_contacts() -> Vec<Contact> {
    match parse_contacts(CONTACTS_JSON) {
        Ok(contacts) => {
            log::info!("loaded {} contacts", contacts.len());
            contacts
        }
        Err(e) => {
            log::error!("failed to parse bundled contacts: {e}");
            Vec::new()
        }
    }
}

pub fn find_contact<'a>(contacts: &'a [Contact], id: &str) -> Option<&'a Contact> {
    contacts.iter().find(|c| c.id == id)
}

/// Contact currently selected in `state`, if it is known to `contacts`.
pub fn active_contact<'a>(state: &ConversationState, contacts: &'a [Contact]) -> Option<&'a Contact> {
    let id = state.active_contact_id()?;
    find_contact(contacts, &id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::Presence;
    use std::collections::HashSet;

    #[test]
    fn bundled_contacts_parse() {
        let contacts = parse_contacts(CONTACTS_JSON).unwrap();
        assert!(!contacts.is_empty());
        let ids: HashSet<_> = contacts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), contacts.len(), "contact ids must be unique");
        assert!(contacts.iter().any(|c| c.status == Presence::Away));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let json = r#"[{"id":"1","name":"x","status":"busy","messages":[]}]"#;
        assert!(parse_contacts(json).is_err());
    }

    #[test]
    fn messages_default_to_empty() {
        let json = r#"[{"id":"9","name":"Quiet","status":"offline"}]"#;
        let contacts = parse_contacts(json).unwrap();
        assert!(contacts[0].messages.is_empty());
        assert_eq!(contacts[0].last_message_preview(), None);
    }

    #[test]
    fn find_contact_by_id() {
        let contacts = load_contacts();
        assert_eq!(find_contact(&contacts, "2").map(|c| c.name.as_str()), Some("Grace Hopper"));
        assert!(find_contact(&contacts, "404").is_none());
    }

    #[test]
    fn active_contact_follows_state() {
        let contacts = load_contacts();
        let state = ConversationState::new();
        assert!(active_contact(&state, &contacts).is_none());

        state.set_active_contact_id(Some("1".into()));
        assert_eq!(active_contact(&state, &contacts).map(|c| c.id.as_str()), Some("1"));
    }

    #[test]
    fn unknown_active_contact_derives_nothing() {
        let contacts = load_contacts();
        let state = ConversationState::new();
        state.set_active_contact_id(Some("404".into()));
        assert!(active_contact(&state, &contacts).is_none());
    }

    #[test]
    fn own_messages_are_marked() {
        let contacts = load_contacts();
        let ada = find_contact(&contacts, "1").unwrap();
        assert!(ada.messages.iter().any(|m| m.is_own()));
        assert!(ada.messages.iter().any(|m| !m.is_own()));
    }
}
