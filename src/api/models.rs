use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Online,
    Away,
    Offline,
}

impl Presence {
    pub fn label(self) -> &'static str {
        match self {
            Presence::Online => "Online",
            Presence::Away => "Away",
            Presence::Offline => "Offline",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub status: Presence,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Contact {
    /// Text of the newest message, used as the sidebar preview.
    pub fn last_message_preview(&self) -> Option<&str> {
        self.messages.last().map(|m| m.text.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Message {
    pub sender: String,
    pub text: String,
    pub timestamp: String,
}

impl Message {
    /// Messages written by the local user carry the sender label "me".
    pub fn is_own(&self) -> bool {
        self.sender.eq_ignore_ascii_case("me")
    }
}
