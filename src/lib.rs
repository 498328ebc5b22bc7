//! Core of the Carapace chat client: shared conversation state, the
//! compiled-in contact fixtures, the identity key host and app config.
//! The GTK front end lives in the `carapace-chat` binary.

pub mod api;
pub mod app;
pub mod error;
pub mod state;
pub mod utils;

pub use error::{Error, Result};
pub use state::ConversationState;
