pub mod chat_view;
pub mod key_view;
pub mod main_window;
pub mod sidebar;

use std::future::Future;
use std::rc::Rc;

use adw::Application;
use carapace_chat::api::fixtures::load_contacts;
use carapace_chat::app::AppConfig;
use carapace_chat::ConversationState;

pub fn build_ui(app: &Application) {
    let config = AppConfig::load();
    let contacts = Rc::new(load_contacts());
    let state = Rc::new(ConversationState::new());
    main_window::show_main_window(app, &config, contacts, state);
}

/// Run `fut` on the Tokio runtime and call `on_done` with its output on the
/// GTK main loop. If the task goes away without a result, nothing is called.
pub fn run_async_to_main<T, Fut, F>(fut: Fut, on_done: F)
where
    T: Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
    F: FnOnce(T) + 'static,
{
    let rx = carapace_chat::utils::run_async(fut);
    glib::spawn_future_local(async move {
        match rx.await {
            Ok(value) => on_done(value),
            Err(_) => log::warn!("background task ended without a result"),
        }
    });
}
