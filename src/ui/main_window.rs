use adw::prelude::*;
use adw::Application;
use std::rc::Rc;
use std::sync::Arc;

use carapace_chat::api::models::Contact;
use carapace_chat::app::AppConfig;
use carapace_chat::ConversationState;

use crate::ui::chat_view::ChatView;
use crate::ui::sidebar::Sidebar;

pub fn show_main_window(
    app: &Application,
    config: &AppConfig,
    contacts: Rc<Vec<Contact>>,
    state: Rc<ConversationState>,
) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Carapace")
        .default_width(config.window_width)
        .default_height(config.window_height)
        .build();

    let overlay = adw::ToastOverlay::new();

    let split = adw::Flap::builder()
        .reveal_flap(true)
        .locked(true)
        .modal(false)
        .build();

    let sidebar = Sidebar::new(contacts.clone());
    split.set_flap(Some(&sidebar.widget()));

    let chat = ChatView::new(state.clone(), contacts);
    split.set_content(Some(&chat.widget()));

    {
        let chat = chat.clone();
        sidebar.connect_contact_selected(move |contact| {
            state.set_active_contact_id(contact.map(|c| c.id.clone()));
            chat.refresh();
        });
    }

    overlay.set_child(Some(&split));

    let container = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let title = gtk4::Label::new(Some("Carapace"));
    header.set_title_widget(Some(&title));

    let key_btn = gtk4::Button::with_label("My Key");
    header.pack_end(&key_btn);
    container.append(&header);
    container.append(&overlay);
    window.set_content(Some(&container));

    match config.key_host() {
        Ok(host) => {
            let host = Arc::new(host);
            let window = window.clone();
            key_btn.connect_clicked(move |_| {
                crate::ui::key_view::show_key_window(&window, host.clone());
            });
        }
        Err(e) => {
            log::warn!("identity key store unavailable: {e}");
            key_btn.set_sensitive(false);
            overlay.add_toast(adw::Toast::new(&format!("Key store unavailable: {}", e)));
        }
    }

    // Remember the window size for the next launch.
    {
        let config = config.clone();
        window.connect_close_request(move |window| {
            let (width, height) = window.default_size();
            let updated = AppConfig {
                window_width: width,
                window_height: height,
                ..config.clone()
            };
            if updated != config {
                if let Err(e) = updated.save() {
                    log::warn!("failed to save config: {e}");
                }
            }
            glib::Propagation::Proceed
        });
    }

    window.present();
}
