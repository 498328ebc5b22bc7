use adw::prelude::*;
use gtk4 as gtk;
use std::sync::Arc;

use carapace_chat::api::keys::KeyHost;

const PLACEHOLDER: &str = "Loading key…";

/// Window showing the local public key with a Copy button. The key is fetched
/// once from `host`; on failure the placeholder stays.
pub fn show_key_window<H: KeyHost>(parent: &impl IsA<gtk::Window>, host: Arc<H>) {
    let window = adw::Window::builder()
        .transient_for(parent)
        .modal(true)
        .title("Public Key")
        .default_width(480)
        .default_height(280)
        .build();

    let toast_overlay = adw::ToastOverlay::new();

    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_margin_top(24);
    root.set_margin_bottom(24);
    root.set_margin_start(24);
    root.set_margin_end(24);

    let title = gtk::Label::new(Some("Your public key"));
    title.add_css_class("title-2");
    title.set_halign(gtk::Align::Start);
    root.append(&title);

    let hint = gtk::Label::new(Some("Share this key so contacts can verify it is you."));
    hint.add_css_class("dim-label");
    hint.set_halign(gtk::Align::Start);
    hint.set_wrap(true);
    root.append(&hint);

    let key_label = gtk::Label::new(Some(PLACEHOLDER));
    key_label.add_css_class("monospace");
    key_label.add_css_class("card");
    key_label.set_selectable(true);
    key_label.set_wrap(true);
    key_label.set_wrap_mode(gtk::pango::WrapMode::Char);
    key_label.set_xalign(0.0);
    key_label.set_vexpand(true);
    root.append(&key_label);

    let copy_btn = gtk::Button::with_label("Copy");
    copy_btn.add_css_class("suggested-action");
    copy_btn.set_halign(gtk::Align::End);
    root.append(&copy_btn);

    toast_overlay.set_child(Some(&root));
    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    container.append(&adw::HeaderBar::new());
    container.append(&toast_overlay);
    window.set_content(Some(&container));

    {
        let key_label = key_label.clone();
        let overlay = toast_overlay.clone();
        copy_btn.connect_clicked(move |_| {
            key_label.clipboard().set_text(&key_label.label());
            overlay.add_toast(adw::Toast::new("Copied to clipboard"));
        });
    }

    let label_for_result = key_label.clone();
    crate::ui::run_async_to_main(
        async move { host.public_key().await },
        move |res| match res {
            Ok(key) => label_for_result.set_label(&key),
            Err(e) => log::warn!("public key unavailable: {e}"),
        },
    );

    window.present();
}
