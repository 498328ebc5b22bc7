use gtk4::prelude::*;
use gtk4 as gtk;
use std::rc::Rc;

use carapace_chat::api::models::{Contact, Presence};

pub struct Sidebar {
    root: gtk::Box,
    list: gtk::ListBox,
    contacts: Rc<Vec<Contact>>,
}

impl Sidebar {
    pub fn new(contacts: Rc<Vec<Contact>>) -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);
        root.set_width_request(260);

        let title = gtk::Label::new(Some("Contacts"));
        title.add_css_class("heading");
        title.set_halign(gtk::Align::Start);
        root.append(&title);

        let list = gtk::ListBox::new();
        list.add_css_class("navigation-sidebar");
        list.set_selection_mode(gtk::SelectionMode::Single);
        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hscrollbar_policy(gtk::PolicyType::Never)
            .child(&list)
            .build();
        root.append(&scroller);

        let sidebar = Self { root, list, contacts };
        sidebar.populate();
        sidebar
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    fn populate(&self) {
        while let Some(child) = self.list.first_child() {
            self.list.remove(&child);
        }
        for contact in self.contacts.iter() {
            self.list.append(&contact_row(contact));
        }
    }

    /// `f` gets the newly selected contact, or `None` when the selection is cleared.
    pub fn connect_contact_selected<F: Fn(Option<&Contact>) + 'static>(&self, f: F) {
        let contacts = self.contacts.clone();
        self.list.connect_row_selected(move |_, row| {
            let contact = row
                .and_then(|r| usize::try_from(r.index()).ok())
                .and_then(|idx| contacts.get(idx));
            f(contact);
        });
    }
}

fn contact_row(contact: &Contact) -> gtk::ListBoxRow {
    let row = gtk::ListBoxRow::new();
    let body = gtk::Box::new(gtk::Orientation::Vertical, 2);
    body.set_margin_top(8);
    body.set_margin_bottom(8);
    body.set_margin_start(8);
    body.set_margin_end(8);

    let top = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    let name = gtk::Label::new(Some(&contact.name));
    name.set_halign(gtk::Align::Start);
    name.set_hexpand(true);
    name.add_css_class("heading");
    let status = gtk::Label::new(Some(contact.status.label()));
    status.add_css_class("caption");
    status.add_css_class(presence_css_class(contact.status));
    top.append(&name);
    top.append(&status);
    body.append(&top);

    let preview = gtk::Label::new(Some(contact.last_message_preview().unwrap_or("No messages yet")));
    preview.set_halign(gtk::Align::Start);
    preview.set_ellipsize(gtk::pango::EllipsizeMode::End);
    preview.add_css_class("dim-label");
    body.append(&preview);

    row.set_child(Some(&body));
    row
}

fn presence_css_class(status: Presence) -> &'static str {
    match status {
        Presence::Online => "success",
        Presence::Away => "warning",
        Presence::Offline => "dim-label",
    }
}
