use gtk4::prelude::*;
use gtk4 as gtk;
use std::rc::Rc;

use carapace_chat::api::fixtures::active_contact;
use carapace_chat::api::models::{Contact, Message};
use carapace_chat::ConversationState;

const EMPTY_PAGE: &str = "empty";
const CONVERSATION_PAGE: &str = "conversation";

pub struct ChatView {
    stack: gtk::Stack,
    title: gtk::Label,
    status: gtk::Label,
    scroller: gtk::ScrolledWindow,
    messages_box: gtk::Box,
    entry: gtk::Entry,
    entry_changed: glib::SignalHandlerId,
    state: Rc<ConversationState>,
    contacts: Rc<Vec<Contact>>,
}

impl ChatView {
    pub fn new(state: Rc<ConversationState>, contacts: Rc<Vec<Contact>>) -> Rc<Self> {
        let stack = gtk::Stack::new();
        stack.set_hexpand(true);
        stack.set_vexpand(true);

        let empty = adw::StatusPage::builder()
            .title("No conversation selected")
            .description("Select a contact to start chatting.")
            .build();
        stack.add_named(&empty, Some(EMPTY_PAGE));

        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        let header = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let title = gtk::Label::new(None);
        title.add_css_class("title-3");
        title.set_halign(gtk::Align::Start);
        let status = gtk::Label::new(None);
        status.add_css_class("dim-label");
        header.append(&title);
        header.append(&status);
        root.append(&header);

        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hexpand(true)
            .hscrollbar_policy(gtk::PolicyType::Never)
            .build();
        let messages_box = gtk::Box::new(gtk::Orientation::Vertical, 6);
        scroller.set_child(Some(&messages_box));
        root.append(&scroller);

        let entry = gtk::Entry::new();
        entry.set_hexpand(true);
        entry.set_placeholder_text(Some("Type a message…"));
        root.append(&entry);

        stack.add_named(&root, Some(CONVERSATION_PAGE));

        // Every keystroke lands in the draft of whichever contact is open.
        let entry_changed = {
            let state = state.clone();
            entry.connect_changed(move |entry| {
                state.record_input(&entry.text());
            })
        };

        let view = Rc::new(Self {
            stack,
            title,
            status,
            scroller,
            messages_box,
            entry,
            entry_changed,
            state,
            contacts,
        });
        view.refresh();
        view
    }

    pub fn widget(&self) -> gtk::Widget {
        self.stack.clone().upcast()
    }

    /// Re-derive the conversation from the active contact. An unknown or
    /// missing contact shows the empty page.
    pub fn refresh(&self) {
        let Some(contact) = active_contact(&self.state, &self.contacts) else {
            self.stack.set_visible_child_name(EMPTY_PAGE);
            return;
        };

        self.title.set_label(&contact.name);
        self.status.set_label(contact.status.label());

        while let Some(child) = self.messages_box.first_child() {
            self.messages_box.remove(&child);
        }
        for message in &contact.messages {
            self.messages_box.append(&message_bubble(message));
        }

        // Loading the draft is not a keystroke.
        let draft = self.state.draft(&contact.id);
        self.entry.block_signal(&self.entry_changed);
        self.entry.set_text(&draft);
        self.entry.unblock_signal(&self.entry_changed);
        self.entry.set_position(-1);
        self.stack.set_visible_child_name(CONVERSATION_PAGE);
        self.entry.grab_focus();

        // Scroll once the new messages have been laid out.
        let adj = self.scroller.vadjustment();
        glib::idle_add_local_once(move || {
            adj.set_value(adj.upper() - adj.page_size());
        });
    }
}

fn message_bubble(message: &Message) -> gtk::Widget {
    let bubble = gtk::Box::new(gtk::Orientation::Vertical, 2);
    bubble.add_css_class("card");
    bubble.set_halign(if message.is_own() {
        gtk::Align::End
    } else {
        gtk::Align::Start
    });

    let inner = gtk::Box::new(gtk::Orientation::Vertical, 2);
    inner.set_margin_top(6);
    inner.set_margin_bottom(6);
    inner.set_margin_start(10);
    inner.set_margin_end(10);

    if !message.is_own() {
        let sender = gtk::Label::new(Some(&message.sender));
        sender.add_css_class("caption-heading");
        sender.set_halign(gtk::Align::Start);
        inner.append(&sender);
    }

    let text = gtk::Label::new(Some(&message.text));
    text.set_wrap(true);
    text.set_max_width_chars(48);
    text.set_selectable(true);
    text.set_xalign(0.0);
    inner.append(&text);

    let time = gtk::Label::new(Some(&message.timestamp));
    time.add_css_class("caption");
    time.add_css_class("dim-label");
    time.set_halign(gtk::Align::End);
    inner.append(&time);

    bubble.append(&inner);
    bubble.upcast()
}
