mod ui;

use adw::prelude::*;
use adw::Application;

fn main() -> glib::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = Application::builder()
        .application_id("com.carapace.Chat")
        .build();
    app.connect_activate(|app| {
        crate::ui::build_ui(app);
    });
    app.run()
}
