#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

use eframe::egui;

mod ambient;
mod app;
mod chart;
mod config;
mod constants;
mod data;
mod error;
mod state;
mod ui;

use app::GlareScope;

fn main() {
    #[cfg(feature = "profile-with-puffin")]
    let _puffin_server = {
        puffin::set_scopes_on(true);
        puffin_http::Server::new(&format!("0.0.0.0:{}", puffin_http::DEFAULT_PORT))
            .expect("failed to start puffin server")
    };

    // An optional path argument opens that capture at startup
    let initial = std::env::args().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 640.0])
            .with_min_inner_size([640.0, 400.0])
            .with_title("Glare Scope"),
        ..Default::default()
    };
    eframe::run_native(
        "Glare Scope",
        options,
        Box::new(move |_| Ok(Box::new(GlareScope::new(initial)))),
    )
    .unwrap();
}
