// src/main.rs
mod api;
mod app;
mod board;
mod config;
mod error;
mod layout;
mod model;
mod notice;

use std::rc::Rc;

use api::HttpApi;
use app::{App, AppProps};
use board::ActivityBoard;
use config::BoardConfig;
use layout::CardLayout;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Trace) {
        web_sys::console::warn_1(&format!("console logger unavailable: {e}").into());
    }

    let config = BoardConfig::from_document();
    log::set_max_level(config.log_level.to_level_filter());

    // Resolved once; the board never re-checks the host page
    let layout = CardLayout::detect();
    log::info!("activity board starting ({layout:?} cards, api base {:?})", config.api_base);

    let board = Rc::new(ActivityBoard::new(HttpApi::new(&config.api_base), config.timing));
    yew::Renderer::<App>::with_props(AppProps { board, layout }).render();
}
