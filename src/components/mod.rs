pub mod app;
pub mod controls_bar;
pub mod header;
pub mod key_capture;
pub mod settings_panel;
pub mod touchpad;
pub mod utility_bar;

pub use app::App;
