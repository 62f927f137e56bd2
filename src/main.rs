mod components;
mod config;
mod model;
mod protocol;
mod state;
mod transport;
mod util;

use components::App;

fn main() {
    console_error_panic_hook::set_once();
    util::init_logging();
    log::info!("touch remote {} starting", env!("CARGO_PKG_VERSION"));
    yew::Renderer::<App>::new().render();
}
