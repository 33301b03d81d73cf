mod components;
mod model;
mod sim;
mod state;
mod util;

use components::App;

fn main() {
    util::init_logging(log::LevelFilter::Info);
    yew::Renderer::<App>::new().render();
}
