mod components;
mod config;
mod crop;
mod data;
mod geometry;
mod model;
mod quizgen;
mod state;
mod util;

use components::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
