pub mod app;
pub mod label_strip;
pub mod learning_canvas;
pub mod loading_overlay;
pub mod progress_bar;
pub mod quiz_canvas;
pub mod results_screen;
pub mod tooltip_panel;

pub use app::App;
