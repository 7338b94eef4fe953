pub mod touch;
pub mod viewport;

pub use touch::TouchState;
pub use viewport::Viewport;
