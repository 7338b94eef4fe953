// Touch/pinch gesture state for the exploration canvas.
#[derive(Default, Debug, Clone)]
pub struct TouchState {
    pub single_active: bool,
    pub pinch: bool,
    pub start_pinch_dist: f64,
    pub start_zoom_factor: f64,
    /// Image-pixel point held fixed under the pinch midpoint.
    pub image_center_x: f64,
    pub image_center_y: f64,
    pub last_touch_x: f64,
    pub last_touch_y: f64,
}
