//! Interaction tuning constants, grouped so call sites never hardcode them.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasTuning {
    /// Initial zoom applied on top of "fit screen" scale (1.2 = 20% in).
    pub zoom_bias: f64,
    /// Pan limit as a fraction of the scaled image size per axis.
    pub pan_clamp_factor: f64,
    /// Click radius multiplier over the authored hotspot radius. Generous on
    /// purpose for touch usability; must stay >= 1.
    pub hit_radius_multiplier: f64,
    /// Visual highlight circle multiplier over the authored radius.
    pub visual_radius_multiplier: f64,
    /// Pointer travel (px) below which a pointer-up still counts as a click.
    pub click_drag_threshold_px: f64,
    /// Mouse-wheel zoom on the exploration canvas.
    pub wheel_zoom_enabled: bool,
    /// Zoom factor bounds, relative to fit scale.
    pub min_zoom_factor: f64,
    pub max_zoom_factor: f64,
    /// Delay before hand-off once the last hotspot is found.
    pub completion_delay_ms: u32,
    /// Delay after an answer is locked in before advancing.
    pub advance_delay_ms: u32,
    /// Output edge length of generated option crops.
    pub crop_output_px: u32,
    /// Default crop zoom percentage for generated quiz options.
    pub default_crop_zoom: f64,
    /// Minimum percentage-space distance between distractors and the answer.
    pub distractor_min_distance: f64,
}

impl Default for CanvasTuning {
    fn default() -> Self {
        Self {
            zoom_bias: 1.2,
            pan_clamp_factor: 0.75,
            hit_radius_multiplier: 2.0,
            visual_radius_multiplier: 2.5,
            click_drag_threshold_px: 5.0,
            wheel_zoom_enabled: true,
            min_zoom_factor: 0.5,
            max_zoom_factor: 4.0,
            completion_delay_ms: 1500,
            advance_delay_ms: 800,
            crop_output_px: 200,
            default_crop_zoom: 300.0,
            distractor_min_distance: 15.0,
        }
    }
}
