//! Image crop engine: produces a square raster crop of an artwork centered
//! on a percentage-space focal point.
//!
//! Loading the source image is the only suspension point; the rest is an
//! offscreen 2d-canvas draw plus a data-URI encode. Crop rectangles may
//! extend past the source bounds; those output pixels are simply left blank.

use std::fmt;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::model::CropSpec;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CropError {
    /// The source image failed to load or decode.
    Load(String),
    /// No 2d context on the offscreen canvas.
    NoContext,
    /// Drawing the source rectangle failed.
    Draw,
    /// The canvas refused to encode the output.
    Encode,
}

impl fmt::Display for CropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CropError::Load(url) => write!(f, "failed to load source image: {url}"),
            CropError::NoContext => write!(f, "2d canvas context unavailable"),
            CropError::Draw => write!(f, "failed to draw crop region"),
            CropError::Encode => write!(f, "failed to encode crop output"),
        }
    }
}

/// Source-space crop square: side = natural_width * 100 / zoom, centered on
/// the focal point. Pure so the geometry is testable off-browser.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceRect {
    pub x: f64,
    pub y: f64,
    pub side: f64,
}

pub fn crop_source_rect(natural_w: f64, natural_h: f64, spec: &CropSpec) -> SourceRect {
    let side = if spec.zoom > 0.0 {
        natural_w * 100.0 / spec.zoom
    } else {
        natural_w
    };
    SourceRect {
        x: spec.x / 100.0 * natural_w - side / 2.0,
        y: spec.y / 100.0 * natural_h - side / 2.0,
        side,
    }
}

/// Dedup key for identical crop requests within one question render.
pub fn crop_key(url: &str, spec: &CropSpec) -> String {
    format!("{url}|{:.3}|{:.3}|{:.3}", spec.x, spec.y, spec.zoom)
}

/// Load an image element, resolving once natural dimensions are available.
pub async fn load_image(url: &str) -> Result<HtmlImageElement, CropError> {
    let img = HtmlImageElement::new().map_err(|_| CropError::Load(url.to_string()))?;
    // Required for canvas readback of remote artwork.
    img.set_cross_origin(Some("anonymous"));
    let img = Rc::new(img);

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let onload = Closure::once(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let onerror = Closure::once(move || {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("image_load_failed"));
        });
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onload.forget();
        onerror.forget();
    });
    img.set_src(url);

    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|_| CropError::Load(url.to_string()))?;

    if img.natural_width() == 0 || img.natural_height() == 0 {
        return Err(CropError::Load(url.to_string()));
    }
    Ok(Rc::try_unwrap(img).unwrap_or_else(|rc| (*rc).clone()))
}

/// Crop `source_url` around the focal point described by `spec` into an
/// `output_px` square and return it as a JPEG data URI.
pub async fn crop_image(
    source_url: &str,
    spec: CropSpec,
    output_px: u32,
) -> Result<String, CropError> {
    let img = load_image(source_url).await?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(CropError::NoContext)?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| CropError::NoContext)?
        .dyn_into()
        .map_err(|_| CropError::NoContext)?;
    canvas.set_width(output_px);
    canvas.set_height(output_px);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .ok_or(CropError::NoContext)?
        .dyn_into()
        .map_err(|_| CropError::NoContext)?;

    let src = crop_source_rect(
        img.natural_width() as f64,
        img.natural_height() as f64,
        &spec,
    );
    ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
        &img,
        src.x,
        src.y,
        src.side,
        src.side,
        0.0,
        0.0,
        output_px as f64,
        output_px as f64,
    )
    .map_err(|_| CropError::Draw)?;

    canvas
        .to_data_url_with_type("image/jpeg")
        .map_err(|_| CropError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_100_covers_full_width_centered() {
        let spec = CropSpec { x: 50.0, y: 50.0, zoom: 100.0 };
        let r = crop_source_rect(1000.0, 800.0, &spec);
        assert_eq!(r.side, 1000.0);
        assert_eq!(r.x, 0.0);
        // Square side follows width, so it overflows vertically; the
        // rasterizer leaves the spill blank rather than failing.
        assert_eq!(r.y, -100.0);
    }

    #[test]
    fn zoom_300_is_a_third_of_the_width() {
        let spec = CropSpec { x: 50.0, y: 50.0, zoom: 300.0 };
        let r = crop_source_rect(900.0, 900.0, &spec);
        assert!((r.side - 300.0).abs() < 1e-9);
        assert!((r.x - 300.0).abs() < 1e-9);
        assert!((r.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn edge_focal_point_may_extend_outside() {
        let spec = CropSpec { x: 2.0, y: 98.0, zoom: 300.0 };
        let r = crop_source_rect(600.0, 600.0, &spec);
        assert!(r.x < 0.0);
        assert!(r.y + r.side > 600.0);
    }

    #[test]
    fn degenerate_zoom_falls_back_to_full_width() {
        let spec = CropSpec { x: 50.0, y: 50.0, zoom: 0.0 };
        let r = crop_source_rect(500.0, 500.0, &spec);
        assert_eq!(r.side, 500.0);
    }

    #[test]
    fn identical_requests_share_a_key() {
        let a = CropSpec { x: 10.0, y: 20.0, zoom: 300.0 };
        let b = CropSpec { x: 10.0, y: 20.0, zoom: 300.0 };
        let c = CropSpec { x: 10.5, y: 20.0, zoom: 300.0 };
        assert_eq!(crop_key("u", &a), crop_key("u", &b));
        assert_ne!(crop_key("u", &a), crop_key("u", &c));
        assert_ne!(crop_key("u", &a), crop_key("v", &a));
    }
}
